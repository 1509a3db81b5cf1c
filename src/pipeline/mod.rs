//! Artist aggregation pipeline
//!
//! Resolves a free-text query into an [`ArtistProfile`] and fans out the
//! dependent sub-fetches (top tracks, albums, related artists). Each
//! sub-fetch is an independent task: they are not joined, their relative
//! order is undefined, and a failure in one never affects the others or the
//! resolution result.
//!
//! Every request that renders into a page region takes a generation ticket
//! for that region first. A response whose ticket has been superseded by a
//! newer request for the same region is dropped instead of rendered.

mod generation;
#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;

use futures::future::join_all;
use tokio::task::JoinHandle;

use crate::error::{FetchError, PipelineError};
use crate::model::album_name;
use crate::model::cover_art;
use crate::model::responses;
use crate::model::{AlbumSelection, AlbumTile, ArtistProfile, Endpoint, Transport, Validation, POPULAR_HEADER};
use crate::render::{Region, RenderedView, Renderer};

pub use generation::{RegionGenerations, Ticket};

/// Result of [`ArtistPipeline::load_artist`]
pub enum LoadOutcome {
    Resolved { profile: ArtistProfile, fetches: FanOut },
    Failed(PipelineError),
    /// A newer load started before this one resolved. Nothing was spawned.
    Superseded,
}

impl LoadOutcome {
    /// `None` when a newer load owns the search bar
    pub fn validation(&self) -> Option<Validation> {
        match self {
            LoadOutcome::Resolved { .. } => Some(Validation::Success),
            LoadOutcome::Failed(_) => Some(Validation::Failure),
            LoadOutcome::Superseded => None,
        }
    }
}

/// Sub-fetch tasks started by a successful load.
///
/// Dropping this detaches the tasks; they keep running.
pub struct FanOut {
    handles: Vec<JoinHandle<()>>,
}

impl FanOut {
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Wait for every sub-fetch to finish
    pub async fn join(self) {
        for result in join_all(self.handles).await {
            if let Err(e) = result {
                tracing::error!(error = %e, "Sub-fetch task panicked");
            }
        }
    }
}

pub struct ArtistPipeline<T, R> {
    transport: Arc<T>,
    renderer: Arc<R>,
    generations: Arc<RegionGenerations>,
}

impl<T, R> Clone for ArtistPipeline<T, R> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            renderer: self.renderer.clone(),
            generations: self.generations.clone(),
        }
    }
}

impl<T: Transport, R: Renderer> ArtistPipeline<T, R> {
    pub fn new(transport: T, renderer: R) -> Self {
        Self {
            transport: Arc::new(transport),
            renderer: Arc::new(renderer),
            generations: Arc::new(RegionGenerations::default()),
        }
    }

    /// Look up `query` and render the first match as the artist profile.
    ///
    /// The query is sent exactly as typed.
    pub async fn resolve_artist(&self, query: &str) -> Result<ArtistProfile, PipelineError> {
        let ticket = self.generations.begin(Region::ArtistProfile);
        self.resolve(ticket, query).await
    }

    /// Resolve `query` and, on success, start the three sub-fetches
    /// without waiting for them.
    ///
    /// The profile ticket doubles as the load generation: once a newer load
    /// has taken one, this load neither renders nor fans out.
    pub async fn load_artist(&self, query: &str) -> LoadOutcome {
        let ticket = self.generations.begin(Region::ArtistProfile);
        let result = self.resolve(ticket, query).await;

        if !self.generations.is_current(ticket) {
            tracing::debug!(query, generation = ticket.generation, "Artist load superseded");
            return LoadOutcome::Superseded;
        }

        match result {
            Ok(profile) => {
                let fetches = self.spawn_fan_out(&profile);
                LoadOutcome::Resolved { profile, fetches }
            }
            Err(e) => {
                tracing::warn!(query, error = %e, "Artist lookup failed");
                LoadOutcome::Failed(e)
            }
        }
    }

    async fn resolve(&self, ticket: Ticket, query: &str) -> Result<ArtistProfile, PipelineError> {
        let body = self
            .transport
            .get(&Endpoint::Artist { name: query.to_string() })
            .await?;
        let profile = responses::parse_artist_search(&body)?.ok_or_else(|| PipelineError::NotFound {
            query: query.to_string(),
        })?;

        tracing::info!(artist = %profile.name, id = %profile.id, "Artist resolved");
        self.render_if_current(ticket, RenderedView::ArtistProfile(profile.clone()))
            .await;
        Ok(profile)
    }

    // Tickets are taken here, before spawning, so a later load always holds
    // newer ones no matter when these tasks first run.
    fn spawn_fan_out(&self, profile: &ArtistProfile) -> FanOut {
        let tracks = {
            let pipeline = self.clone();
            let ticket = self.generations.begin(Region::TrackList);
            let artist_id = profile.id.clone();
            tokio::spawn(async move {
                let result = pipeline.top_tracks_view(&artist_id).await;
                let _ = pipeline.finish(ticket, result).await;
            })
        };
        let albums = {
            let pipeline = self.clone();
            let ticket = self.generations.begin(Region::AlbumList);
            let artist_name = profile.name.clone();
            let artist_id = profile.id.clone();
            tokio::spawn(async move {
                let result = pipeline.album_list_view(&artist_name, &artist_id).await;
                let _ = pipeline.finish(ticket, result).await;
            })
        };
        let related = {
            let pipeline = self.clone();
            let ticket = self.generations.begin(Region::RelatedArtists);
            let artist_id = profile.id.clone();
            tokio::spawn(async move {
                let result = pipeline.related_artists_view(&artist_id).await;
                let _ = pipeline.finish(ticket, result).await;
            })
        };

        FanOut {
            handles: vec![tracks, albums, related],
        }
    }

    /// Top tracks, rendered under the "Popular" header
    pub async fn fetch_tracks(&self, artist_id: &str) -> Result<(), FetchError> {
        let ticket = self.generations.begin(Region::TrackList);
        let result = self.top_tracks_view(artist_id).await;
        self.finish(ticket, result).await
    }

    /// Album tiles and the padded cover-art background
    pub async fn fetch_albums(&self, artist_name: &str, artist_id: &str) -> Result<(), FetchError> {
        let ticket = self.generations.begin(Region::AlbumList);
        let result = self.album_list_view(artist_name, artist_id).await;
        self.finish(ticket, result).await
    }

    pub async fn fetch_album_tracks(&self, album_id: &str, album_name: &str) -> Result<(), FetchError> {
        let ticket = self.generations.begin(Region::TrackList);
        let result = self.album_tracks_view(album_id, album_name).await;
        self.finish(ticket, result).await
    }

    pub async fn fetch_related_artists(&self, artist_id: &str) -> Result<(), FetchError> {
        let ticket = self.generations.begin(Region::RelatedArtists);
        let result = self.related_artists_view(artist_id).await;
        self.finish(ticket, result).await
    }

    /// Click on an album cover: the placeholder reloads the top tracks,
    /// a real album loads its tracks under its readable name.
    pub async fn select_album(&self, selection: &AlbumSelection) -> Result<(), FetchError> {
        if selection.is_popular() {
            self.fetch_tracks(&selection.artist_id).await
        } else {
            let album_name = album_name::desanitize(&selection.sanitized_name);
            self.fetch_album_tracks(&selection.album_id, &album_name).await
        }
    }

    async fn top_tracks_view(&self, artist_id: &str) -> Result<RenderedView, FetchError> {
        let body = self
            .transport
            .get(&Endpoint::Tracks { artist_id: artist_id.to_string() })
            .await?;
        Ok(RenderedView::TrackList {
            album_name: POPULAR_HEADER.to_string(),
            tracks: responses::parse_top_tracks(&body)?,
        })
    }

    // Albums without a secondary image contribute neither a tile nor cover art.
    async fn album_list_view(&self, artist_name: &str, artist_id: &str) -> Result<RenderedView, FetchError> {
        let body = self
            .transport
            .get(&Endpoint::Albums { artist_name: artist_name.to_string() })
            .await?;
        let albums = responses::parse_albums(&body)?;
        let tiles: Vec<AlbumTile> = albums.iter().filter_map(AlbumTile::from_album).collect();
        let refs = tiles
            .iter()
            .map(|tile| Some(cover_art::css_url(&tile.image_url)))
            .collect();
        let cover_art = cover_art::pad_cover_art(refs);
        let background = cover_art::background_descriptor(&cover_art);
        tracing::debug!(albums = albums.len(), tiles = tiles.len(), "Albums mapped");

        Ok(RenderedView::AlbumList {
            artist_id: artist_id.to_string(),
            tiles,
            cover_art,
            background,
        })
    }

    async fn album_tracks_view(&self, album_id: &str, album_name: &str) -> Result<RenderedView, FetchError> {
        let body = self
            .transport
            .get(&Endpoint::AlbumTracks { album_id: album_id.to_string() })
            .await?;
        Ok(RenderedView::TrackList {
            album_name: album_name.to_string(),
            tracks: responses::parse_album_tracks(&body)?,
        })
    }

    async fn related_artists_view(&self, artist_id: &str) -> Result<RenderedView, FetchError> {
        let body = self
            .transport
            .get(&Endpoint::RelatedArtists { artist_id: artist_id.to_string() })
            .await?;
        Ok(RenderedView::RelatedArtists(responses::parse_related_artists(&body)?))
    }

    async fn finish(&self, ticket: Ticket, result: Result<RenderedView, FetchError>) -> Result<(), FetchError> {
        match result {
            Ok(view) => {
                self.render_if_current(ticket, view).await;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(template = ticket.region.template_name(), error = %e, "Sub-fetch failed");
                let message = format!("Could not load {}: {}", ticket.region.template_name(), e);
                self.render_if_current(ticket, RenderedView::FetchFailed { region: ticket.region, message })
                    .await;
                Err(e)
            }
        }
    }

    async fn render_if_current(&self, ticket: Ticket, view: RenderedView) -> bool {
        if !self.generations.is_current(ticket) {
            tracing::debug!(
                template = ticket.region.template_name(),
                generation = ticket.generation,
                "Discarding stale response"
            );
            return false;
        }
        self.renderer.render(view).await;
        true
    }
}

#[cfg(test)]
impl<R> ArtistPipeline<testing::FakeTransport, R> {
    pub(crate) fn transport(&self) -> &testing::FakeTransport {
        &self.transport
    }
}
