//! Rendering seam between the pipeline and the page

use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::model::{AlbumTile, AppModel, ArtistProfile, RelatedArtist, Track};
use crate::playback::{AudioOutput, Entry, PlaybackSession};

/// Placeholder region of the page a view is rendered into
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    ArtistProfile,
    TrackList,
    AlbumList,
    RelatedArtists,
}

impl Region {
    pub const ALL: [Region; 4] = [
        Region::ArtistProfile,
        Region::TrackList,
        Region::AlbumList,
        Region::RelatedArtists,
    ];

    pub fn template_name(self) -> &'static str {
        match self {
            Region::ArtistProfile => "artist-profile",
            Region::TrackList => "track-list",
            Region::AlbumList => "album-list",
            Region::RelatedArtists => "related-artists",
        }
    }

    pub(crate) fn slot(self) -> usize {
        match self {
            Region::ArtistProfile => 0,
            Region::TrackList => 1,
            Region::AlbumList => 2,
            Region::RelatedArtists => 3,
        }
    }
}

/// Mapped data ready to be placed on the page
#[derive(Clone, Debug, PartialEq)]
pub enum RenderedView {
    ArtistProfile(ArtistProfile),
    TrackList {
        album_name: String,
        tracks: Vec<Track>,
    },
    AlbumList {
        artist_id: String,
        tiles: Vec<AlbumTile>,
        cover_art: Vec<Option<String>>,
        background: String,
    },
    RelatedArtists(Vec<RelatedArtist>),
    FetchFailed {
        region: Region,
        message: String,
    },
}

impl RenderedView {
    pub fn region(&self) -> Region {
        match self {
            RenderedView::ArtistProfile(_) => Region::ArtistProfile,
            RenderedView::TrackList { .. } => Region::TrackList,
            RenderedView::AlbumList { .. } => Region::AlbumList,
            RenderedView::RelatedArtists(_) => Region::RelatedArtists,
            RenderedView::FetchFailed { region, .. } => *region,
        }
    }
}

pub trait Renderer: Send + Sync + 'static {
    fn render(&self, view: RenderedView) -> impl Future<Output = ()> + Send;
}

/// Renders into the application model drawn by the terminal view.
///
/// A rendered track list also becomes the playback session's entry list.
pub struct ModelRenderer<O: AudioOutput> {
    model: Arc<Mutex<AppModel>>,
    playback: Arc<Mutex<PlaybackSession<O>>>,
}

impl<O: AudioOutput> ModelRenderer<O> {
    pub fn new(model: Arc<Mutex<AppModel>>, playback: Arc<Mutex<PlaybackSession<O>>>) -> Self {
        Self { model, playback }
    }
}

impl<O> Renderer for ModelRenderer<O>
where
    O: AudioOutput + Send + 'static,
    O::Handle: Send,
{
    async fn render(&self, view: RenderedView) {
        let region = view.region();
        tracing::debug!(template = region.template_name(), "Rendering");

        match view {
            RenderedView::ArtistProfile(profile) => {
                self.model.lock().await.set_profile(profile).await;
            }
            RenderedView::TrackList { album_name, tracks } => {
                let entries = tracks.into_iter().map(Entry::from).collect();
                self.playback.lock().await.replace_entries(entries);
                self.model.lock().await.set_track_list_title(album_name).await;
            }
            RenderedView::AlbumList { artist_id, tiles, cover_art, background } => {
                self.model
                    .lock()
                    .await
                    .set_album_list(artist_id, tiles, cover_art, background)
                    .await;
            }
            RenderedView::RelatedArtists(artists) => {
                self.model.lock().await.set_related_artists(artists).await;
            }
            RenderedView::FetchFailed { message, .. } => {
                self.model.lock().await.set_error(message).await;
            }
        }
    }
}
