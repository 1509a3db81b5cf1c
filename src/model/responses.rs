//! Backend response bodies and their mapping into domain types
//!
//! The backend relays music-metadata search responses unchanged, so only the
//! handful of fields the page uses are modelled here.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::FetchError;
use super::content::{Album, ArtistProfile, RelatedArtist, Track};

#[derive(Deserialize)]
struct Image {
    url: String,
}

#[derive(Deserialize)]
struct Page<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
}

#[derive(Deserialize)]
struct ArtistObject {
    #[serde(default)]
    id: String,
    name: String,
    #[serde(default)]
    images: Vec<Image>,
}

#[derive(Deserialize)]
struct TrackObject {
    name: String,
    preview_url: Option<String>,
}

#[derive(Deserialize)]
struct AlbumObject {
    id: String,
    name: String,
    #[serde(default)]
    images: Vec<Image>,
}

#[derive(Deserialize)]
struct ArtistSearchResponse {
    artists: Page<ArtistObject>,
}

#[derive(Deserialize)]
struct TopTracksResponse {
    tracks: Vec<TrackObject>,
}

#[derive(Deserialize)]
struct AlbumSearchResponse {
    albums: Page<AlbumObject>,
}

#[derive(Deserialize)]
struct RelatedArtistsResponse {
    artists: Vec<ArtistObject>,
}

fn decode<T: DeserializeOwned>(endpoint: &'static str, body: &str) -> Result<T, FetchError> {
    serde_json::from_str(body).map_err(|source| FetchError::Decode { endpoint, source })
}

fn secondary_image(images: &[Image]) -> Option<String> {
    images.get(1).map(|image| image.url.clone())
}

impl From<TrackObject> for Track {
    fn from(track: TrackObject) -> Self {
        Self {
            name: track.name,
            preview_url: track.preview_url,
        }
    }
}

/// First search result as a profile, or `None` when nothing matched
pub fn parse_artist_search(body: &str) -> Result<Option<ArtistProfile>, FetchError> {
    let response: ArtistSearchResponse = decode("/artist", body)?;
    Ok(response.artists.items.into_iter().next().map(|artist| {
        let image_url = secondary_image(&artist.images)
            .or_else(|| artist.images.first().map(|image| image.url.clone()))
            .unwrap_or_default();
        ArtistProfile {
            name: artist.name,
            image_url,
            id: artist.id,
        }
    }))
}

pub fn parse_top_tracks(body: &str) -> Result<Vec<Track>, FetchError> {
    let response: TopTracksResponse = decode("/tracks", body)?;
    Ok(response.tracks.into_iter().map(Track::from).collect())
}

pub fn parse_album_tracks(body: &str) -> Result<Vec<Track>, FetchError> {
    let response: Page<TrackObject> = decode("/albumTracks", body)?;
    Ok(response.items.into_iter().map(Track::from).collect())
}

pub fn parse_albums(body: &str) -> Result<Vec<Album>, FetchError> {
    let response: AlbumSearchResponse = decode("/albums", body)?;
    Ok(response
        .albums
        .items
        .into_iter()
        .map(|album| Album {
            image_url: secondary_image(&album.images),
            id: album.id,
            name: album.name,
        })
        .collect())
}

pub fn parse_related_artists(body: &str) -> Result<Vec<RelatedArtist>, FetchError> {
    let response: RelatedArtistsResponse = decode("/relatedArtists", body)?;
    Ok(response
        .artists
        .into_iter()
        .map(|artist| RelatedArtist {
            image_url: secondary_image(&artist.images),
            name: artist.name,
        })
        .collect())
}
