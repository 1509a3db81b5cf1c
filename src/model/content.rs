//! Artist profile data and the rendered page state

use super::album_name;

/// Album id carried by the "Popular" placeholder tile.
pub const POPULAR_ALBUM_ID: &str = "popularSongs";
/// Track-list header used for an artist's top tracks.
pub const POPULAR_HEADER: &str = "Popular";

/// A resolved artist, taken from the first search result
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArtistProfile {
    pub name: String,
    pub image_url: String,
    pub id: String,
}

/// A playable track; tracks without a preview still render
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Track {
    pub name: String,
    pub preview_url: Option<String>,
}

/// An album as returned by the backend.
///
/// `image_url` is the secondary-resolution image; albums without one are
/// left out of both the album tiles and the cover art.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Album {
    pub image_url: Option<String>,
    pub id: String,
    pub name: String,
}

/// A renderable album tile
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlbumTile {
    pub image_url: String,
    pub id: String,
    /// Name with whitespace replaced by the sentinel token
    pub sanitized_name: String,
}

impl AlbumTile {
    pub fn from_album(album: &Album) -> Option<Self> {
        let image_url = album.image_url.clone()?;
        Some(Self {
            image_url,
            id: album.id.clone(),
            sanitized_name: album_name::sanitize(&album.name),
        })
    }

    pub fn display_name(&self) -> String {
        album_name::desanitize(&self.sanitized_name)
    }
}

/// Summary shape of a related artist
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelatedArtist {
    pub name: String,
    pub image_url: Option<String>,
}

/// Data carried by a click on an album cover
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlbumSelection {
    pub album_id: String,
    pub sanitized_name: String,
    pub artist_id: String,
}

impl AlbumSelection {
    pub fn popular(artist_id: &str) -> Self {
        Self {
            album_id: POPULAR_ALBUM_ID.to_string(),
            sanitized_name: POPULAR_HEADER.to_string(),
            artist_id: artist_id.to_string(),
        }
    }

    pub fn for_tile(tile: &AlbumTile, artist_id: &str) -> Self {
        Self {
            album_id: tile.id.clone(),
            sanitized_name: tile.sanitized_name.clone(),
            artist_id: artist_id.to_string(),
        }
    }

    /// Whether this is the top-tracks placeholder rather than a real album
    pub fn is_popular(&self) -> bool {
        self.album_id == POPULAR_ALBUM_ID
    }
}

/// Everything the renderer has placed on the page so far
#[derive(Clone, Debug, Default)]
pub struct PageState {
    pub profile: Option<ArtistProfile>,
    pub related_artists: Vec<RelatedArtist>,
    pub album_artist_id: String,
    pub album_tiles: Vec<AlbumTile>,
    /// Index into the album list where 0 is the "Popular" placeholder
    pub active_album: usize,
    pub cover_art: Vec<Option<String>>,
    /// Cover-art descriptor, drawn as the profile backdrop
    pub background: String,
    pub track_list_title: String,
}

impl PageState {
    /// The page stays hidden until a profile has been rendered
    pub fn is_revealed(&self) -> bool {
        self.profile.is_some()
    }

    /// Number of selectable rows in the album list, placeholder included
    pub fn album_row_count(&self) -> usize {
        if self.album_artist_id.is_empty() {
            0
        } else {
            self.album_tiles.len() + 1
        }
    }

    /// Selection for the album row at `index`, where row 0 is "Popular"
    pub fn album_selection(&self, index: usize) -> Option<AlbumSelection> {
        if self.album_artist_id.is_empty() {
            return None;
        }
        match index {
            0 => Some(AlbumSelection::popular(&self.album_artist_id)),
            i => self
                .album_tiles
                .get(i - 1)
                .map(|tile| AlbumSelection::for_tile(tile, &self.album_artist_id)),
        }
    }
}
