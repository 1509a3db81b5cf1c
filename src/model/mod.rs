//! Model module - Application state and data types
//!
//! - `types`: UI state and small enums
//! - `content`: artist profile data and the rendered page
//! - `responses`: backend response bodies and their mapping
//! - `cover_art`: album-art background padding
//! - `album_name`: album name sanitizing for selection data
//! - `backend_client`: HTTP transport to the backend
//! - `app_model`: main application model with state management methods

mod types;
mod content;
mod app_model;
pub mod responses;
pub mod cover_art;
pub mod album_name;
pub mod backend_client;

pub use types::{ActiveSection, UiState, Validation};

pub use content::{
    Album, AlbumSelection, AlbumTile, ArtistProfile, PageState, RelatedArtist, Track,
    POPULAR_HEADER,
};

pub use backend_client::{BackendClient, Endpoint, Transport};

pub use app_model::AppModel;
