//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input,
//! coordinates the artist pipeline with the model, and drives preview playback.
//! It is organized into submodules by responsibility:
//!
//! - `input`: Key event handling
//! - `navigation`: Artist search, related-artist and album selection
//! - `playback`: Transport controls
//! - `player_events`: Audio event listener

mod input;
mod navigation;
mod playback;
mod player_events;

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::FetchError;
use crate::model::{AppModel, Transport};
use crate::pipeline::ArtistPipeline;
use crate::playback::{AudioOutput, PlaybackSession};
use crate::render::ModelRenderer;

pub struct AppController<T, O: AudioOutput> {
    pub(crate) model: Arc<Mutex<AppModel>>,
    pub(crate) playback: Arc<Mutex<PlaybackSession<O>>>,
    pub(crate) pipeline: ArtistPipeline<T, ModelRenderer<O>>,
}

impl<T, O: AudioOutput> Clone for AppController<T, O> {
    fn clone(&self) -> Self {
        Self {
            model: self.model.clone(),
            playback: self.playback.clone(),
            pipeline: self.pipeline.clone(),
        }
    }
}

impl<T, O> AppController<T, O>
where
    T: Transport,
    O: AudioOutput + Send + 'static,
    O::Handle: Send,
{
    pub fn new(model: Arc<Mutex<AppModel>>, playback: Arc<Mutex<PlaybackSession<O>>>, transport: T) -> Self {
        let renderer = ModelRenderer::new(model.clone(), playback.clone());
        Self {
            model,
            playback,
            pipeline: ArtistPipeline::new(transport, renderer),
        }
    }

    pub(crate) fn format_error(error: &FetchError) -> String {
        match error {
            FetchError::Transport { .. } => {
                "Backend unreachable. Check that the server is running.".to_string()
            }
            FetchError::Status { status, .. } if *status >= 500 => {
                format!("Backend error ({}). Please try again.", status)
            }
            FetchError::Status { status: 429, .. } => "Rate limited. Please wait a moment.".to_string(),
            FetchError::Decode { .. } => "Unexpected response from the backend.".to_string(),
            _ => format!("Error: {}", error),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_helpers {
    use std::sync::Arc;
    use tokio::sync::Mutex;

    use super::AppController;
    use crate::model::{AppModel, Endpoint};
    use crate::pipeline::testing::FakeTransport;
    use crate::playback::testing::FakeOutput;
    use crate::playback::PlaybackSession;

    pub const KANYE_SEARCH: &str = r#"{"artists":{"items":[{"id":"kw","name":"Kanye West","images":[{"url":"kw0"},{"url":"kw1"}]}]}}"#;
    pub const JAY_SEARCH: &str = r#"{"artists":{"items":[{"id":"jz","name":"Jay-Z","images":[{"url":"j0"},{"url":"j1"}]}]}}"#;

    pub fn artist(name: &str) -> Endpoint {
        Endpoint::Artist { name: name.to_string() }
    }

    /// Backend with a full page for Kanye West and Jay-Z
    pub fn backend() -> FakeTransport {
        FakeTransport::default()
            .with(artist("Kanye West"), KANYE_SEARCH)
            .with(
                Endpoint::Tracks { artist_id: "kw".into() },
                r#"{"tracks":[{"name":"Stronger","preview_url":"p1"},{"name":"Power","preview_url":"p2"},{"name":"Runaway"}]}"#,
            )
            .with(
                Endpoint::Albums { artist_name: "Kanye West".into() },
                r#"{"albums":{"items":[{"id":"a1","name":"The College Dropout","images":[{"url":"cd0"},{"url":"cd1"}]}]}}"#,
            )
            .with(
                Endpoint::AlbumTracks { album_id: "a1".into() },
                r#"{"items":[{"name":"Intro","preview_url":"i1"},{"name":"We Don't Care","preview_url":"i2"}]}"#,
            )
            .with(
                Endpoint::RelatedArtists { artist_id: "kw".into() },
                r#"{"artists":[{"name":"Jay-Z","images":[{"url":"j0"},{"url":"j1"}]}]}"#,
            )
            .with(artist("Jay-Z"), JAY_SEARCH)
            .with(Endpoint::Tracks { artist_id: "jz".into() }, r#"{"tracks":[{"name":"99 Problems","preview_url":"n"}]}"#)
            .with(Endpoint::Albums { artist_name: "Jay-Z".into() }, r#"{"albums":{"items":[]}}"#)
            .with(Endpoint::RelatedArtists { artist_id: "jz".into() }, r#"{"artists":[]}"#)
    }

    pub fn controller(transport: FakeTransport) -> AppController<FakeTransport, FakeOutput> {
        let model = Arc::new(Mutex::new(AppModel::new()));
        let playback = Arc::new(Mutex::new(PlaybackSession::new(FakeOutput::default())));
        AppController::new(model, playback, transport)
    }

    impl AppController<FakeTransport, FakeOutput> {
        pub fn pipeline_requests(&self) -> Vec<Endpoint> {
            self.pipeline.transport().requested()
        }
    }

    /// Load an artist and wait for every sub-fetch to land
    pub async fn loaded(name: &str) -> AppController<FakeTransport, FakeOutput> {
        let controller = controller(backend());
        if let Some(fetches) = controller.load_artist(name).await {
            fetches.join().await;
        }
        controller
    }
}
