//! Listener for events reported by the audio thread

use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinHandle;

use crate::model::Transport;
use crate::playback::{AudioEvent, AudioEventKind, AudioOutput};
use super::AppController;

impl<T, O> AppController<T, O>
where
    T: Transport,
    O: AudioOutput + Send + 'static,
    O::Handle: Send,
{
    pub fn start_audio_event_listener(&self, mut events: UnboundedReceiver<AudioEvent>) -> JoinHandle<()> {
        let model = self.model.clone();
        let playback = self.playback.clone();
        tracing::info!("Starting audio event listener");

        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                if model.lock().await.should_quit().await {
                    tracing::debug!("Audio event listener shutting down");
                    break;
                }

                tracing::trace!(handle = event.handle, kind = ?event.kind, "AudioEvent");
                let failed_track = {
                    let mut session = playback.lock().await;
                    let failed = event.kind == AudioEventKind::Failed && session.active_handle() == Some(event.handle);
                    let title = failed.then(|| session.snapshot().now_playing).flatten();
                    session.handle_event(event);
                    title
                };

                if let Some(track) = failed_track {
                    model
                        .lock()
                        .await
                        .set_error(format!("Preview unavailable for \"{}\"", track))
                        .await;
                }
            }
        })
    }
}
