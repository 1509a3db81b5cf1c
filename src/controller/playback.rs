//! Transport controls for preview playback

use crate::model::Transport;
use crate::playback::{AudioOutput, Direction, PlaybackSnapshot};
use super::AppController;

impl<T, O> AppController<T, O>
where
    T: Transport,
    O: AudioOutput + Send + 'static,
    O::Handle: Send,
{
    /// Click on a track entry
    pub async fn play_track(&self, index: usize) {
        self.playback.lock().await.select_entry(index);
    }

    pub async fn toggle_playback(&self) {
        self.playback.lock().await.toggle();
    }

    pub async fn next_track(&self) {
        self.playback.lock().await.step(Direction::Forward);
    }

    pub async fn previous_track(&self) {
        self.playback.lock().await.step(Direction::Backward);
    }

    pub async fn playback_snapshot(&self) -> PlaybackSnapshot {
        self.playback.lock().await.snapshot()
    }
}
