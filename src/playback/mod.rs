//! Preview playback session
//!
//! A single session owns at most one live [`AudioHandle`], bound to one entry
//! of the rendered track list. Entry state is the source of truth for the
//! "playing"/"paused" markers; the view derives its styling from it.
//!
//! Audio backends report asynchronous changes through [`AudioEvent`]s tagged
//! with the handle they came from. Events from a handle that has already been
//! released are ignored.

#[cfg(test)]
pub(crate) mod testing;

use anyhow::Result;

use crate::model::Track;

pub type HandleId = u64;

/// Marker state of one rendered track entry
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EntryState {
    #[default]
    Idle,
    Playing,
    Paused,
    /// The entry has no playable preview
    Invalid,
}

/// One position in the rendered track list
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub preview_url: Option<String>,
    pub state: EntryState,
}

impl From<Track> for Entry {
    fn from(track: Track) -> Self {
        Self {
            name: track.name,
            preview_url: track.preview_url,
            state: EntryState::Idle,
        }
    }
}

/// Shared play/pause indicator on the transport bar
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransportIcon {
    /// Nothing is producing audio; pressing the control plays
    #[default]
    Play,
    /// Audio is playing; pressing the control pauses
    Pause,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioEventKind {
    /// The handle started or resumed producing audio. Backends confirm
    /// every `play` with this and may also send it unprompted.
    Playing,
    /// The handle was suspended, by `pause` or by the backend itself
    Paused,
    /// The preview played to its natural end
    Ended,
    /// The preview could not be fetched or decoded
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AudioEvent {
    pub handle: HandleId,
    pub kind: AudioEventKind,
}

/// A live audio resource bound to one preview url
pub trait AudioHandle {
    fn play(&mut self);
    fn pause(&mut self);
    /// Stop and release the underlying resource
    fn stop(&mut self);
}

/// Factory for audio handles
pub trait AudioOutput {
    type Handle: AudioHandle;

    fn open(&mut self, id: HandleId, url: &str) -> Result<Self::Handle>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

struct ActiveAudio<H> {
    id: HandleId,
    handle: H,
    /// `None` once the track list it was started from has been replaced
    entry: Option<usize>,
    title: String,
    playing: bool,
}

/// What the transport bar needs to draw
#[derive(Clone, Debug, Default)]
pub struct PlaybackSnapshot {
    pub entries: Vec<Entry>,
    pub icon: TransportIcon,
    pub now_playing: Option<String>,
    pub is_playing: bool,
}

pub struct PlaybackSession<O: AudioOutput> {
    output: O,
    entries: Vec<Entry>,
    active: Option<ActiveAudio<O::Handle>>,
    next_handle_id: HandleId,
    icon: TransportIcon,
}

impl<O: AudioOutput> PlaybackSession<O> {
    pub fn new(output: O) -> Self {
        Self {
            output,
            entries: Vec::new(),
            active: None,
            next_handle_id: 1,
            icon: TransportIcon::Play,
        }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn icon(&self) -> TransportIcon {
        self.icon
    }

    pub fn is_idle(&self) -> bool {
        self.active.is_none()
    }

    pub fn is_playing(&self) -> bool {
        self.active.as_ref().is_some_and(|a| a.playing)
    }

    pub fn active_handle(&self) -> Option<HandleId> {
        self.active.as_ref().map(|a| a.id)
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            entries: self.entries.clone(),
            icon: self.icon,
            now_playing: self.active.as_ref().map(|a| a.title.clone()),
            is_playing: self.is_playing(),
        }
    }

    /// Install a freshly rendered track list.
    ///
    /// A handle started from the previous list keeps playing but no longer
    /// belongs to any entry.
    pub fn replace_entries(&mut self, entries: Vec<Entry>) {
        if let Some(active) = self.active.as_mut() {
            active.entry = None;
        }
        tracing::debug!(count = entries.len(), "Track list replaced");
        self.entries = entries;
    }

    /// Entry carrying the Playing or Paused marker
    pub fn marked_entry(&self) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| matches!(e.state, EntryState::Playing | EntryState::Paused))
    }

    /// Click on a track entry
    pub fn select_entry(&mut self, index: usize) {
        let Some(entry) = self.entries.get(index) else {
            tracing::debug!(index, "No entry to select");
            return;
        };

        if entry.state == EntryState::Playing {
            self.suspend();
            return;
        }

        let preview_url = entry.preview_url.clone();
        let title = entry.name.clone();
        self.release_active();

        let Some(url) = preview_url else {
            tracing::warn!(track = %title, "Track has no preview");
            self.entries[index].state = EntryState::Invalid;
            return;
        };

        let id = self.next_handle_id;
        self.next_handle_id += 1;

        match self.output.open(id, &url) {
            Ok(mut handle) => {
                handle.play();
                self.active = Some(ActiveAudio {
                    id,
                    handle,
                    entry: Some(index),
                    title: title.clone(),
                    playing: false,
                });
                tracing::info!(track = %title, handle = id, "Preview started");
                self.on_play();
            }
            Err(e) => {
                tracing::error!(track = %title, error = %e, "Could not open preview");
                self.entries[index].state = EntryState::Invalid;
            }
        }
    }

    /// Play/pause control
    pub fn toggle(&mut self) {
        if self.is_playing() {
            self.suspend();
            return;
        }

        match self.marked_entry() {
            None => {
                if self.entries.is_empty() {
                    tracing::debug!("Nothing to play");
                } else {
                    self.select_entry(0);
                }
            }
            Some(index) => {
                let owns_marked = self.active.as_ref().is_some_and(|a| a.entry == Some(index));
                if owns_marked {
                    self.resume();
                } else {
                    self.select_entry(index);
                }
            }
        }
    }

    /// Step-forward / step-backward controls
    pub fn step(&mut self, direction: Direction) {
        let Some(current) = self.marked_entry() else {
            tracing::debug!(?direction, "No current entry to step from");
            return;
        };
        let target = match direction {
            Direction::Forward => Some(current + 1).filter(|&i| i < self.entries.len()),
            Direction::Backward => current.checked_sub(1),
        };
        match target {
            Some(target) => self.select_entry(target),
            None => tracing::debug!(?direction, current, "No adjacent entry"),
        }
    }

    /// Apply an event reported by the audio backend
    pub fn handle_event(&mut self, event: AudioEvent) {
        if self.active_handle() != Some(event.handle) {
            tracing::trace!(handle = event.handle, kind = ?event.kind, "Ignoring event from released handle");
            return;
        }
        match event.kind {
            AudioEventKind::Playing => self.on_play(),
            AudioEventKind::Paused => self.on_pause(),
            AudioEventKind::Ended => self.advance(),
            AudioEventKind::Failed => {
                if let Some(mut active) = self.active.take() {
                    active.handle.stop();
                    if let Some(index) = active.entry {
                        self.entries[index].state = EntryState::Invalid;
                    }
                    tracing::warn!(track = %active.title, "Preview failed to play");
                }
                self.icon = TransportIcon::Play;
            }
        }
    }

    fn suspend(&mut self) {
        if let Some(active) = self.active.as_mut() {
            active.handle.pause();
        }
        self.on_pause();
    }

    fn resume(&mut self) {
        if let Some(active) = self.active.as_mut() {
            active.handle.play();
        }
        self.on_play();
    }

    /// Stop and drop the current handle; a playing entry is left paused
    fn release_active(&mut self) {
        if let Some(mut active) = self.active.take() {
            if active.playing {
                active.handle.pause();
                if let Some(index) = active.entry {
                    self.entries[index].state = EntryState::Paused;
                }
            }
            active.handle.stop();
            self.icon = TransportIcon::Play;
            tracing::debug!(handle = active.id, "Released audio handle");
        }
    }

    fn on_play(&mut self) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        active.playing = true;
        let owner = active.entry;
        for (i, entry) in self.entries.iter_mut().enumerate() {
            if Some(i) == owner {
                entry.state = EntryState::Playing;
            } else if matches!(entry.state, EntryState::Playing | EntryState::Paused) {
                entry.state = EntryState::Idle;
            }
        }
        self.icon = TransportIcon::Pause;
    }

    fn on_pause(&mut self) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        active.playing = false;
        if let Some(index) = active.entry {
            self.entries[index].state = EntryState::Paused;
        }
        self.icon = TransportIcon::Play;
    }

    /// Natural completion: move on to the next entry, if any
    fn advance(&mut self) {
        let Some(mut finished) = self.active.take() else {
            return;
        };
        finished.handle.stop();
        self.icon = TransportIcon::Play;

        let Some(index) = finished.entry else {
            tracing::debug!(track = %finished.title, "Detached preview ended");
            return;
        };
        self.entries[index].state = EntryState::Idle;

        if index + 1 < self.entries.len() {
            self.select_entry(index + 1);
        } else {
            tracing::debug!("Reached end of track list");
        }
    }
}
