//! rodio-backed preview output
//!
//! rodio's output stream cannot leave the thread that created it, so all
//! sinks live on a dedicated audio thread. Handles talk to it over a command
//! channel; natural completion and failures come back as [`AudioEvent`]s.

use std::collections::VecDeque;
use std::io::Cursor;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use tokio::sync::mpsc::UnboundedSender;

use crate::playback::{AudioEvent, AudioEventKind, AudioHandle, AudioOutput, HandleId};

const POLL_INTERVAL: Duration = Duration::from_millis(100);
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, PartialEq)]
enum AudioCommand {
    Open { id: HandleId, url: String },
    Play(HandleId),
    Pause(HandleId),
    Stop(HandleId),
}

pub struct RodioOutput {
    commands: Sender<AudioCommand>,
}

impl RodioOutput {
    /// Start the audio thread on the default output device.
    ///
    /// Blocks until the device has been opened.
    pub fn spawn(events: UnboundedSender<AudioEvent>) -> Result<Self> {
        let (commands, receiver) = mpsc::channel();
        let (ready_tx, ready_rx) = mpsc::sync_channel::<Result<()>>(1);

        thread::Builder::new()
            .name("audio".to_string())
            .spawn(move || {
                let (_stream, stream_handle) = match OutputStream::try_default() {
                    Ok(pair) => {
                        let _ = ready_tx.send(Ok(()));
                        pair
                    }
                    Err(e) => {
                        let _ = ready_tx.send(Err(anyhow!("no audio output device: {}", e)));
                        return;
                    }
                };

                let http = match reqwest::blocking::Client::builder().timeout(DOWNLOAD_TIMEOUT).build() {
                    Ok(http) => http,
                    Err(e) => {
                        tracing::error!(error = %e, "Could not build preview download client");
                        return;
                    }
                };

                AudioThread {
                    stream_handle,
                    http,
                    events,
                    current: None,
                }
                .run(CommandQueue::new(receiver));
            })
            .context("failed to start audio thread")?;

        ready_rx
            .recv()
            .map_err(|_| anyhow!("audio thread exited during startup"))??;

        tracing::info!("Audio output ready");
        Ok(Self { commands })
    }
}

impl AudioOutput for RodioOutput {
    type Handle = RodioHandle;

    fn open(&mut self, id: HandleId, url: &str) -> Result<RodioHandle> {
        self.commands
            .send(AudioCommand::Open { id, url: url.to_string() })
            .map_err(|_| anyhow!("audio thread is not running"))?;
        Ok(RodioHandle {
            id,
            commands: self.commands.clone(),
        })
    }
}

pub struct RodioHandle {
    id: HandleId,
    commands: Sender<AudioCommand>,
}

impl RodioHandle {
    fn send(&self, command: AudioCommand) {
        if self.commands.send(command).is_err() {
            tracing::warn!(handle = self.id, "Audio thread is gone, command dropped");
        }
    }
}

impl AudioHandle for RodioHandle {
    fn play(&mut self) {
        self.send(AudioCommand::Play(self.id));
    }

    fn pause(&mut self) {
        self.send(AudioCommand::Pause(self.id));
    }

    fn stop(&mut self) {
        self.send(AudioCommand::Stop(self.id));
    }
}

/// Command receiver with a look-ahead buffer
struct CommandQueue {
    receiver: Receiver<AudioCommand>,
    pending: VecDeque<AudioCommand>,
}

impl CommandQueue {
    fn new(receiver: Receiver<AudioCommand>) -> Self {
        Self {
            receiver,
            pending: VecDeque::new(),
        }
    }

    fn next(&mut self, timeout: Duration) -> Result<AudioCommand, RecvTimeoutError> {
        match self.pending.pop_front() {
            Some(command) => Ok(command),
            None => self.receiver.recv_timeout(timeout),
        }
    }

    /// Whether an already queued command stops handle `id` or opens another one.
    ///
    /// Pulls everything currently sent into the look-ahead buffer first.
    fn supersedes(&mut self, id: HandleId) -> bool {
        while let Ok(command) = self.receiver.try_recv() {
            self.pending.push_back(command);
        }
        self.pending.iter().any(|command| match command {
            AudioCommand::Stop(stopped) => *stopped == id,
            AudioCommand::Open { .. } => true,
            AudioCommand::Play(_) | AudioCommand::Pause(_) => false,
        })
    }
}

struct AudioThread {
    stream_handle: OutputStreamHandle,
    http: reqwest::blocking::Client,
    events: UnboundedSender<AudioEvent>,
    current: Option<(HandleId, Sink)>,
}

impl AudioThread {
    fn run(mut self, mut commands: CommandQueue) {
        loop {
            match commands.next(POLL_INTERVAL) {
                Ok(command) => self.apply(command, &mut commands),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
            self.check_finished();
        }
        tracing::debug!("Audio thread shutting down");
    }

    fn apply(&mut self, command: AudioCommand, queue: &mut CommandQueue) {
        match command {
            AudioCommand::Open { id, url } => {
                self.stop_current();
                // Downloads block the loop; skip ones nobody will hear
                if queue.supersedes(id) {
                    tracing::debug!(handle = id, "Skipping superseded preview");
                    return;
                }
                match self.load(&url) {
                    Ok(sink) => {
                        tracing::debug!(handle = id, "Preview loaded");
                        self.current = Some((id, sink));
                    }
                    Err(e) => {
                        tracing::warn!(handle = id, url = %url, error = %e, "Preview failed to load");
                        self.emit(id, AudioEventKind::Failed);
                    }
                }
            }
            AudioCommand::Play(id) => {
                if let Some(sink) = self.sink_for(id) {
                    sink.play();
                    self.emit(id, AudioEventKind::Playing);
                }
            }
            AudioCommand::Pause(id) => {
                if let Some(sink) = self.sink_for(id) {
                    sink.pause();
                    self.emit(id, AudioEventKind::Paused);
                }
            }
            AudioCommand::Stop(id) => {
                if self.sink_for(id).is_some() {
                    self.stop_current();
                }
            }
        }
    }

    fn load(&self, url: &str) -> Result<Sink> {
        let bytes = self.http.get(url).send()?.error_for_status()?.bytes()?;
        let source = Decoder::new(Cursor::new(bytes.to_vec()))?;
        let sink = Sink::try_new(&self.stream_handle)?;
        sink.pause();
        sink.append(source);
        Ok(sink)
    }

    fn sink_for(&self, id: HandleId) -> Option<&Sink> {
        match &self.current {
            Some((current, sink)) if *current == id => Some(sink),
            _ => None,
        }
    }

    fn stop_current(&mut self) {
        if let Some((_, sink)) = self.current.take() {
            sink.stop();
        }
    }

    fn check_finished(&mut self) {
        let finished = match &self.current {
            Some((id, sink)) if !sink.is_paused() && sink.empty() => Some(*id),
            _ => None,
        };
        if let Some(id) = finished {
            self.current = None;
            self.emit(id, AudioEventKind::Ended);
        }
    }

    fn emit(&self, handle: HandleId, kind: AudioEventKind) {
        if self.events.send(AudioEvent { handle, kind }).is_err() {
            tracing::debug!(handle, "No listener for audio events");
        }
    }
}
