//! In-memory audio output for exercising the session

use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};

use super::{AudioHandle, AudioOutput, HandleId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputCall {
    Open(HandleId, String),
    Play(HandleId),
    Pause(HandleId),
    Stop(HandleId),
}

/// Records every call made through it and its handles
#[derive(Default)]
pub struct FakeOutput {
    pub calls: Vec<OutputCall>,
    log: Arc<Mutex<Vec<OutputCall>>>,
    pub fail_urls: Vec<String>,
}

impl FakeOutput {
    fn sync(&mut self) {
        let mut log = self.log.lock().unwrap();
        self.calls.append(&mut log);
    }

    pub fn open_urls(&mut self) -> Vec<String> {
        self.sync();
        self.calls
            .iter()
            .filter_map(|c| match c {
                OutputCall::Open(_, url) => Some(url.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn calls_for(&mut self, id: HandleId) -> Vec<OutputCall> {
        self.sync();
        self.calls
            .iter()
            .filter(|c| matches!(c, OutputCall::Play(h) | OutputCall::Pause(h) | OutputCall::Stop(h) if *h == id))
            .cloned()
            .collect()
    }

    /// Handles opened and not yet stopped
    pub fn live_handles(&mut self) -> usize {
        self.sync();
        let opened = self.calls.iter().filter(|c| matches!(c, OutputCall::Open(..))).count();
        let stopped = self.calls.iter().filter(|c| matches!(c, OutputCall::Stop(_))).count();
        opened - stopped
    }
}

pub struct FakeHandle {
    id: HandleId,
    log: Arc<Mutex<Vec<OutputCall>>>,
}

impl AudioHandle for FakeHandle {
    fn play(&mut self) {
        self.log.lock().unwrap().push(OutputCall::Play(self.id));
    }

    fn pause(&mut self) {
        self.log.lock().unwrap().push(OutputCall::Pause(self.id));
    }

    fn stop(&mut self) {
        self.log.lock().unwrap().push(OutputCall::Stop(self.id));
    }
}

impl AudioOutput for FakeOutput {
    type Handle = FakeHandle;

    fn open(&mut self, id: HandleId, url: &str) -> Result<FakeHandle> {
        if self.fail_urls.iter().any(|u| u == url) {
            return Err(anyhow!("cannot open {}", url));
        }
        self.sync();
        self.calls.push(OutputCall::Open(id, url.to_string()));
        Ok(FakeHandle { id, log: self.log.clone() })
    }
}
