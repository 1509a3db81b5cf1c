//! Fakes for driving the pipeline without a network or a page

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use tokio::sync::Notify;

use crate::error::FetchError;
use crate::model::{Endpoint, Transport};
use crate::render::{Region, RenderedView, Renderer};

/// Canned response for one endpoint
pub enum Reply {
    Body(String),
    Status(u16),
    /// Respond only after the given delay
    Delayed(Duration, String),
}

#[derive(Default)]
pub struct FakeTransport {
    replies: Mutex<HashMap<Endpoint, Reply>>,
    pub requests: Mutex<Vec<Endpoint>>,
}

impl FakeTransport {
    pub fn with(self, endpoint: Endpoint, body: &str) -> Self {
        self.reply(endpoint, Reply::Body(body.to_string()))
    }

    pub fn reply(self, endpoint: Endpoint, reply: Reply) -> Self {
        self.replies.lock().unwrap().insert(endpoint, reply);
        self
    }

    pub fn requested(&self) -> Vec<Endpoint> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for FakeTransport {
    async fn get(&self, endpoint: &Endpoint) -> Result<String, FetchError> {
        self.requests.lock().unwrap().push(endpoint.clone());
        let reply = {
            let replies = self.replies.lock().unwrap();
            match replies.get(endpoint) {
                Some(Reply::Body(body)) => Ok((None, body.clone())),
                Some(Reply::Delayed(delay, body)) => Ok((Some(*delay), body.clone())),
                Some(Reply::Status(status)) => Err(*status),
                None => Err(404),
            }
        };
        match reply {
            Ok((delay, body)) => {
                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }
                Ok(body)
            }
            Err(status) => Err(FetchError::Status { endpoint: endpoint.path(), status }),
        }
    }
}

/// Keeps every rendered view in order
#[derive(Default)]
pub struct RecordingRenderer {
    views: Mutex<Vec<RenderedView>>,
    rendered: Notify,
}

impl RecordingRenderer {
    pub fn views(&self) -> Vec<RenderedView> {
        self.views.lock().unwrap().clone()
    }

    pub fn in_region(&self, region: Region) -> Vec<RenderedView> {
        self.views().into_iter().filter(|v| v.region() == region).collect()
    }

    /// Wait until at least `count` views have been rendered
    pub async fn wait_for(&self, count: usize) {
        let wait = async {
            loop {
                let notified = self.rendered.notified();
                if self.views.lock().unwrap().len() >= count {
                    return;
                }
                notified.await;
            }
        };
        tokio::time::timeout(Duration::from_secs(5), wait)
            .await
            .expect("timed out waiting for renders");
    }
}

impl Renderer for RecordingRenderer {
    async fn render(&self, view: RenderedView) {
        self.views.lock().unwrap().push(view);
        self.rendered.notify_waiters();
    }
}
