//! Scripted in-memory transport for tests.

use std::cell::RefCell;
use std::collections::VecDeque;

use futures::channel::oneshot;
use serde_json::Value;

use super::api::{ApiRequest, ApiResponse, Transport};
use crate::error::ClientError;

struct Reply {
    result: Result<ApiResponse, ClientError>,
    gate: Option<oneshot::Receiver<()>>,
}

/// Replays queued replies in order and records every request it receives.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    replies: RefCell<VecDeque<Reply>>,
    requests: RefCell<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn reply(&self, status: u16, body: Value) -> &Self {
        self.push(Ok(ApiResponse { status, body: Some(body) }), None);
        self
    }

    pub(crate) fn reply_empty(&self, status: u16) -> &Self {
        self.push(Ok(ApiResponse { status, body: None }), None);
        self
    }

    pub(crate) fn fail(&self, message: &str) -> &Self {
        self.push(Err(ClientError::Network(message.to_owned())), None);
        self
    }

    /// Queue a reply that is held back until the returned sender fires.
    pub(crate) fn reply_gated(&self, status: u16, body: Value) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.push(Ok(ApiResponse { status, body: Some(body) }), Some(rx));
        tx
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    pub(crate) fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    fn push(&self, result: Result<ApiResponse, ClientError>, gate: Option<oneshot::Receiver<()>>) {
        self.replies.borrow_mut().push_back(Reply { result, gate });
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        self.requests.borrow_mut().push(request);
        let reply = self.replies.borrow_mut().pop_front();
        let Some(reply) = reply else {
            return Err(ClientError::Network("no scripted reply".to_owned()));
        };
        if let Some(gate) = reply.gate {
            let _ = gate.await;
        }
        reply.result
    }
}
