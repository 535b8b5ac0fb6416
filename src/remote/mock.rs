//! Recording gateway for tests.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{Gateway, Method, RequestBody};
use crate::error::{Result, ServiceError};

/// A request seen by the mock.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: Method,
    pub endpoint: String,
    pub body: Option<serde_json::Value>,
}

enum Reply {
    Body(Vec<u8>),
    Status(u16),
}

/// Gateway answering from canned routes and recording every call.
///
/// Unrouted requests fail with 404.
#[derive(Default)]
pub struct MockGateway {
    routes: Mutex<HashMap<(Method, String), Reply>>,
    calls: Mutex<Vec<RecordedCall>>,
    latency: Option<Duration>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every reply, so concurrent callers overlap.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn respond(&self, method: Method, endpoint: &str, body: serde_json::Value) -> &Self {
        let bytes = serde_json::to_vec(&body).expect("serializable test body");
        self.routes
            .lock()
            .insert((method, endpoint.to_string()), Reply::Body(bytes));
        self
    }

    pub fn respond_raw(&self, method: Method, endpoint: &str, body: &[u8]) -> &Self {
        self.routes
            .lock()
            .insert((method, endpoint.to_string()), Reply::Body(body.to_vec()));
        self
    }

    pub fn fail(&self, method: Method, endpoint: &str, status: u16) -> &Self {
        self.routes
            .lock()
            .insert((method, endpoint.to_string()), Reply::Status(status));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl Gateway for MockGateway {
    async fn call(&self, endpoint: &str, method: Method, body: Option<RequestBody>) -> Result<Vec<u8>> {
        let body = match body {
            Some(body) => Some(
                serde_json::from_slice(&body.into_bytes()?).map_err(ServiceError::Encode)?,
            ),
            None => None,
        };
        self.calls.lock().push(RecordedCall {
            method,
            endpoint: endpoint.to_string(),
            body,
        });

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        match self.routes.lock().get(&(method, endpoint.to_string())) {
            Some(Reply::Body(bytes)) => Ok(bytes.clone()),
            Some(Reply::Status(status)) => Err(ServiceError::Status(*status)),
            None => Err(ServiceError::Status(404)),
        }
    }
}
