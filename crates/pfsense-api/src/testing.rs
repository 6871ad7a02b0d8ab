// In-memory `Transport` for service unit tests.

use std::sync::Mutex;

use bytes::Bytes;

use crate::client::{ApiRequest, Transport};
use crate::error::Error;

/// Records every request and answers each with the same canned reply.
pub(crate) struct RecordingTransport {
    reply: Result<Vec<u8>, u16>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl RecordingTransport {
    pub(crate) fn replying(body: serde_json::Value) -> Self {
        Self {
            reply: Ok(body.to_string().into_bytes()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Reply with `body` verbatim, keeping object key order as written.
    pub(crate) fn replying_raw(body: &str) -> Self {
        Self {
            reply: Ok(body.as_bytes().to_vec()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing(status: u16) -> Self {
        Self {
            reply: Err(status),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

impl Transport for RecordingTransport {
    async fn send(&self, request: ApiRequest) -> Result<Bytes, Error> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }
        match &self.reply {
            Ok(body) => Ok(Bytes::from(body.clone())),
            Err(status) => Err(Error::Status {
                status: *status,
                body: String::new(),
            }),
        }
    }
}
