//! Test doubles

use async_trait::async_trait;
use okspot_exchanges::errors::{ExchangeError, Result};
use okspot_exchanges::traits::{Method, QueryParams, Transport};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::VecDeque;

/// One request as seen by the transport
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<QueryParams>,
    pub body: Option<Value>,
    pub signed: bool,
}

impl RecordedRequest {
    /// Query string as it would be signed, empty when there is none
    pub fn query_string(&self) -> String {
        self.query
            .as_ref()
            .map(QueryParams::to_query_string)
            .unwrap_or_default()
    }
}

/// Transport that records every request and answers from a queue.
///
/// An empty queue answers `[]`, which decodes as an empty list.
#[derive(Default)]
pub struct RecordingTransport {
    replies: RefCell<VecDeque<Result<Vec<u8>>>>,
    requests: RefCell<Vec<RecordedRequest>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, body: &str) -> Self {
        self.replies.borrow_mut().push_back(Ok(body.as_bytes().to_vec()));
        self
    }

    pub fn fail(self, err: ExchangeError) -> Self {
        self.replies.borrow_mut().push_back(Err(err));
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.borrow().clone()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.borrow().last().cloned()
    }
}

#[async_trait(?Send)]
impl Transport for RecordingTransport {
    async fn request(
        &self,
        method: Method,
        path: &str,
        query: Option<&QueryParams>,
        body: Option<&Value>,
        signed: bool,
    ) -> Result<Vec<u8>> {
        self.requests.borrow_mut().push(RecordedRequest {
            method,
            path: path.to_string(),
            query: query.cloned(),
            body: body.cloned(),
            signed,
        });

        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(b"[]".to_vec()))
    }
}
