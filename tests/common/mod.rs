//! Shared utilities for integration tests.

use std::sync::{Arc, Mutex};

use boulevard::{handler, Exchange, Handler, Params, Router};

/// Response state a handler or the not-found path writes to.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: Option<u16>,
    pub body: Option<String>,
    pub ended: bool,
}

/// Call arguments: a request target plus a shared response slot.
#[derive(Debug, Clone)]
pub struct Call {
    pub url: String,
    pub response: Arc<Mutex<Response>>,
}

impl Call {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            response: Arc::default(),
        }
    }

    pub fn response(&self) -> Response {
        self.response.lock().unwrap().clone()
    }

    pub fn respond(&self, status: u16, body: &str) {
        let mut response = self.response.lock().unwrap();
        response.status = Some(status);
        response.body = Some(body.to_string());
        response.ended = true;
    }
}

impl Exchange for Call {
    type Output = ();

    fn url(&self) -> &str {
        &self.url
    }

    fn not_found(self) {
        let mut response = self.response.lock().unwrap();
        response.status = Some(404);
        response.ended = true;
    }
}

pub type CallHandler = Handler<(Call, Params), ()>;

/// Router dispatched with [`Call`]s, using the default options.
#[allow(dead_code)]
pub type CallRouter = Router<Call, ()>;

/// A handler that records what it was called with.
#[derive(Debug, Clone, Default)]
pub struct Spy {
    calls: Arc<Mutex<Vec<(String, Params)>>>,
}

#[allow(dead_code)]
impl Spy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handler that records the call, then accepts (`true`) or declines.
    pub fn handler(&self, accept: bool) -> CallHandler {
        let calls = self.calls.clone();
        handler(move |(call, params): (Call, Params)| {
            calls.lock().unwrap().push((call.url.clone(), params));
            accept
        })
    }

    pub fn called(&self) -> bool {
        !self.calls.lock().unwrap().is_empty()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_params(&self) -> Option<Params> {
        self.calls.lock().unwrap().last().map(|(_, params)| params.clone())
    }

    pub fn last_url(&self) -> Option<String> {
        self.calls.lock().unwrap().last().map(|(url, _)| url.clone())
    }
}
