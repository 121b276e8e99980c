//! In-memory transport for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::http::{Request, Response, Transport, TransportError};

/// libcurl's CURLE_COULDNT_CONNECT.
const COULDNT_CONNECT: i32 = 7;

/// Serves fixed responses by exact URL; unknown URLs fail as if the
/// connection was refused.
#[derive(Default)]
pub(crate) struct StubTransport {
    routes: HashMap<String, (u32, Vec<u8>)>,
    requests: Mutex<Vec<Request>>,
}

impl StubTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn route(mut self, url: &str, status: u32, body: &str) -> Self {
        self.routes
            .insert(url.to_string(), (status, body.as_bytes().to_vec()));
        self
    }

    pub(crate) fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn requested_urls(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.url).collect()
    }
}

impl Transport for StubTransport {
    fn execute(&self, request: &Request) -> Result<Response, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        match self.routes.get(&request.url) {
            Some((status, body)) => Ok(Response {
                status: *status,
                body: body.clone(),
            }),
            None => Err(TransportError::from(curl::Error::new(COULDNT_CONNECT as _))),
        }
    }
}
