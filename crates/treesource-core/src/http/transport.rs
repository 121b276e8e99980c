//! Blocking transport trait and its libcurl implementation.

use curl::easy::{Easy, List};
use std::sync::Mutex;
use std::time::Duration;

use super::{Request, TransportError};
use crate::config::TransportConfig;

/// Idle easy handles kept for reuse.
const MAX_IDLE_HANDLES: usize = 8;

/// Status and body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u32,
    pub body: Vec<u8>,
}

impl Response {
    /// Any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text; invalid UTF-8 is replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Executes one request, once, on the calling thread.
///
/// A non-2xx status is a successful call returning a `Response`; only
/// failures that produce no status are `TransportError`s.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &Request) -> Result<Response, TransportError>;
}

#[derive(Debug, Clone, Copy)]
pub struct TransportOptions {
    pub connect_timeout: Duration,
    pub timeout: Duration,
    pub follow_redirects: bool,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self::from(&TransportConfig::default())
    }
}

impl From<&TransportConfig> for TransportOptions {
    fn from(cfg: &TransportConfig) -> Self {
        Self {
            connect_timeout: cfg.connect_timeout(),
            timeout: cfg.timeout(),
            follow_redirects: cfg.follow_redirects,
        }
    }
}

/// libcurl-backed transport. Safe to share between threads; each in-flight
/// call uses its own easy handle.
pub struct CurlTransport {
    options: TransportOptions,
    idle: Mutex<Vec<Easy>>,
}

impl CurlTransport {
    pub fn new(options: TransportOptions) -> Self {
        Self {
            options,
            idle: Mutex::new(Vec::new()),
        }
    }

    fn checkout(&self) -> Easy {
        self.idle
            .lock()
            .ok()
            .and_then(|mut idle| idle.pop())
            .unwrap_or_else(Easy::new)
    }

    fn checkin(&self, mut easy: Easy) {
        // reset() clears options but keeps the connection cache.
        easy.reset();
        if let Ok(mut idle) = self.idle.lock() {
            if idle.len() < MAX_IDLE_HANDLES {
                idle.push(easy);
            }
        }
    }

    fn perform(&self, easy: &mut Easy, request: &Request) -> Result<Response, TransportError> {
        let mut body = Vec::new();

        easy.url(&request.url)?;
        easy.get(true)?;
        easy.follow_location(self.options.follow_redirects)?;
        easy.connect_timeout(self.options.connect_timeout)?;
        easy.timeout(self.options.timeout)?;

        if !request.headers.is_empty() {
            let mut list = List::new();
            for (k, v) in &request.headers {
                list.append(&format!("{}: {}", k.trim(), v.trim()))?;
            }
            easy.http_headers(list)?;
        }

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()?;
        Ok(Response { status, body })
    }
}

impl Default for CurlTransport {
    fn default() -> Self {
        Self::new(TransportOptions::default())
    }
}

impl Transport for CurlTransport {
    fn execute(&self, request: &Request) -> Result<Response, TransportError> {
        tracing::debug!(
            url = %request.url,
            auth = request.header(super::AUTH_HEADER).is_some(),
            "GET"
        );
        let mut easy = self.checkout();
        let result = self.perform(&mut easy, request);
        self.checkin(easy);
        result
    }
}
