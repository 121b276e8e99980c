//! Outbound GET request description.

use crate::config::Endpoint;

pub const AUTH_HEADER: &str = "Authorization";

/// A GET request: target URL plus extra header lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl Request {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// First value of header `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Builds the request for `url`, adding `Authorization: <scheme> <credential>`
/// when the endpoint has auth enabled. The URL is not validated here.
pub fn build_request(url: &str, endpoint: &Endpoint) -> Request {
    let request = Request::get(url);
    match endpoint.authorization() {
        Some(value) => request.with_header(AUTH_HEADER, value),
        None => request,
    }
}
