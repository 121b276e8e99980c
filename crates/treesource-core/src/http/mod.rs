//! Outbound HTTP: request construction and a blocking transport.
//!
//! Uses the curl crate (libcurl). A single `CurlTransport` is built by the
//! host and shared by every connector call; it keeps idle easy handles so
//! connections are reused across requests.

mod error;
mod request;
mod transport;

pub use error::TransportError;
pub use request::{build_request, Request, AUTH_HEADER};
pub use transport::{CurlTransport, Response, Transport, TransportOptions};
