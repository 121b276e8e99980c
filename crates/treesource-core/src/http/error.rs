//! Transport-level failures (no HTTP status was obtained).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    /// Connect or overall deadline exceeded.
    #[error("request timed out: {0}")]
    Timeout(#[source] curl::Error),
    /// DNS failure, refused or reset connection, empty reply.
    #[error("connection failed: {0}")]
    Connection(#[source] curl::Error),
    /// Any other libcurl failure (bad URL, header list, TLS).
    #[error("transport error: {0}")]
    Curl(#[source] curl::Error),
}

impl From<curl::Error> for TransportError {
    fn from(e: curl::Error) -> Self {
        if e.is_operation_timedout() {
            TransportError::Timeout(e)
        } else if e.is_couldnt_connect()
            || e.is_couldnt_resolve_host()
            || e.is_couldnt_resolve_proxy()
            || e.is_read_error()
            || e.is_recv_error()
            || e.is_send_error()
            || e.is_got_nothing()
        {
            TransportError::Connection(e)
        } else {
            TransportError::Curl(e)
        }
    }
}
