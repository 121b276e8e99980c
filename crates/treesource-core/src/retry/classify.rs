//! Map transport outcomes onto retry error kinds.

use super::policy::ErrorKind;
use crate::http::{Response, TransportError};

/// Classify an HTTP status; `None` means the response is final.
pub fn classify_status(status: u32) -> Option<ErrorKind> {
    match status {
        200..=299 => None,
        429 | 503 => Some(ErrorKind::Throttled),
        500..=599 => Some(ErrorKind::Http5xx(status as u16)),
        _ => None,
    }
}

pub fn classify_transport_error(e: &TransportError) -> ErrorKind {
    match e {
        TransportError::Timeout(_) => ErrorKind::Timeout,
        TransportError::Connection(_) => ErrorKind::Connection,
        TransportError::Curl(_) => ErrorKind::Other,
    }
}

/// Kind of a retryable outcome, or `None` when the outcome should be returned as is.
pub fn classify_outcome(outcome: &Result<Response, TransportError>) -> Option<ErrorKind> {
    match outcome {
        Ok(response) => classify_status(response.status),
        Err(e) => Some(classify_transport_error(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_and_client_errors_are_final() {
        assert_eq!(classify_status(200), None);
        assert_eq!(classify_status(404), None);
        assert_eq!(classify_status(401), None);
    }

    #[test]
    fn throttling_statuses() {
        assert_eq!(classify_status(429), Some(ErrorKind::Throttled));
        assert_eq!(classify_status(503), Some(ErrorKind::Throttled));
    }

    #[test]
    fn server_errors() {
        assert_eq!(classify_status(500), Some(ErrorKind::Http5xx(500)));
        assert_eq!(classify_status(502), Some(ErrorKind::Http5xx(502)));
    }
}
