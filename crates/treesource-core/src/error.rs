//! Error taxonomy for connector and source operations.

use std::path::PathBuf;
use thiserror::Error;

use crate::failure::ValidationError;
use crate::http::TransportError;

#[derive(Debug, Error)]
pub enum ConnectorError {
    /// The request never produced a response (DNS, refused, timeout).
    #[error("could not reach {url}: {source}")]
    Connectivity {
        url: String,
        #[source]
        source: TransportError,
    },

    /// The remote answered with a non-2xx status.
    #[error("{url} returned HTTP {status}")]
    RemoteFailureStatus { url: String, status: u32 },

    /// A listing payload was not a JSON array of `{name, isDir}` objects.
    #[error("could not decode listing from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// A delimited row had fewer values than the schema has fields.
    #[error("row at position {position} has {found} values, schema expects {expected}")]
    MalformedRow {
        position: u64,
        expected: usize,
        found: usize,
    },

    /// Configuration was rejected before any I/O.
    #[error(transparent)]
    Configuration(#[from] ValidationError),

    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = ConnectorError> = std::result::Result<T, E>;
