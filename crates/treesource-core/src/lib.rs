//! Remote file-tree source connector.
//!
//! Talks to an HTTP tree server that lists directories as JSON and serves
//! file contents raw. Supports connectivity tests, browsing, bounded
//! sampling and ingest-spec generation, plus a local line-by-line runner
//! that turns a file into structured records.

pub mod browse;
pub mod config;
pub mod connector;
pub mod error;
pub mod failure;
mod fetch;
pub mod http;
pub mod logging;
pub mod record;
pub mod retry;
pub mod sample;
pub mod schema;
pub mod spec_gen;
pub mod transform;
pub mod url_model;

#[cfg(test)]
mod testing;

pub use connector::{ConnectivityReport, Connector};
pub use error::{ConnectorError, Result};
