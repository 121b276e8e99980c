//! Retry and backoff layered around a `Transport`.
//!
//! Core operations never retry. A host that wants retries wraps its transport
//! in `RetryingTransport`, which classifies transport errors and failure
//! statuses and backs off exponentially between attempts.

mod classify;
mod policy;
mod run;

pub use classify::{classify_outcome, classify_status, classify_transport_error};
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
pub use run::RetryingTransport;
