//! `treesource test` – connectivity check.

use anyhow::{bail, Result};
use std::sync::Arc;
use treesource_core::Connector;

pub async fn run_test(connector: Arc<Connector>) -> Result<()> {
    let report = tokio::task::spawn_blocking(move || connector.test()).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    if let Some(message) = report.message() {
        bail!("connectivity test failed: {}", message);
    }
    Ok(())
}
