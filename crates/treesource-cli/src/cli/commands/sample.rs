//! `treesource sample` – preview a file.

use anyhow::Result;
use std::sync::Arc;
use treesource_core::Connector;

pub async fn run_sample(connector: Arc<Connector>, path: String) -> Result<()> {
    let sample = tokio::task::spawn_blocking(move || connector.sample(&path)).await??;
    println!("{}", serde_json::to_string_pretty(&sample)?);
    Ok(())
}
