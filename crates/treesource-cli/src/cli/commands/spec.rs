//! `treesource spec` – ingest spec for a file.

use anyhow::Result;
use std::sync::Arc;
use treesource_core::failure::FailureCollector;
use treesource_core::Connector;

pub async fn run_spec(connector: Arc<Connector>, path: String) -> Result<()> {
    let (spec, collector) = tokio::task::spawn_blocking(move || {
        let mut collector = FailureCollector::new();
        let spec = connector.generate_spec(&path, None, &mut collector);
        (spec, collector)
    })
    .await?;
    for failure in collector.failures() {
        eprintln!("warning: {}", failure);
    }
    println!("{}", serde_json::to_string_pretty(&spec)?);
    Ok(())
}
