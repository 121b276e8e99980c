//! `treesource browse` – list a tree node.

use anyhow::Result;
use std::sync::Arc;
use treesource_core::Connector;

pub async fn run_browse(connector: Arc<Connector>, path: String) -> Result<()> {
    let result = tokio::task::spawn_blocking(move || connector.browse(&path)).await??;
    if result.entries.is_empty() {
        println!("(empty)");
    }
    for entry in &result.entries {
        let marker = if entry.can_browse { "d" } else { "-" };
        println!("{} {}", marker, entry.full_path);
    }
    Ok(())
}
