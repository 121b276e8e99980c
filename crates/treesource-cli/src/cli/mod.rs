//! CLI for the treesource connector.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use treesource_core::config::{self, TreesourceConfig};
use treesource_core::http::{CurlTransport, Transport, TransportOptions};
use treesource_core::retry::{RetryPolicy, RetryingTransport};
use treesource_core::Connector;

use commands::{run_browse, run_local, run_sample, run_spec, run_test, RunArgs};

/// Top-level CLI for the treesource connector.
#[derive(Debug, Parser)]
#[command(name = "treesource")]
#[command(about = "Browse, sample and ingest files from an HTTP file tree", long_about = None)]
pub struct Cli {
    /// Base URL of the tree server (overrides `[endpoint] base_url`).
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Check that the configured endpoint answers.
    Test,

    /// List the children of a tree path.
    Browse {
        /// Tree path; `/` lists the configured endpoint path.
        #[arg(default_value = "/")]
        path: String,
    },

    /// Print a bounded preview of a file as JSON records.
    Sample {
        /// Tree path of the file.
        path: String,
        /// Maximum number of records (overrides `[sampling] max_sample_records`).
        #[arg(long, value_name = "N")]
        limit: Option<usize>,
    },

    /// Print the ingest spec for a file.
    Spec {
        /// Tree path of the file.
        path: String,
    },

    /// Transform a local file into JSON records, one per line.
    Run {
        /// Ingest spec (JSON) produced by `treesource spec`.
        #[arg(long, value_name = "FILE")]
        spec: Option<PathBuf>,
        /// Local file to read (overrides the ingest spec's filePath).
        #[arg(long, value_name = "PATH")]
        file_path: Option<String>,
        /// Reference name (overrides the ingest spec's referenceName).
        #[arg(long, value_name = "NAME")]
        reference_name: Option<String>,
        /// Infer the schema from the header line and split rows on the delimiter.
        #[arg(long)]
        generate_schema: bool,
        /// Emit the first line instead of skipping it as a header.
        #[arg(long)]
        include_headers: bool,
        /// Field delimiter for delimited files.
        #[arg(long, default_value = ",")]
        delimiter: String,
        /// Skip malformed rows instead of stopping.
        #[arg(long)]
        lenient: bool,
    },
}

/// Connector over libcurl, with retries when `[retry]` is configured.
pub fn build_connector(cfg: &TreesourceConfig) -> Arc<Connector> {
    let curl = CurlTransport::new(TransportOptions::from(&cfg.transport));
    let transport: Arc<dyn Transport> = match &cfg.retry {
        Some(retry) => Arc::new(RetryingTransport::new(curl, RetryPolicy::from(retry))),
        None => Arc::new(curl),
    };
    Arc::new(Connector::new(cfg.endpoint.clone(), transport).with_sampling(cfg.sampling.clone()))
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let mut cfg = config::load_or_init()?;
        if let Some(base_url) = cli.base_url {
            cfg.endpoint.base_url = base_url;
        }
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Test => run_test(build_connector(&cfg)).await?,
            CliCommand::Browse { path } => run_browse(build_connector(&cfg), path).await?,
            CliCommand::Sample { path, limit } => {
                if let Some(limit) = limit {
                    cfg.sampling.max_sample_records = limit;
                }
                run_sample(build_connector(&cfg), path).await?;
            }
            CliCommand::Spec { path } => run_spec(build_connector(&cfg), path).await?,
            CliCommand::Run {
                spec,
                file_path,
                reference_name,
                generate_schema,
                include_headers,
                delimiter,
                lenient,
            } => {
                let args = RunArgs {
                    spec,
                    file_path,
                    reference_name,
                    generate_schema,
                    include_headers,
                    delimiter,
                    lenient,
                };
                run_local(args, cfg.sampling.delimited_suffix).await?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
