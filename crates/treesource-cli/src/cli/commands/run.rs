//! `treesource run` – transform a local file into JSON records.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use treesource_core::spec_gen::IngestSpec;
use treesource_core::transform::{
    LocalRunner, RecordTransformer, RowPolicy, SourceConfig, PROP_DELIMITER, PROP_FILE_PATH,
    PROP_GENERATE_SCHEMA, PROP_HEADERS, PROP_REFERENCE_NAME,
};

#[derive(Debug, Clone, Default)]
pub struct RunArgs {
    pub spec: Option<PathBuf>,
    pub file_path: Option<String>,
    pub reference_name: Option<String>,
    pub generate_schema: bool,
    pub include_headers: bool,
    pub delimiter: String,
    pub lenient: bool,
}

fn read_spec(path: &Path) -> Result<IngestSpec> {
    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("parse {}", path.display()))
}

/// Source properties: the ingest spec's properties, then command-line overrides.
fn source_properties(args: &RunArgs, spec: Option<&IngestSpec>) -> BTreeMap<String, String> {
    let mut props = spec.map(|s| s.properties.clone()).unwrap_or_default();
    if let Some(path) = &args.file_path {
        props.insert(PROP_FILE_PATH.to_string(), path.clone());
    }
    if let Some(name) = &args.reference_name {
        props.insert(PROP_REFERENCE_NAME.to_string(), name.clone());
    }
    props.insert(PROP_GENERATE_SCHEMA.to_string(), args.generate_schema.to_string());
    props.insert(PROP_HEADERS.to_string(), args.include_headers.to_string());
    props.insert(PROP_DELIMITER.to_string(), args.delimiter.clone());
    props
}

fn run_blocking(args: RunArgs, delimited_suffix: &str) -> Result<()> {
    let spec = args.spec.as_deref().map(read_spec).transpose()?;
    let props = source_properties(&args, spec.as_ref());
    let config = SourceConfig::from_properties(&props)?;

    // A spec schema only applies to header-split rows.
    let explicit = spec
        .and_then(|s| s.schema)
        .filter(|_| config.generate_schema);
    let transformer = RecordTransformer::prepare(config, explicit, delimited_suffix)?;
    let policy = if args.lenient {
        RowPolicy::Lenient
    } else {
        RowPolicy::Strict
    };
    let runner = LocalRunner::new(transformer, policy);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let summary = runner.run_file(|record| -> Result<()> {
        serde_json::to_writer(&mut out, &record)?;
        out.write_all(b"\n")?;
        Ok(())
    })?;
    out.flush()?;
    eprintln!("{}", serde_json::to_string(&summary)?);
    Ok(())
}

pub async fn run_local(args: RunArgs, delimited_suffix: String) -> Result<()> {
    tokio::task::spawn_blocking(move || run_blocking(args, &delimited_suffix)).await?
}
