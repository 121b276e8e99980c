//! Full-scale line-to-record transformation.
//!
//! The engine calls `RecordTransformer::transform` once per input line with
//! the line's position (its starting byte offset). Position 0 is the header
//! and is skipped unless headers are included. In schema mode the line is
//! split on the delimiter and bound by position; a row with fewer values than
//! fields is rejected. Otherwise the line becomes `{offset: position, body}`.

mod runner;
mod source;

pub use runner::{LocalRunner, RowPolicy, RunSummary};
pub use source::{
    infer_schema_from_file, SourceConfig, DEFAULT_DELIMITER, PROP_DELIMITER, PROP_FILE_PATH,
    PROP_GENERATE_SCHEMA, PROP_HEADERS, PROP_REFERENCE_NAME,
};

use std::sync::Arc;

use crate::error::{ConnectorError, Result};
use crate::failure::FailureCollector;
use crate::record::StructuredRecord;
use crate::schema::{default_schema, split_delimited, Schema};

/// Transforms one line. Stateless: the result depends only on the arguments.
pub fn transform(
    position: u64,
    line: &str,
    config: &SourceConfig,
    schema: &Arc<Schema>,
) -> Result<Option<StructuredRecord>> {
    if !config.include_headers && position == 0 {
        return Ok(None);
    }

    if config.generate_schema {
        let tokens = split_delimited(line, &config.delimiter);
        if tokens.len() < schema.len() {
            return Err(ConnectorError::MalformedRow {
                position,
                expected: schema.len(),
                found: tokens.len(),
            });
        }
        return Ok(Some(StructuredRecord::from_tokens(Arc::clone(schema), &tokens)));
    }

    let offset = i64::try_from(position).unwrap_or(i64::MAX);
    let mut builder = StructuredRecord::builder(Arc::clone(schema));
    builder.set(0, offset).set(1, line);
    Ok(Some(builder.build()))
}

/// Validated config plus the output schema, resolved once before any line
/// is transformed and shared by every call.
#[derive(Debug, Clone)]
pub struct RecordTransformer {
    config: SourceConfig,
    schema: Arc<Schema>,
}

impl RecordTransformer {
    /// Validates `config` (no I/O), then resolves the output schema.
    pub fn prepare(
        config: SourceConfig,
        explicit_schema: Option<Schema>,
        delimited_suffix: &str,
    ) -> Result<Self> {
        let mut collector = FailureCollector::new();
        config.validate(delimited_suffix, &mut collector);
        collector.into_result()?;

        let schema = config.resolve_output_schema(explicit_schema)?;

        let mut collector = FailureCollector::new();
        if config.generate_schema {
            schema.validate_names(&mut collector);
        } else if schema != default_schema() {
            collector.add_failure(
                "Output schema must be offset (integer) then body (text).",
                Some("Remove the explicit schema or enable schema generation."),
            );
        }
        collector.into_result()?;

        tracing::info!(
            reference = %config.reference_name,
            fields = schema.len(),
            generate_schema = config.generate_schema,
            "source prepared"
        );
        Ok(Self {
            config,
            schema: Arc::new(schema),
        })
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn transform(&self, position: u64, line: &str) -> Result<Option<StructuredRecord>> {
        transform(position, line, &self.config, &self.schema)
    }
}
