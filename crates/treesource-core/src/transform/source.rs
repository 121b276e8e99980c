//! Per-run source configuration and its validation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{ConnectorError, Result};
use crate::failure::{FailureCollector, ValidationError};
use crate::schema::{default_schema, from_delimited_header, is_delimited_file, Schema};

pub const PROP_REFERENCE_NAME: &str = "referenceName";
pub const PROP_FILE_PATH: &str = "filePath";
pub const PROP_GENERATE_SCHEMA: &str = "generateSchemaToggle";
pub const PROP_HEADERS: &str = "headersToggle";
pub const PROP_DELIMITER: &str = "delimiter";

pub const DEFAULT_DELIMITER: &str = ",";

/// Settings of one full-scale run. Read-only once validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(rename = "referenceName")]
    pub reference_name: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
    /// Infer the schema from the header line and split rows on `delimiter`.
    #[serde(rename = "generateSchemaToggle", default)]
    pub generate_schema: bool,
    /// Emit the line at position 0 instead of skipping it as a header.
    #[serde(rename = "headersToggle", default)]
    pub include_headers: bool,
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
}

fn default_delimiter() -> String {
    DEFAULT_DELIMITER.to_string()
}

impl SourceConfig {
    pub fn new(reference_name: impl Into<String>, file_path: impl Into<String>) -> Self {
        Self {
            reference_name: reference_name.into(),
            file_path: file_path.into(),
            generate_schema: false,
            include_headers: false,
            delimiter: default_delimiter(),
        }
    }

    /// Reads the text properties produced by spec generation (plus the
    /// user-set toggles). Unparseable toggles are reported together.
    pub fn from_properties(props: &BTreeMap<String, String>) -> Result<Self, ValidationError> {
        let mut collector = FailureCollector::new();
        let text = |key: &str| props.get(key).cloned().unwrap_or_default();
        let config = Self {
            reference_name: text(PROP_REFERENCE_NAME),
            file_path: text(PROP_FILE_PATH),
            generate_schema: parse_toggle(props, PROP_GENERATE_SCHEMA, &mut collector),
            include_headers: parse_toggle(props, PROP_HEADERS, &mut collector),
            delimiter: props
                .get(PROP_DELIMITER)
                .cloned()
                .unwrap_or_else(default_delimiter),
        };
        collector.into_result()?;
        Ok(config)
    }

    pub fn is_delimited(&self, delimited_suffix: &str) -> bool {
        is_delimited_file(&self.file_path, delimited_suffix)
    }

    /// Records every configuration problem; performs no I/O.
    pub fn validate(&self, delimited_suffix: &str, collector: &mut FailureCollector) {
        if self.reference_name.trim().is_empty() {
            collector.add_failure("Reference name is required.", Some("Enter a reference name."));
        }
        if self.file_path.trim().is_empty() {
            collector.add_failure("File path is required.", Some("Enter a file path."));
        }
        if self.generate_schema && self.delimiter.is_empty() {
            collector.add_failure(
                "Delimiter is required to generate a schema.",
                Some("Enter a delimiter, e.g. ','."),
            );
        }
        let delimited = self.is_delimited(delimited_suffix);
        if self.generate_schema && !delimited {
            collector.add_failure("Can not generate schema.", Some("File is not of type CSV."));
        }
        if self.include_headers && !delimited {
            collector.add_failure("Cannot include Headers", Some("File is not of type CSV."));
        }
    }

    /// Output schema of the run: `explicit` if given, else the header of the
    /// local file when `generate_schema` is set, else the default schema.
    pub fn resolve_output_schema(&self, explicit: Option<Schema>) -> Result<Schema> {
        if let Some(schema) = explicit {
            return Ok(schema);
        }
        if self.generate_schema {
            return infer_schema_from_file(Path::new(&self.file_path), &self.delimiter);
        }
        Ok(default_schema())
    }
}

fn parse_toggle(
    props: &BTreeMap<String, String>,
    key: &str,
    collector: &mut FailureCollector,
) -> bool {
    match props.get(key).map(|v| v.trim()) {
        None | Some("") => false,
        Some(v) if v.eq_ignore_ascii_case("true") => true,
        Some(v) if v.eq_ignore_ascii_case("false") => false,
        Some(v) => {
            collector.add_failure(
                format!("Invalid value '{}' for {}.", v, key),
                Some("Use true or false."),
            );
            false
        }
    }
}

/// Schema from the first line of a local file.
pub fn infer_schema_from_file(path: &Path, delimiter: &str) -> Result<Schema> {
    let io_err = |source: std::io::Error| ConnectorError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = BufReader::new(File::open(path).map_err(io_err)?);
    let mut header = String::new();
    reader.read_line(&mut header).map_err(io_err)?;
    Ok(from_delimited_header(header.trim_end_matches(['\r', '\n']), delimiter))
}
