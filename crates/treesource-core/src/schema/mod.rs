//! Record schemas: ordered, typed fields bound to values by position.

mod infer;

pub use infer::{default_schema, from_delimited_header, is_delimited_file, split_delimited};

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::failure::FailureCollector;

/// Suffix that marks a delimited file when none is configured.
pub const DEFAULT_DELIMITED_SUFFIX: &str = ".csv";

/// First field of the fallback schema: running offset of the line.
pub const OFFSET_FIELD: &str = "offset";
/// Second field of the fallback schema: the raw line.
pub const BODY_FIELD: &str = "body";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    /// 64-bit signed integer.
    Integer,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

impl Field {
    pub fn text(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: FieldType::Text,
        }
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: FieldType::Integer,
        }
    }
}

/// Ordered field list. Two schemas are equal iff their field sequences are.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Position of the first field called `name`.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Records empty and duplicate field names. Inference passes header tokens
    /// through verbatim; a full run must not bind to ambiguous names.
    pub fn validate_names(&self, collector: &mut FailureCollector) {
        let mut seen = HashSet::new();
        for (i, field) in self.fields.iter().enumerate() {
            if field.name.is_empty() {
                collector.add_failure(
                    format!("Column {} has an empty header.", i + 1),
                    Some("Name every column in the header line."),
                );
            } else if !seen.insert(field.name.as_str()) {
                collector.add_failure(
                    format!("Duplicate column '{}' in header.", field.name),
                    Some("Give every column a unique name."),
                );
            }
        }
    }
}
