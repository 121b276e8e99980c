//! Bounded preview of a file as structured records.
//!
//! Delimited files: the first line is the header and is never emitted; each
//! following line is split on the delimiter and bound by position. Short rows
//! are kept with trailing `Null`s. Other files: each line becomes
//! `{offset, body}` where `offset` is the running character count of the
//! preceding lines, newlines excluded.

use serde::Serialize;
use std::sync::Arc;

use crate::record::{StructuredRecord, Value};
use crate::schema::{default_schema, from_delimited_header, split_delimited, Schema};

/// Records returned by one sample call when nothing else is configured.
pub const DEFAULT_SAMPLE_CAP: usize = 1000;

/// Delimiter used when sampling delimited files through the connector.
pub const SAMPLE_DELIMITER: &str = ",";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    pub schema: Arc<Schema>,
    pub records: Vec<StructuredRecord>,
}

/// Lines of `raw` split on `\n`; trailing empty lines are dropped.
fn lines(raw: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = raw.split('\n').collect();
    while lines.last() == Some(&"") {
        lines.pop();
    }
    lines
}

/// Builds at most `cap` records from `raw` (at most `cap - 1` in delimited
/// mode, since the header counts towards the cap). Never fails.
pub fn sample_content(raw: &str, is_delimited: bool, delimiter: &str, cap: usize) -> Sample {
    let lines = lines(raw);
    let limit = lines.len().min(cap);

    if is_delimited {
        let header = lines.first().copied().unwrap_or_default();
        let schema = Arc::new(from_delimited_header(header, delimiter));
        let records = lines
            .iter()
            .take(limit)
            .skip(1)
            .map(|line| {
                StructuredRecord::from_tokens(
                    Arc::clone(&schema),
                    &split_delimited(line, delimiter),
                )
            })
            .collect();
        return Sample { schema, records };
    }

    let schema = Arc::new(default_schema());
    let mut offset: i64 = 0;
    let mut records = Vec::with_capacity(limit);
    for line in lines.iter().take(limit) {
        let mut builder = StructuredRecord::builder(Arc::clone(&schema));
        builder.set(0, offset).set(1, Value::from(*line));
        records.push(builder.build());
        offset += line.chars().count() as i64;
    }
    Sample { schema, records }
}
