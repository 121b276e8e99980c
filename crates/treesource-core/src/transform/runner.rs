//! Single-process stand-in for the batch engine: reads a local file line by
//! line and feeds each line, keyed by its starting byte offset, to the
//! transformer.

use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use super::RecordTransformer;
use crate::error::ConnectorError;
use crate::record::StructuredRecord;

/// What to do with a row that fails to transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowPolicy {
    /// Stop the run at the first bad row.
    #[default]
    Strict,
    /// Log the bad row, count it, and continue.
    Lenient,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub lines_read: u64,
    pub records_emitted: u64,
    pub headers_skipped: u64,
    pub rows_rejected: u64,
}

pub struct LocalRunner {
    transformer: RecordTransformer,
    policy: RowPolicy,
}

fn strip_line_ending(buf: &[u8]) -> &[u8] {
    let buf = buf.strip_suffix(b"\n").unwrap_or(buf);
    buf.strip_suffix(b"\r").unwrap_or(buf)
}

impl LocalRunner {
    pub fn new(transformer: RecordTransformer, policy: RowPolicy) -> Self {
        Self {
            transformer,
            policy,
        }
    }

    pub fn transformer(&self) -> &RecordTransformer {
        &self.transformer
    }

    fn source_path(&self) -> PathBuf {
        PathBuf::from(&self.transformer.config().file_path)
    }

    /// Opens the configured file and runs every line through the transformer.
    pub fn run_file<F, E>(&self, emit: F) -> Result<RunSummary, E>
    where
        F: FnMut(StructuredRecord) -> Result<(), E>,
        E: From<ConnectorError>,
    {
        let path = self.source_path();
        let file = File::open(&path).map_err(|source| ConnectorError::Io { path, source })?;
        self.run(BufReader::new(file), emit)
    }

    /// Runs every line of `reader` through the transformer, passing records
    /// to `emit` in input order.
    pub fn run<R, F, E>(&self, mut reader: R, mut emit: F) -> Result<RunSummary, E>
    where
        R: BufRead,
        F: FnMut(StructuredRecord) -> Result<(), E>,
        E: From<ConnectorError>,
    {
        let mut summary = RunSummary::default();
        let mut position: u64 = 0;
        let mut buf = Vec::new();

        loop {
            buf.clear();
            let n = reader
                .read_until(b'\n', &mut buf)
                .map_err(|source| ConnectorError::Io {
                    path: self.source_path(),
                    source,
                })?;
            if n == 0 {
                break;
            }
            let line_start = position;
            position += n as u64;
            summary.lines_read += 1;

            let line = String::from_utf8_lossy(strip_line_ending(&buf));
            match self.transformer.transform(line_start, &line) {
                Ok(Some(record)) => {
                    emit(record)?;
                    summary.records_emitted += 1;
                }
                Ok(None) => summary.headers_skipped += 1,
                Err(e @ ConnectorError::MalformedRow { .. })
                    if self.policy == RowPolicy::Lenient =>
                {
                    tracing::warn!("skipping row: {}", e);
                    summary.rows_rejected += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }

        tracing::info!(
            reference = %self.transformer.config().reference_name,
            lines = summary.lines_read,
            records = summary.records_emitted,
            rejected = summary.rows_rejected,
            "run finished"
        );
        Ok(summary)
    }
}
