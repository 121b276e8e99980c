//! Batch collection of validation failures.
//!
//! Validation steps (connectivity test, source configuration) record every
//! problem they find instead of stopping at the first, then report them
//! together.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// One validation problem and, when known, what the user should change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationFailure {
    pub message: String,
    pub corrective_action: Option<String>,
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.corrective_action {
            Some(action) => write!(f, "{} {}", self.message, action),
            None => write!(f, "{}", self.message),
        }
    }
}

/// All failures found by one validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation failed: {}", join_failures(.failures))]
pub struct ValidationError {
    pub failures: Vec<ValidationFailure>,
}

fn join_failures(failures: &[ValidationFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Default)]
pub struct FailureCollector {
    failures: Vec<ValidationFailure>,
}

impl FailureCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_failure(&mut self, message: impl Into<String>, corrective_action: Option<&str>) {
        self.failures.push(ValidationFailure {
            message: message.into(),
            corrective_action: corrective_action.map(str::to_string),
        });
    }

    pub fn failures(&self) -> &[ValidationFailure] {
        &self.failures
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// `Ok(())` if nothing was collected, otherwise every failure as one error.
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.failures.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                failures: self.failures,
            })
        }
    }
}
