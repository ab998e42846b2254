//! Error types for reading and writing observation tables.

use thiserror::Error;

/// Errors that can occur at the CSV boundary.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("record {row}: missing required field '{field}'")]
    MissingField { row: usize, field: &'static str },

    #[error("record {row}: cannot parse field '{field}' from {value:?}: {reason}")]
    Parse {
        row: usize,
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DataError {
    pub(crate) fn parse(
        row: usize,
        field: &'static str,
        value: &str,
        reason: impl ToString,
    ) -> Self {
        DataError::Parse {
            row,
            field,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}
