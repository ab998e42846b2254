//! Error types for gap filling.

use thiserror::Error;

fn row_label(row: &Option<usize>) -> String {
    match row {
        Some(r) => format!("record {}", r),
        None => "synthesized record".to_string(),
    }
}

/// Errors that can occur while reconstructing tracks.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReconstructError {
    #[error(
        "duplicate frame {frame} for object {object_id} ({} and {})",
        row_label(.first_row),
        row_label(.second_row)
    )]
    DuplicateFrame {
        object_id: i64,
        frame: u64,
        first_row: Option<usize>,
        second_row: Option<usize>,
    },

    #[error(
        "object {object_id}: {missing} frames missing after frame {after_frame}, limit is {limit}"
    )]
    GapTooLarge {
        object_id: i64,
        after_frame: u64,
        missing: u64,
        limit: u64,
    },
}
