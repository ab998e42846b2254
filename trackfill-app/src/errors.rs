//! Error types for a trackfill run.

use thiserror::Error;

/// Errors that can occur while running the tool.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Data error: {0}")]
    Data(#[from] trackfill_data::DataError),

    #[error("Reconstruction error: {0}")]
    Reconstruct(#[from] trackfill_core::ReconstructError),

    #[error("Summary encoding error: {0}")]
    Summary(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
