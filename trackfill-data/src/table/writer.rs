//! CSV table writing functions

use crate::error::DataError;
use crate::table::{HEADER, OutputRow};
use crate::types::Observation;
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Options controlling how rows are encoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Wrap boxes in `[...]` like the input format. Off by default so
    /// existing consumers keep seeing bare space-separated values.
    pub bracketed_boxes: bool,
}

/// Create a temporary file beside `path`, for writing and then renaming into place.
///
/// Dropping the returned file without persisting it removes it.
pub fn staging_file(path: &Path) -> std::io::Result<NamedTempFile> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    NamedTempFile::new_in(dir)
}

/// Write observations to a CSV file, replacing it if it exists.
///
/// Rows go to a staging file that is renamed over `path` only once every
/// row is written, so a failure never leaves a truncated table behind.
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn write_observations_to_csv(
    path: impl AsRef<Path>,
    observations: &[Observation],
    options: WriteOptions,
) -> Result<(), DataError> {
    let path = path.as_ref();
    debug!("Writing observations to: {}", path.display());
    let mut staged = staging_file(path)?;
    write_observations(BufWriter::new(staged.as_file_mut()), observations, options)?;
    staged.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Write observations with the fixed header to any sink.
///
/// The header is emitted even when `observations` is empty.
pub fn write_observations<W: Write>(
    writer: W,
    observations: &[Observation],
    options: WriteOptions,
) -> Result<(), DataError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(HEADER)?;
    for obs in observations {
        csv_writer.serialize(OutputRow::from_observation(obs, options.bracketed_boxes))?;
    }
    csv_writer.flush()?;

    info!("CSV table written: {} rows", observations.len());
    Ok(())
}
