//! CSV table loading functions

use crate::error::DataError;
use crate::table::{Columns, InputRow};
use crate::types::Observation;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info, warn};

/// Load observations from a CSV file on disk.
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_observations_from_csv(path: impl AsRef<Path>) -> Result<Vec<Observation>, DataError> {
    debug!("Loading observations from: {}", path.as_ref().display());
    let file = File::open(path.as_ref())?;
    read_observations(BufReader::new(file))
}

/// Read observations from any CSV source with a header row.
///
/// Records are indexed from zero in the order they appear; that index is
/// stored in each observation's provenance and used in error messages.
pub fn read_observations<R: Read>(reader: R) -> Result<Vec<Observation>, DataError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let columns = Columns::from_header(csv_reader.headers()?);

    let mut observations = Vec::new();
    for (row, record) in csv_reader.deserialize::<InputRow>().enumerate() {
        let input = record.map_err(|e| {
            warn!("Failed to read CSV record {}: {}", row, e);
            e
        })?;
        observations.push(input.into_observation(row, &columns)?);
    }

    info!("CSV table parsed: {} observations", observations.len());
    Ok(observations)
}
