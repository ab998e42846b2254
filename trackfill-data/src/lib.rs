//! Trackfill Data Crate
//!
//! Observation records for tracked cars and their license plates, plus the
//! CSV boundary used to read raw tracking output and write filled tables.
//! Nothing in here knows about interpolation; see `trackfill-core` for that.

pub mod bbox;
pub mod error;
pub mod table;
pub mod types;

pub use bbox::{BBoxFormatError, format_bbox, parse_bbox};
pub use error::DataError;
pub use table::{
    HEADER, WriteOptions, load_observations_from_csv, read_observations, staging_file,
    write_observations, write_observations_to_csv,
};
pub use types::{Observation, PlateAnnotation, Provenance, SENTINEL};
