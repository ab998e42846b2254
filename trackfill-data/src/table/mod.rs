//! CSV table loading and writing

mod reader;
mod row;
mod writer;

pub use reader::{load_observations_from_csv, read_observations};
pub use row::{Columns, HEADER, InputRow, OutputRow, parse_frame, parse_object_id};
pub use writer::{WriteOptions, staging_file, write_observations, write_observations_to_csv};
