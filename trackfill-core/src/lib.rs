//! Trackfill Core Crate
//!
//! Fills temporal gaps in per-object tracking records. Observations are
//! grouped by object id, sorted by frame, and every missing frame between two
//! real observations gets a synthesized record whose boxes are linearly
//! interpolated from its neighbours.
//!
//! ## Modules
//!
//! - [`track`]: grouping observations into per-object tracks
//! - [`reconstruction`]: gap detection, interpolation and the batch entry point

pub mod error;
pub mod reconstruction;
pub mod track;

pub use error::ReconstructError;
pub use reconstruction::{
    DEFAULT_GAP_WARN_THRESHOLD, DEFAULT_MAX_GAP, GapFiller, Reconstruction, ReconstructionStats,
    fill_gap, lerp_box, reconstruct, reconstruct_track,
};
pub use track::{Track, group_tracks};
