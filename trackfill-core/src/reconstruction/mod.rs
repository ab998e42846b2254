//! Gap-filling reconstruction of per-object tracks
//!
//! Takes grouped tracks and produces one record per frame from each object's
//! first to last observation, interpolating boxes in the missing frames.

pub mod filler;
pub mod interpolate;

pub use filler::{
    DEFAULT_GAP_WARN_THRESHOLD, DEFAULT_MAX_GAP, GapFiller, Reconstruction, ReconstructionStats,
    reconstruct, reconstruct_track,
};
pub use interpolate::{fill_gap, lerp_box};
