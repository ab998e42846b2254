//! Per-track reconstruction and the batch entry point

use crate::error::ReconstructError;
use crate::reconstruction::fill_gap;
use crate::track::{Track, group_tracks};
use serde::Serialize;
use tracing::{debug, info, warn};
use trackfill_data::Observation;

/// Gaps longer than this many frames are logged as warnings by default.
pub const DEFAULT_GAP_WARN_THRESHOLD: u64 = 30;

/// Longest run of missing frames filled by default before the run fails.
pub const DEFAULT_MAX_GAP: u64 = 1_000_000;

/// Totals over one reconstruction run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReconstructionStats {
    /// Distinct object ids in the input.
    pub objects: usize,
    /// Records copied from the input.
    pub observed: usize,
    /// Records filled in by interpolation.
    pub synthesized: usize,
    /// Runs of consecutive missing frames.
    pub gaps: usize,
    /// Missing frames in the longest run.
    pub longest_gap: u64,
}

/// Output of [`reconstruct`]: the filled records plus run totals.
#[derive(Debug, Clone, Default)]
pub struct Reconstruction {
    /// Records ordered by object id, then frame.
    pub observations: Vec<Observation>,
    pub stats: ReconstructionStats,
}

/// Fills missing frames in every track of a batch
#[derive(Debug, Clone, Copy)]
pub struct GapFiller {
    gap_warn_threshold: u64,
    max_gap: u64,
}

impl GapFiller {
    pub fn new() -> Self {
        Self {
            gap_warn_threshold: DEFAULT_GAP_WARN_THRESHOLD,
            max_gap: DEFAULT_MAX_GAP,
        }
    }

    /// Fail with [`ReconstructError::GapTooLarge`] instead of filling more
    /// than `frames` consecutive missing frames.
    pub fn with_max_gap(mut self, frames: u64) -> Self {
        self.max_gap = frames;
        self
    }

    /// Log a warning for gaps longer than `frames`. Does not affect output.
    pub fn with_gap_warn_threshold(mut self, frames: u64) -> Self {
        self.gap_warn_threshold = frames;
        self
    }

    /// Group, sort and fill every track in `observations`.
    #[tracing::instrument(skip_all, fields(records = observations.len()))]
    pub fn fill(&self, observations: &[Observation]) -> Result<Reconstruction, ReconstructError> {
        let tracks = group_tracks(observations)?;
        for track in &tracks {
            self.check_gaps(track)?;
        }

        let mut output = Vec::with_capacity(observations.len());
        let mut stats = ReconstructionStats {
            objects: tracks.len(),
            observed: observations.len(),
            ..Default::default()
        };

        for track in &tracks {
            self.fill_track(track, &mut output, &mut stats);
        }

        info!(
            "Reconstructed {} objects: {} observed, {} synthesized in {} gaps",
            stats.objects, stats.observed, stats.synthesized, stats.gaps
        );
        Ok(Reconstruction {
            observations: output,
            stats,
        })
    }

    /// Reject the track before allocating anything if a gap exceeds the limit.
    fn check_gaps(&self, track: &Track) -> Result<(), ReconstructError> {
        for pair in track.observations().windows(2) {
            let missing = pair[1].frame - pair[0].frame - 1;
            if missing > self.max_gap {
                return Err(ReconstructError::GapTooLarge {
                    object_id: track.object_id(),
                    after_frame: pair[0].frame,
                    missing,
                    limit: self.max_gap,
                });
            }
        }
        Ok(())
    }

    fn fill_track(
        &self,
        track: &Track,
        output: &mut Vec<Observation>,
        stats: &mut ReconstructionStats,
    ) {
        let observations = track.observations();
        let Some(first) = observations.first() else {
            return;
        };
        output.push(first.clone());

        for pair in observations.windows(2) {
            let (prev, curr) = (&pair[0], &pair[1]);
            let missing = curr.frame - prev.frame - 1;
            if missing > 0 {
                debug!(
                    "Object {}: filling frames {}..{}",
                    track.object_id(),
                    prev.frame + 1,
                    curr.frame
                );
                if missing > self.gap_warn_threshold {
                    warn!(
                        "Object {}: {} consecutive frames missing after frame {}",
                        track.object_id(),
                        missing,
                        prev.frame
                    );
                }
                output.extend(fill_gap(prev, curr));
                stats.synthesized += missing as usize;
                stats.gaps += 1;
                stats.longest_gap = stats.longest_gap.max(missing);
            }
            output.push(curr.clone());
        }
    }
}

impl Default for GapFiller {
    fn default() -> Self {
        Self::new()
    }
}

/// Fill missing frames for every object with default settings.
///
/// Empty input yields an empty reconstruction.
pub fn reconstruct(observations: &[Observation]) -> Result<Reconstruction, ReconstructError> {
    GapFiller::default().fill(observations)
}

/// Fill one track into a contiguous run of records.
pub fn reconstruct_track(track: &Track) -> Result<Vec<Observation>, ReconstructError> {
    let filler = GapFiller::default();
    filler.check_gaps(track)?;

    let mut output = Vec::with_capacity(track.len());
    let mut stats = ReconstructionStats::default();
    filler.fill_track(track, &mut output, &mut stats);
    Ok(output)
}
