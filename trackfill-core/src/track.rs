//! Grouping observations into per-object tracks

use crate::error::ReconstructError;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;
use trackfill_data::Observation;

/// All real observations of one object, sorted by frame with no duplicates.
#[derive(Debug, Clone)]
pub struct Track {
    object_id: i64,
    observations: Vec<Observation>,
}

impl Track {
    pub fn object_id(&self) -> i64 {
        self.object_id
    }

    /// Observations in ascending frame order.
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn first_frame(&self) -> Option<u64> {
        self.observations.first().map(|o| o.frame)
    }

    pub fn last_frame(&self) -> Option<u64> {
        self.observations.last().map(|o| o.frame)
    }

    /// Number of frames from first to last observation, inclusive.
    ///
    /// Saturates at `u64::MAX` for a track covering every frame number.
    pub fn span(&self) -> u64 {
        match (self.first_frame(), self.last_frame()) {
            (Some(first), Some(last)) => (last - first).saturating_add(1),
            _ => 0,
        }
    }

    /// Number of frames inside the span with no observation.
    pub fn missing_frames(&self) -> u64 {
        self.span().saturating_sub(self.observations.len() as u64)
    }
}

/// Partition observations by object id, in ascending id order.
///
/// Each track is sorted by frame, so callers need not pre-sort the input.
/// Returns [`ReconstructError::DuplicateFrame`] if an `(object_id, frame)`
/// pair occurs more than once.
pub fn group_tracks(observations: &[Observation]) -> Result<Vec<Track>, ReconstructError> {
    let mut index: HashMap<(i64, u64), usize> = HashMap::with_capacity(observations.len());
    let mut groups: BTreeMap<i64, Vec<Observation>> = BTreeMap::new();

    for (i, obs) in observations.iter().enumerate() {
        if let Some(&first) = index.get(&obs.key()) {
            return Err(ReconstructError::DuplicateFrame {
                object_id: obs.object_id,
                frame: obs.frame,
                first_row: observations[first].source_row(),
                second_row: obs.source_row(),
            });
        }
        index.insert(obs.key(), i);
        groups.entry(obs.object_id).or_default().push(obs.clone());
    }

    let tracks: Vec<Track> = groups
        .into_iter()
        .map(|(object_id, mut observations)| {
            observations.sort_by_key(|o| o.frame);
            Track {
                object_id,
                observations,
            }
        })
        .collect();

    debug!(
        "Grouped {} observations into {} tracks",
        observations.len(),
        tracks.len()
    );
    Ok(tracks)
}
