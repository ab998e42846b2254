//! Core record types for tracked objects.
//!
//! An [`Observation`] ties one frame to one tracked car, its bounding box and
//! the bounding box of the license plate attached to it. Observations read
//! from disk are [`Provenance::Observed`]; the ones the reconstructor fills in
//! are [`Provenance::Synthesized`].

use glam::DVec4;

/// Text written for plate score and label fields that carry no value.
pub const SENTINEL: &str = "0";

/// Where an observation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// Read from the input, at the given zero-based data row.
    Observed { row: usize },
    /// Filled in by interpolation.
    Synthesized,
}

/// Plate detection metadata, kept as source text so real rows round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlateAnnotation {
    /// Confidence of the plate bounding box.
    pub bbox_score: String,
    /// Recognized plate text.
    pub number: String,
    /// Confidence of the recognized text.
    pub number_score: String,
}

impl PlateAnnotation {
    /// Create an annotation from raw field values.
    pub fn new(
        bbox_score: impl Into<String>,
        number: impl Into<String>,
        number_score: impl Into<String>,
    ) -> Self {
        Self {
            bbox_score: bbox_score.into(),
            number: number.into(),
            number_score: number_score.into(),
        }
    }

    /// The placeholder annotation carried by synthesized rows.
    pub fn sentinel() -> Self {
        Self::new(SENTINEL, SENTINEL, SENTINEL)
    }

    /// True when every field holds the sentinel text.
    pub fn is_sentinel(&self) -> bool {
        self.bbox_score == SENTINEL && self.number == SENTINEL && self.number_score == SENTINEL
    }
}

impl Default for PlateAnnotation {
    fn default() -> Self {
        Self::sentinel()
    }
}

/// One tracked car in one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// Frame index in the source video.
    pub frame: u64,
    /// Tracker-assigned identifier of the car.
    pub object_id: i64,
    /// Car bounding box (x1, y1, x2, y2).
    pub car_bbox: DVec4,
    /// License plate bounding box (x1, y1, x2, y2).
    pub plate_bbox: DVec4,
    /// Plate score and text; sentinel on synthesized rows.
    pub plate: PlateAnnotation,
    pub provenance: Provenance,
}

impl Observation {
    /// Create an observation read from input row `row`.
    pub fn observed(
        row: usize,
        frame: u64,
        object_id: i64,
        car_bbox: DVec4,
        plate_bbox: DVec4,
        plate: PlateAnnotation,
    ) -> Self {
        Self {
            frame,
            object_id,
            car_bbox,
            plate_bbox,
            plate,
            provenance: Provenance::Observed { row },
        }
    }

    /// Create an interpolated observation with sentinel plate metadata.
    pub fn synthesized(frame: u64, object_id: i64, car_bbox: DVec4, plate_bbox: DVec4) -> Self {
        Self {
            frame,
            object_id,
            car_bbox,
            plate_bbox,
            plate: PlateAnnotation::sentinel(),
            provenance: Provenance::Synthesized,
        }
    }

    /// True if this record was produced by interpolation.
    pub fn is_synthesized(&self) -> bool {
        matches!(self.provenance, Provenance::Synthesized)
    }

    /// Input row index for observed records.
    pub fn source_row(&self) -> Option<usize> {
        match self.provenance {
            Provenance::Observed { row } => Some(row),
            Provenance::Synthesized => None,
        }
    }

    /// Lookup key shared by all records of the same car and frame.
    pub fn key(&self) -> (i64, u64) {
        (self.object_id, self.frame)
    }
}
