//! Row schema of the observation table.

use crate::bbox::{format_bbox, parse_bbox};
use crate::error::DataError;
use crate::types::{Observation, PlateAnnotation, SENTINEL};
use serde::{Deserialize, Serialize};

/// Column order of written tables.
pub const HEADER: [&str; 7] = [
    "frame_nmr",
    "car_id",
    "car_bbox",
    "license_plate_bbox",
    "license_plate_bbox_score",
    "license_number",
    "license_number_score",
];

/// A row as read from disk. Every column is optional here; [`Columns`]
/// decides whether a `None` was an absent column or an empty cell.
#[derive(Deserialize, Debug, Default, Clone)]
pub struct InputRow {
    pub frame_nmr: Option<String>,
    pub car_id: Option<String>,
    pub car_bbox: Option<String>,
    pub license_plate_bbox: Option<String>,
    pub license_plate_bbox_score: Option<String>,
    pub license_number: Option<String>,
    pub license_number_score: Option<String>,
}

/// A row as written to disk; field order matches [`HEADER`].
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct OutputRow {
    pub frame_nmr: String,
    pub car_id: String,
    pub car_bbox: String,
    pub license_plate_bbox: String,
    pub license_plate_bbox_score: String,
    pub license_number: String,
    pub license_number_score: String,
}

/// Column names declared by a table header.
///
/// The csv crate reads an empty cell into `None`, same as an absent column,
/// so the header decides which of the two a `None` means.
#[derive(Debug, Clone, Default)]
pub struct Columns {
    names: Vec<String>,
}

impl Columns {
    /// Columns of a header record as returned by `csv::Reader::headers`.
    pub fn from_header(header: &csv::StringRecord) -> Self {
        Self {
            names: header.iter().map(str::to_string).collect(),
        }
    }

    /// Every column of [`HEADER`].
    pub fn all() -> Self {
        Self {
            names: HEADER.iter().map(|h| h.to_string()).collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }
}

fn required<'a>(
    row: usize,
    field: &'static str,
    value: &'a Option<String>,
    columns: &Columns,
) -> Result<&'a str, DataError> {
    match value.as_deref() {
        Some(v) => Ok(v),
        None if columns.contains(field) => Err(DataError::parse(row, field, "", "empty value")),
        None => Err(DataError::MissingField { row, field }),
    }
}

fn optional(value: Option<String>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => SENTINEL.to_string(),
    }
}

/// Parse a frame number; must be a non-negative integer.
pub fn parse_frame(row: usize, text: &str) -> Result<u64, DataError> {
    text.trim()
        .parse::<u64>()
        .map_err(|e| DataError::parse(row, "frame_nmr", text, e))
}

/// Parse a car id written either as an integer (`3`) or an integral float (`3.0`).
pub fn parse_object_id(row: usize, text: &str) -> Result<i64, DataError> {
    let trimmed = text.trim();
    if let Ok(id) = trimmed.parse::<i64>() {
        return Ok(id);
    }

    let value: f64 = trimmed
        .parse()
        .map_err(|e| DataError::parse(row, "car_id", text, e))?;
    // i64::MAX is not representable as f64, so the upper bound is exclusive.
    if value.is_finite()
        && value.fract() == 0.0
        && value >= i64::MIN as f64
        && value < i64::MAX as f64
    {
        Ok(value as i64)
    } else {
        Err(DataError::parse(row, "car_id", text, "not an integer id"))
    }
}

impl InputRow {
    /// Convert into an observed record, tagging it with its record index.
    ///
    /// `columns` is the header the row was read under; a required field that
    /// is `None` is a parse error if its column exists and missing otherwise.
    pub fn into_observation(
        self,
        row: usize,
        columns: &Columns,
    ) -> Result<Observation, DataError> {
        let frame = parse_frame(row, required(row, "frame_nmr", &self.frame_nmr, columns)?)?;
        let object_id = parse_object_id(row, required(row, "car_id", &self.car_id, columns)?)?;

        let car_text = required(row, "car_bbox", &self.car_bbox, columns)?;
        let car_bbox =
            parse_bbox(car_text).map_err(|e| DataError::parse(row, "car_bbox", car_text, e))?;

        let plate_text =
            required(row, "license_plate_bbox", &self.license_plate_bbox, columns)?;
        let plate_bbox = parse_bbox(plate_text)
            .map_err(|e| DataError::parse(row, "license_plate_bbox", plate_text, e))?;

        let plate = PlateAnnotation::new(
            optional(self.license_plate_bbox_score),
            optional(self.license_number),
            optional(self.license_number_score),
        );

        Ok(Observation::observed(
            row, frame, object_id, car_bbox, plate_bbox, plate,
        ))
    }
}

impl OutputRow {
    /// Encode an observation; `bracketed` wraps boxes in `[...]`.
    pub fn from_observation(obs: &Observation, bracketed: bool) -> Self {
        Self {
            frame_nmr: obs.frame.to_string(),
            car_id: obs.object_id.to_string(),
            car_bbox: format_bbox(obs.car_bbox, bracketed),
            license_plate_bbox: format_bbox(obs.plate_bbox, bracketed),
            license_plate_bbox_score: obs.plate.bbox_score.clone(),
            license_number: obs.plate.number.clone(),
            license_number_score: obs.plate.number_score.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec4;

    fn sample_row() -> InputRow {
        InputRow {
            frame_nmr: Some("12".to_string()),
            car_id: Some("3.0".to_string()),
            car_bbox: Some("[10.0 20.0 110.0 220.0]".to_string()),
            license_plate_bbox: Some("[40.0 180.0 80.0 200.0]".to_string()),
            license_plate_bbox_score: Some("0.87".to_string()),
            license_number: Some("AB12CDE".to_string()),
            license_number_score: Some("0.55".to_string()),
        }
    }

    #[test]
    fn test_into_observation() {
        let obs = sample_row().into_observation(5, &Columns::all()).unwrap();
        assert_eq!(obs.frame, 12);
        assert_eq!(obs.object_id, 3);
        assert_eq!(obs.car_bbox, DVec4::new(10.0, 20.0, 110.0, 220.0));
        assert_eq!(obs.plate_bbox, DVec4::new(40.0, 180.0, 80.0, 200.0));
        assert_eq!(obs.plate, PlateAnnotation::new("0.87", "AB12CDE", "0.55"));
        assert_eq!(obs.source_row(), Some(5));
    }

    #[test]
    fn test_optional_fields_default_to_sentinel() {
        let mut row = sample_row();
        row.license_plate_bbox_score = None;
        row.license_number = Some("  ".to_string());
        row.license_number_score = Some(String::new());
        let obs = row.into_observation(0, &Columns::all()).unwrap();
        assert!(obs.plate.is_sentinel());
    }

    #[test]
    fn test_missing_required_field() {
        let mut row = sample_row();
        row.car_bbox = None;
        let columns = Columns::from_header(&csv::StringRecord::from(vec![
            "frame_nmr",
            "car_id",
            "license_plate_bbox",
        ]));
        match row.into_observation(9, &columns) {
            Err(DataError::MissingField { row, field }) => {
                assert_eq!(row, 9);
                assert_eq!(field, "car_bbox");
            }
            other => panic!("expected MissingField, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_cell_under_present_column_is_parse_error() {
        let mut row = sample_row();
        row.car_bbox = None;
        match row.into_observation(4, &Columns::all()) {
            Err(DataError::Parse { row, field, value, .. }) => {
                assert_eq!(row, 4);
                assert_eq!(field, "car_bbox");
                assert_eq!(value, "");
            }
            other => panic!("expected Parse, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_box_reports_field_and_value() {
        let mut row = sample_row();
        row.license_plate_bbox = Some("[1 2 3]".to_string());
        match row.into_observation(2, &Columns::all()) {
            Err(DataError::Parse { row, field, value, .. }) => {
                assert_eq!(row, 2);
                assert_eq!(field, "license_plate_bbox");
                assert_eq!(value, "[1 2 3]");
            }
            other => panic!("expected Parse, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_object_id_forms() {
        assert_eq!(parse_object_id(0, "7").unwrap(), 7);
        assert_eq!(parse_object_id(0, " 7.0 ").unwrap(), 7);
        assert_eq!(parse_object_id(0, "-2").unwrap(), -2);
        assert!(parse_object_id(0, "7.5").is_err());
        assert!(parse_object_id(0, "car").is_err());
        assert!(parse_object_id(0, "inf").is_err());
    }

    #[test]
    fn test_parse_frame_rejects_negative_and_float() {
        assert_eq!(parse_frame(0, "0").unwrap(), 0);
        assert!(parse_frame(0, "-1").is_err());
        assert!(parse_frame(0, "1.5").is_err());
        assert!(parse_frame(0, "").is_err());
    }

    #[test]
    fn test_output_row_encoding() {
        let obs = Observation::synthesized(
            4,
            9,
            DVec4::new(1.0, 2.0, 3.5, 4.0),
            DVec4::new(0.0, 0.0, 1.0, 1.0),
        );
        let out = OutputRow::from_observation(&obs, false);
        assert_eq!(out.frame_nmr, "4");
        assert_eq!(out.car_id, "9");
        assert_eq!(out.car_bbox, "1.0 2.0 3.5 4.0");
        assert_eq!(out.license_plate_bbox, "0.0 0.0 1.0 1.0");
        assert_eq!(out.license_plate_bbox_score, "0");
        assert_eq!(out.license_number, "0");
        assert_eq!(out.license_number_score, "0");

        let bracketed = OutputRow::from_observation(&obs, true);
        assert_eq!(bracketed.car_bbox, "[1.0 2.0 3.5 4.0]");
    }
}
