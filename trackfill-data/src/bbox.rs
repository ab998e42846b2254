//! Text encoding for bounding boxes.
//!
//! Input boxes look like `[10.0 20.0 110.0 220.0]`. Output boxes are written
//! without brackets unless the caller asks for them.

use glam::DVec4;
use thiserror::Error;

/// Reasons a box field can fail to parse.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BBoxFormatError {
    #[error("expected 4 values, found {0}")]
    WrongCount(usize),

    #[error("invalid number {0:?}")]
    BadNumber(String),
}

/// Parse a box written as four whitespace-separated numbers, optionally bracketed.
pub fn parse_bbox(text: &str) -> Result<DVec4, BBoxFormatError> {
    let trimmed = text.trim();
    let inner = trimmed.strip_prefix('[').unwrap_or(trimmed);
    let inner = inner.strip_suffix(']').unwrap_or(inner);

    let mut values = [0.0f64; 4];
    let mut count = 0;
    for token in inner.split_whitespace() {
        let value: f64 = token
            .parse()
            .map_err(|_| BBoxFormatError::BadNumber(token.to_string()))?;
        if count < 4 {
            values[count] = value;
        }
        count += 1;
    }

    if count != 4 {
        return Err(BBoxFormatError::WrongCount(count));
    }
    Ok(DVec4::from_array(values))
}

/// Encode a box as space-separated numbers, wrapped in brackets if `bracketed`.
pub fn format_bbox(bbox: DVec4, bracketed: bool) -> String {
    let body = bbox
        .to_array()
        .iter()
        .map(|v| format_coord(*v))
        .collect::<Vec<_>>()
        .join(" ");
    if bracketed {
        format!("[{}]", body)
    } else {
        body
    }
}

/// Shortest round-trip form, keeping a decimal point on integral values.
pub fn format_coord(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}
