//! Linear interpolation of bounding boxes across missing frames

use glam::DVec4;
use trackfill_data::Observation;

/// Interpolate between two boxes component-wise: `from + t * (to - from)`.
pub fn lerp_box(from: DVec4, to: DVec4, t: f64) -> DVec4 {
    from + (to - from) * t
}

/// Synthesize the records strictly between `prev` and `next`.
///
/// Both must belong to the same object with `prev.frame < next.frame`.
/// Returns an empty vector when the frames are adjacent.
pub fn fill_gap(prev: &Observation, next: &Observation) -> Vec<Observation> {
    debug_assert_eq!(prev.object_id, next.object_id);
    debug_assert!(prev.frame < next.frame);

    let width = (next.frame - prev.frame) as f64;
    (prev.frame + 1..next.frame)
        .map(|frame| {
            let t = (frame - prev.frame) as f64 / width;
            Observation::synthesized(
                frame,
                prev.object_id,
                lerp_box(prev.car_bbox, next.car_bbox, t),
                lerp_box(prev.plate_bbox, next.plate_bbox, t),
            )
        })
        .collect()
}
