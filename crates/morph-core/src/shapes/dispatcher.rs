//! Shape dispatcher.
//!
//! Selects a generator by `ShapeKind` and returns the target position for
//! particle `index` out of `total`, absorbing every degenerate input.

use glam::Vec3;

use super::ShapeKind;

/// Compute the target position for particle `index` on `shape`.
///
/// * `total == 0`, or a non-finite / non-positive `radius`, yields the origin.
/// * `index` past the end is clamped to the last sample.
/// * A generator that still produced a non-finite point collapses to the origin.
pub fn target_for(shape: ShapeKind, index: usize, total: usize, radius: f32) -> Vec3 {
    if total == 0 || !radius.is_finite() || radius <= 0.0 {
        return Vec3::ZERO;
    }
    let index = index.min(total - 1);
    let p = (shape.descriptor().position)(index, total, radius);
    if p.is_finite() {
        p
    } else {
        Vec3::ZERO
    }
}

/// Fill `out` with targets for every index, reusing the allocation.
pub fn fill_targets(shape: ShapeKind, radius: f32, out: &mut [Vec3]) {
    let total = out.len();
    for (i, slot) in out.iter_mut().enumerate() {
        *slot = target_for(shape, i, total, radius);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_total_is_origin() {
        assert_eq!(target_for(ShapeKind::Gear, 0, 0, 100.0), Vec3::ZERO);
    }

    #[test]
    fn non_positive_radius_is_origin() {
        assert_eq!(target_for(ShapeKind::Cloud, 3, 10, 0.0), Vec3::ZERO);
        assert_eq!(target_for(ShapeKind::Cloud, 3, 10, -5.0), Vec3::ZERO);
        assert_eq!(target_for(ShapeKind::Cloud, 3, 10, f32::NAN), Vec3::ZERO);
    }

    #[test]
    fn out_of_range_index_is_clamped() {
        assert_eq!(
            target_for(ShapeKind::Pen, 99, 10, 100.0),
            target_for(ShapeKind::Pen, 9, 10, 100.0)
        );
    }
}
