//! Pairwise box overlap metrics.
//!
//! The suppressor sees box geometry only through `OverlapMetric`, so the
//! same greedy loop serves axis-aligned, rotated, or 3-D boxes. The
//! built-in metric covers axis-aligned corner-format boxes in any spatial
//! dimensionality; rotation-aware metrics plug in from outside.

use crate::util::Scalar;

/// Pairwise overlap between two boxes, as a value in [0, 1].
pub trait OverlapMetric<T> {
    /// Computes the overlap of two coordinate rows (scores excluded).
    ///
    /// Must be pure and symmetric. Degenerate boxes yield 0, never NaN or
    /// a division fault.
    fn overlap(&self, a: &[T], b: &[T]) -> T;
}

/// Intersection-over-union for axis-aligned corner-format boxes.
///
/// Rows are `[min_0, .., min_{k-1}, max_0, .., max_{k-1}]`; the
/// dimensionality comes from the row length, so the same metric serves 2-D
/// boxes (4 coordinates) and 3-D boxes (6 coordinates). Extents are clamped
/// at zero, so inverted or collapsed boxes contribute no volume.
#[derive(Clone, Copy, Debug, Default)]
pub struct AxisAlignedIou;

impl<T: Scalar> OverlapMetric<T> for AxisAlignedIou {
    fn overlap(&self, a: &[T], b: &[T]) -> T {
        let k = a.len() / 2;
        let mut inter = T::one();
        let mut vol_a = T::one();
        let mut vol_b = T::one();
        for axis in 0..k {
            let (lo, hi) = (axis, axis + k);
            inter = inter * (a[hi].min(b[hi]) - a[lo].max(b[lo])).max(T::zero());
            vol_a = vol_a * (a[hi] - a[lo]).max(T::zero());
            vol_b = vol_b * (b[hi] - b[lo]).max(T::zero());
        }
        let union = vol_a + vol_b - inter;
        if union <= T::zero() {
            return T::zero();
        }
        inter / union
    }
}

#[cfg(test)]
mod tests {
    use super::{AxisAlignedIou, OverlapMetric};

    #[test]
    fn iou_matches_known_value_2d() {
        let a = [0.0f32, 0.0, 10.0, 10.0];
        let b = [5.0f32, 5.0, 15.0, 15.0];
        // intersection 25, union 175
        let iou = AxisAlignedIou.overlap(&a, &b);
        assert!((iou - 25.0 / 175.0).abs() < 1e-6);
    }

    #[test]
    fn iou_is_symmetric() {
        let a = [0.0f64, 0.0, 4.0, 3.0];
        let b = [1.0f64, 1.0, 6.0, 2.5];
        assert_eq!(
            AxisAlignedIou.overlap(&a, &b),
            AxisAlignedIou.overlap(&b, &a)
        );
    }

    #[test]
    fn identical_boxes_have_full_overlap() {
        let a = [1.0f32, 2.0, 3.0, 4.0];
        assert!((AxisAlignedIou.overlap(&a, &a) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn disjoint_boxes_have_zero_overlap() {
        let a = [0.0f32, 0.0, 1.0, 1.0];
        let b = [5.0f32, 5.0, 6.0, 6.0];
        assert_eq!(AxisAlignedIou.overlap(&a, &b), 0.0);
    }

    #[test]
    fn degenerate_boxes_yield_zero_not_nan() {
        let flat = [0.0f32, 0.0, 0.0, 0.0];
        let other = [0.0f32, 0.0, 1.0, 1.0];
        assert_eq!(AxisAlignedIou.overlap(&flat, &flat), 0.0);
        assert_eq!(AxisAlignedIou.overlap(&flat, &other), 0.0);
        // inverted corners behave like an empty box
        let inverted = [3.0f32, 3.0, 1.0, 1.0];
        assert_eq!(AxisAlignedIou.overlap(&inverted, &other), 0.0);
    }

    #[test]
    fn iou_covers_three_dimensions() {
        let a = [0.0f32, 0.0, 0.0, 2.0, 2.0, 2.0];
        let b = [1.0f32, 1.0, 1.0, 3.0, 3.0, 3.0];
        // intersection 1, union 15
        let iou = AxisAlignedIou.overlap(&a, &b);
        assert!((iou - 1.0 / 15.0).abs() < 1e-6);
    }
}
