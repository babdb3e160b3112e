//! Scalar abstraction shared by the suppression and clustering kernels.

use std::cmp::Ordering;

use num_traits::Float;

/// Floating-point scalar the algorithms are generic over.
///
/// One generic code path instantiated for `f32` and `f64` replaces
/// per-precision dispatch.
pub trait Scalar: Float + Send + Sync + 'static {
    /// Neighborhood weight sums at or below this floor leave a point
    /// unmoved instead of dividing by a near-zero mass.
    const WEIGHT_FLOOR: Self;

    /// Lossy conversion from `f64`, for configuration defaults.
    fn from_f64(value: f64) -> Self;

    /// Total ordering including NaN, for deterministic score sorting.
    fn total_order(&self, other: &Self) -> Ordering;
}

impl Scalar for f32 {
    const WEIGHT_FLOOR: Self = 1e-6;

    fn from_f64(value: f64) -> Self {
        value as f32
    }

    fn total_order(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}

impl Scalar for f64 {
    const WEIGHT_FLOOR: Self = 1e-6;

    fn from_f64(value: f64) -> Self {
        value
    }

    fn total_order(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}
