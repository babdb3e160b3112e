//! Execution backends for the post-processing kernels.
//!
//! The algorithms never branch on the execution target themselves; they
//! are reached through `Backend`, and the entry points refuse targets no
//! backend supports. Adding an accelerator means implementing `Backend`
//! for it, not editing the algorithms.

use crate::cluster::{ClusterSet, MergeConfig};
use crate::overlap::OverlapMetric;
use crate::suppress::SuppressConfig;
use crate::tensor::{BoxesView, PointsView, Target};
use crate::util::{DetPostResult, Scalar};

/// Capability-checked execution strategy.
pub trait Backend {
    /// Returns true if this backend can read buffers resident on `target`.
    fn supports(target: Target) -> bool;

    /// Runs the suppression pipeline over `boxes`.
    fn suppress<T, M>(
        boxes: BoxesView<'_, T>,
        metric: &M,
        cfg: &SuppressConfig<T>,
    ) -> DetPostResult<Vec<usize>>
    where
        T: Scalar,
        M: OverlapMetric<T>;

    /// Runs mean-shift cluster merging over every batch of `points`.
    fn merge_clusters<T: Scalar>(
        points: PointsView<'_, T>,
        cfg: &MergeConfig<T>,
    ) -> DetPostResult<Vec<ClusterSet<T>>>;
}

pub mod cpu;

#[cfg(feature = "rayon")]
pub mod rayon;

pub use cpu::CpuBackend;
