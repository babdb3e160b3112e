//! Rayon-parallel batch processing (feature-gated).
//!
//! Batches of the cluster merger are independent, so they map across the
//! rayon pool with zero shared mutable state, each writing its own output
//! slot. Results are identical to the sequential backend.

use crate::cluster::{merge_batch, ClusterSet, MergeConfig};
use crate::tensor::PointsView;
use crate::util::Scalar;
use rayon::prelude::*;

/// Merges every batch in parallel, one rayon task per batch.
pub(crate) fn merge_clusters_par<T: Scalar>(
    points: &PointsView<'_, T>,
    cfg: &MergeConfig<T>,
) -> Vec<ClusterSet<T>> {
    (0..points.batches())
        .into_par_iter()
        .map(|batch| merge_batch(points, batch, cfg))
        .collect()
}
