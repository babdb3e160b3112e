//! The sequential host-memory backend.

use crate::cluster::{merge_batch, ClusterSet, MergeConfig};
use crate::kernel::Backend;
use crate::overlap::OverlapMetric;
use crate::suppress::{pipeline, SuppressConfig};
use crate::tensor::{BoxesView, PointsView, Target};
use crate::trace::trace_span;
use crate::util::{DetPostResult, Scalar};

/// The reference backend: scalar loops over host memory.
pub struct CpuBackend;

impl Backend for CpuBackend {
    fn supports(target: Target) -> bool {
        target.is_cpu()
    }

    fn suppress<T, M>(
        boxes: BoxesView<'_, T>,
        metric: &M,
        cfg: &SuppressConfig<T>,
    ) -> DetPostResult<Vec<usize>>
    where
        T: Scalar,
        M: OverlapMetric<T>,
    {
        Ok(pipeline::select(&boxes, metric, cfg))
    }

    fn merge_clusters<T: Scalar>(
        points: PointsView<'_, T>,
        cfg: &MergeConfig<T>,
    ) -> DetPostResult<Vec<ClusterSet<T>>> {
        let _span = trace_span!(
            "find_clusters",
            batches = points.batches(),
            points = points.points_per_batch()
        )
        .entered();

        let mut out = Vec::with_capacity(points.batches());
        for batch in 0..points.batches() {
            out.push(merge_batch(&points, batch, cfg));
        }
        Ok(out)
    }
}
