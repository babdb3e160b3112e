//! The suppression pipeline: pre-filter, greedy core, index translation.

use crate::kernel::{Backend, CpuBackend};
use crate::overlap::{AxisAlignedIou, OverlapMetric};
use crate::suppress::greedy::suppress_sorted;
use crate::suppress::order::{prefilter_top_k, score_order_desc};
use crate::tensor::BoxesView;
use crate::trace::{trace_event, trace_span};
use crate::util::{DetPostError, DetPostResult, Scalar};

/// Thresholds and bounds for `non_max_suppression`.
#[derive(Clone, Copy, Debug)]
pub struct SuppressConfig<T> {
    /// Maximum allowed overlap between two kept boxes.
    pub thresh: T,
    /// Tolerance added on top of `thresh` when comparing overlaps.
    pub eps: T,
    /// Keep only this many top-scoring candidates before suppression;
    /// `None` runs suppression over the full set.
    pub pre_max_size: Option<usize>,
    /// Truncate the kept list to this many survivors; `None` keeps all.
    pub post_max_size: Option<usize>,
}

impl<T: Scalar> SuppressConfig<T> {
    /// Creates a config with both size bounds disabled.
    pub fn new(thresh: T, eps: T) -> Self {
        Self {
            thresh,
            eps,
            pre_max_size: None,
            post_max_size: None,
        }
    }

    fn validate(&self) -> DetPostResult<()> {
        if !self.thresh.is_finite() {
            return Err(DetPostError::InvalidConfig {
                reason: "thresh must be finite",
            });
        }
        if !self.eps.is_finite() {
            return Err(DetPostError::InvalidConfig {
                reason: "eps must be finite",
            });
        }
        Ok(())
    }
}

/// Greedy NMS over scored boxes, returning kept original indices.
///
/// The result is ordered by descending score (ties by ascending original
/// index) and always refers to the caller's index space, whether or not
/// pre-filtering ran. An empty box set yields an empty result.
pub fn non_max_suppression<T, M>(
    boxes: BoxesView<'_, T>,
    metric: &M,
    cfg: &SuppressConfig<T>,
) -> DetPostResult<Vec<usize>>
where
    T: Scalar,
    M: OverlapMetric<T>,
{
    let target = boxes.target();
    if !CpuBackend::supports(target) {
        return Err(DetPostError::UnsupportedExecutionTarget { target });
    }
    cfg.validate()?;
    CpuBackend::suppress(boxes, metric, cfg)
}

/// `non_max_suppression` with the built-in axis-aligned IoU metric.
pub fn non_max_suppression_aabb<T: Scalar>(
    boxes: BoxesView<'_, T>,
    cfg: &SuppressConfig<T>,
) -> DetPostResult<Vec<usize>> {
    non_max_suppression(boxes, &AxisAlignedIou, cfg)
}

/// Pipeline body run by the CPU backend.
pub(crate) fn select<T, M>(boxes: &BoxesView<'_, T>, metric: &M, cfg: &SuppressConfig<T>) -> Vec<usize>
where
    T: Scalar,
    M: OverlapMetric<T>,
{
    if boxes.is_empty() {
        return Vec::new();
    }
    let _span = trace_span!("non_max_suppression", boxes = boxes.len()).entered();

    // A position in `order` is a local index, the value stored there the
    // original one, so the same list is the local→original map used after
    // suppression.
    let order = prefilter_top_k(score_order_desc(boxes), cfg.pre_max_size);
    let kept_local = suppress_sorted(boxes, &order, metric, cfg.thresh, cfg.eps);

    let mut kept: Vec<usize> = kept_local.into_iter().map(|local| order[local]).collect();
    if let Some(post) = cfg.post_max_size {
        kept.truncate(post);
    }

    trace_event!("suppression_kept", count = kept.len());
    kept
}
