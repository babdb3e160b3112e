//! Deterministic score ordering and top-K pre-filtering.

use crate::tensor::BoxesView;
use crate::util::Scalar;

/// Indices 0..N sorted by descending score, ties by ascending index.
///
/// The returned list doubles as the local→original index map for the
/// suppression pipeline: a position in the list is a local index, the
/// value stored there is the original one.
pub(crate) fn score_order_desc<T: Scalar>(boxes: &BoxesView<'_, T>) -> Vec<usize> {
    let mut order: Vec<usize> = (0..boxes.len()).collect();
    order.sort_by(|&a, &b| {
        let score_a = boxes.score(a).expect("index within bounds");
        let score_b = boxes.score(b).expect("index within bounds");
        score_b.total_order(&score_a).then_with(|| a.cmp(&b))
    });
    order
}

/// Truncates the score ordering to the `k` best candidates.
///
/// `None` disables pre-filtering: the full ordering is kept unchanged and
/// the map stays an identity over the sorted candidate list.
pub(crate) fn prefilter_top_k(mut order: Vec<usize>, k: Option<usize>) -> Vec<usize> {
    if let Some(k) = k {
        order.truncate(k);
    }
    order
}
