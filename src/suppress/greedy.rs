//! The greedy suppression core.

use crate::overlap::OverlapMetric;
use crate::tensor::BoxesView;
use crate::util::Scalar;

/// Runs greedy NMS over candidates already in descending-score order.
///
/// `order` holds original box indices, highest score first. A candidate is
/// kept iff its overlap with every previously kept box is at most
/// `thresh + eps`; suppression is final. Returns positions into `order`
/// (local indices) of the kept candidates, in visiting order.
pub(crate) fn suppress_sorted<T, M>(
    boxes: &BoxesView<'_, T>,
    order: &[usize],
    metric: &M,
    thresh: T,
    eps: T,
) -> Vec<usize>
where
    T: Scalar,
    M: OverlapMetric<T>,
{
    let limit = thresh + eps;
    let mut kept: Vec<usize> = Vec::new();

    'candidates: for (local, &original) in order.iter().enumerate() {
        let coords = boxes.coords(original).expect("index within bounds");
        for &kept_local in &kept {
            let kept_coords = boxes
                .coords(order[kept_local])
                .expect("index within bounds");
            if metric.overlap(coords, kept_coords) > limit {
                continue 'candidates;
            }
        }
        kept.push(local);
    }

    kept
}

#[cfg(test)]
mod tests {
    use super::suppress_sorted;
    use crate::overlap::AxisAlignedIou;
    use crate::tensor::BoxesView;

    #[test]
    fn empty_order_keeps_nothing() {
        let data: [f32; 0] = [];
        let view = BoxesView::from_slice(&data, 0, 5).unwrap();
        let kept = suppress_sorted(&view, &[], &AxisAlignedIou, 0.5, 0.0);
        assert!(kept.is_empty());
    }

    #[test]
    fn single_candidate_is_always_kept() {
        let data = [0.0f32, 0.0, 1.0, 1.0, 0.3];
        let view = BoxesView::from_slice(&data, 1, 5).unwrap();
        let kept = suppress_sorted(&view, &[0], &AxisAlignedIou, 0.0, 0.0);
        assert_eq!(kept, vec![0]);
    }

    #[test]
    fn discarded_candidate_is_never_reconsidered() {
        // chain: box 1 overlaps box 0 (suppressed), box 2 overlaps box 1
        // past the threshold but not box 0. Since box 1 is discarded for
        // good, box 2 is only checked against box 0 and survives.
        let data = [
            0.0f32, 0.0, 10.0, 10.0, 0.9, //
            6.0, 0.0, 16.0, 10.0, 0.8, //
            12.0, 0.0, 22.0, 10.0, 0.7,
        ];
        let view = BoxesView::from_slice(&data, 3, 5).unwrap();
        let kept = suppress_sorted(&view, &[0, 1, 2], &AxisAlignedIou, 0.2, 0.0);
        assert_eq!(kept, vec![0, 2]);
    }

    #[test]
    fn eps_widens_the_acceptance_band() {
        // IoU between the two boxes is exactly 81/100
        let data = [
            0.0f32, 0.0, 10.0, 10.0, 0.9, //
            1.0, 1.0, 10.0, 10.0, 0.8,
        ];
        let view = BoxesView::from_slice(&data, 2, 5).unwrap();
        let strict = suppress_sorted(&view, &[0, 1], &AxisAlignedIou, 0.8, 0.0);
        assert_eq!(strict, vec![0]);
        let tolerant = suppress_sorted(&view, &[0, 1], &AxisAlignedIou, 0.8, 0.02);
        assert_eq!(tolerant, vec![0, 1]);
    }
}
