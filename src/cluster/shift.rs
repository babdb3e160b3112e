//! The iterative mean-shift loop.

use crate::cluster::MergeConfig;
use crate::trace::trace_event;
use crate::util::Scalar;

/// Squared Euclidean distance between two equal-length coordinate rows.
pub(crate) fn squared_distance<T: Scalar>(a: &[T], b: &[T]) -> T {
    a.iter()
        .zip(b)
        .map(|(&x, &y)| (x - y) * (x - y))
        .fold(T::zero(), |sum, term| sum + term)
}

/// Runs up to `cfg.iterations` mean-shift rounds over one batch.
///
/// Every round replaces each point with the uniform-kernel mean of all
/// points within `bandwidth`. Updates are synchronous: the round reads one
/// buffer and writes the other, so the result does not depend on point
/// order. A point whose neighborhood weight sum is at or below the floor
/// is left unmoved that round. The whole batch stops early once every
/// point moved less than `convergence_eps`.
///
/// Returns the shifted copy of the points; the input is untouched.
pub(crate) fn mean_shift<T: Scalar>(
    batch: &[T],
    count: usize,
    dims: usize,
    cfg: &MergeConfig<T>,
) -> Vec<T> {
    let mut current = batch[..count * dims].to_vec();
    let mut next = vec![T::zero(); count * dims];
    let radius_sq = cfg.bandwidth * cfg.bandwidth;
    let eps_sq = cfg.convergence_eps * cfg.convergence_eps;

    for round in 0..cfg.iterations {
        let mut converged = true;
        for i in 0..count {
            let point = &current[i * dims..(i + 1) * dims];
            let slot = &mut next[i * dims..(i + 1) * dims];
            slot.fill(T::zero());

            let mut weight = T::zero();
            for other in current.chunks_exact(dims) {
                if squared_distance(point, other) <= radius_sq {
                    weight = weight + T::one();
                    for (accum, &value) in slot.iter_mut().zip(other) {
                        *accum = *accum + value;
                    }
                }
            }

            if weight <= T::WEIGHT_FLOOR {
                // no neighborhood mass: leave the point where it is
                slot.copy_from_slice(point);
            } else {
                for accum in slot.iter_mut() {
                    *accum = *accum / weight;
                }
            }

            if squared_distance(point, slot) >= eps_sq {
                converged = false;
            }
        }
        std::mem::swap(&mut current, &mut next);
        if converged {
            trace_event!("meanshift_converged", round = round);
            break;
        }
    }

    current
}
