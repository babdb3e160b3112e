//! Batched mean-shift merging of noisy cluster centers.
//!
//! Each batch holds N candidate centers in K dimensions. Points iterate
//! toward the uniform-kernel mean of their bandwidth neighborhood, then the
//! converged points are merged into representative clusters by
//! running-centroid proximity. Batches never share state, so the `rayon`
//! feature can process them in parallel without changing any output.

pub(crate) mod shift;

use crate::kernel::{Backend, CpuBackend};
use crate::tensor::PointsView;
use crate::util::{DetPostError, DetPostResult, Scalar};

/// Iteration and bandwidth parameters for `find_clusters`.
#[derive(Clone, Copy, Debug)]
pub struct MergeConfig<T> {
    /// Maximum number of mean-shift rounds per batch.
    pub iterations: usize,
    /// Neighborhood radius of the uniform kernel (Euclidean distance).
    pub bandwidth: T,
    /// Displacement below which a point counts as converged; also the
    /// merge radius when assigning points to clusters.
    pub convergence_eps: T,
}

impl<T: Scalar> Default for MergeConfig<T> {
    fn default() -> Self {
        Self {
            iterations: 10,
            bandwidth: T::one(),
            convergence_eps: T::from_f64(1e-3),
        }
    }
}

impl<T: Scalar> MergeConfig<T> {
    fn validate(&self) -> DetPostResult<()> {
        if self.iterations == 0 {
            return Err(DetPostError::InvalidConfig {
                reason: "iterations must be at least 1",
            });
        }
        if !self.bandwidth.is_finite() || self.bandwidth <= T::zero() {
            return Err(DetPostError::InvalidConfig {
                reason: "bandwidth must be positive and finite",
            });
        }
        if !self.convergence_eps.is_finite() || self.convergence_eps <= T::zero() {
            return Err(DetPostError::InvalidConfig {
                reason: "convergence_eps must be positive and finite",
            });
        }
        Ok(())
    }
}

/// Representative centers for one batch, in cluster-open order.
///
/// Centers live in a flat row-major `len × dims` arena with one membership
/// count per cluster. The arena is preallocated to the batch's point count
/// and holds the actual cluster count after merging.
#[derive(Clone, Debug, PartialEq)]
pub struct ClusterSet<T> {
    centers: Vec<T>,
    counts: Vec<usize>,
    dims: usize,
}

impl<T: Scalar> ClusterSet<T> {
    pub(crate) fn with_capacity(capacity: usize, dims: usize) -> Self {
        Self {
            centers: Vec::with_capacity(capacity * dims),
            counts: Vec::with_capacity(capacity),
            dims,
        }
    }

    /// Returns the number of clusters.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns true if the batch produced no clusters.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Returns the number of coordinates per center.
    pub fn dims(&self) -> usize {
        self.dims
    }

    /// Returns the representative center of cluster `index`.
    pub fn center(&self, index: usize) -> Option<&[T]> {
        if index >= self.counts.len() {
            return None;
        }
        self.centers.get(index * self.dims..(index + 1) * self.dims)
    }

    /// Returns the number of points merged into cluster `index`.
    pub fn count(&self, index: usize) -> Option<usize> {
        self.counts.get(index).copied()
    }

    /// Returns all centers as one flat row-major slice.
    pub fn centers(&self) -> &[T] {
        &self.centers
    }

    /// Index of the first cluster whose representative lies within
    /// `radius` of `point`, scanning in cluster-open order.
    fn find_within(&self, point: &[T], radius: T) -> Option<usize> {
        let radius_sq = radius * radius;
        (0..self.len()).find(|&i| {
            let center = &self.centers[i * self.dims..(i + 1) * self.dims];
            shift::squared_distance(point, center) <= radius_sq
        })
    }

    /// Folds `point` into cluster `index`, moving the representative to
    /// the running mean of its members.
    fn absorb(&mut self, index: usize, point: &[T]) {
        let count = self.counts[index];
        let old_weight = T::from_f64(count as f64);
        let new_weight = T::from_f64((count + 1) as f64);
        let center = &mut self.centers[index * self.dims..(index + 1) * self.dims];
        for (c, &p) in center.iter_mut().zip(point) {
            *c = (*c * old_weight + p) / new_weight;
        }
        self.counts[index] = count + 1;
    }

    /// Opens a new cluster with `point` as its sole member.
    fn open(&mut self, point: &[T]) {
        self.centers.extend_from_slice(point);
        self.counts.push(1);
    }
}

/// Shifts one batch's points to convergence and merges them into clusters.
pub(crate) fn merge_batch<T: Scalar>(
    points: &PointsView<'_, T>,
    batch: usize,
    cfg: &MergeConfig<T>,
) -> ClusterSet<T> {
    let dims = points.dims();
    let count = points.points_per_batch();
    let mut set = ClusterSet::with_capacity(count, dims);
    if count == 0 {
        return set;
    }

    let data = points.batch(batch).expect("batch within bounds");
    let shifted = shift::mean_shift(data, count, dims, cfg);

    // Points are merged in original index order; a point joins the first
    // cluster whose running centroid lies within convergence_eps.
    for point in shifted.chunks_exact(dims) {
        match set.find_within(point, cfg.convergence_eps) {
            Some(index) => set.absorb(index, point),
            None => set.open(point),
        }
    }
    set
}

/// Merges each batch's noisy centers into cluster representatives.
///
/// Returns one `ClusterSet` per batch, in batch order. B = 0 yields an
/// empty result with no computation; a batch with N = 0 yields an empty
/// `ClusterSet`.
pub fn find_clusters<T: Scalar>(
    points: PointsView<'_, T>,
    cfg: &MergeConfig<T>,
) -> DetPostResult<Vec<ClusterSet<T>>> {
    let target = points.target();
    if !CpuBackend::supports(target) {
        return Err(DetPostError::UnsupportedExecutionTarget { target });
    }
    cfg.validate()?;
    CpuBackend::merge_clusters(points, cfg)
}

/// `find_clusters` with batches distributed over the rayon pool.
///
/// Output is identical to the sequential version; only wall-clock time
/// changes.
#[cfg(feature = "rayon")]
pub fn find_clusters_par<T: Scalar>(
    points: PointsView<'_, T>,
    cfg: &MergeConfig<T>,
) -> DetPostResult<Vec<ClusterSet<T>>> {
    let target = points.target();
    if !CpuBackend::supports(target) {
        return Err(DetPostError::UnsupportedExecutionTarget { target });
    }
    cfg.validate()?;
    Ok(crate::kernel::rayon::merge_clusters_par(&points, cfg))
}
