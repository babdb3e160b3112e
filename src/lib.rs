//! detpost is a CPU-first post-processing library for 3D perception
//! proposal stages.
//!
//! It covers the two geometric steps that follow a point/box proposal
//! network: greedy non-maximum suppression of scored boxes with optional
//! top-K pre-filtering and survivor truncation, and batched mean-shift
//! merging of noisy cluster centers. Algorithms are generic over `f32` and
//! `f64`, run through a capability-checked CPU backend, and can process
//! cluster batches in parallel via the `rayon` feature.

pub mod cluster;
pub mod kernel;
pub mod overlap;
pub mod suppress;
pub mod tensor;
mod trace;
pub mod util;

#[cfg(feature = "rayon")]
pub use cluster::find_clusters_par;
pub use cluster::{find_clusters, ClusterSet, MergeConfig};
pub use kernel::{Backend, CpuBackend};
pub use overlap::{AxisAlignedIou, OverlapMetric};
pub use suppress::{non_max_suppression, non_max_suppression_aabb, SuppressConfig};
pub use tensor::{BoxesView, PointsView, Target};
pub use util::{DetPostError, DetPostResult, Scalar};
