//! Execution-target-tagged views over flat numeric buffers.
//!
//! `BoxesView` and `PointsView` are borrowed, shape-checked views into
//! caller-owned slices. Shape and buffer length are validated at
//! construction so the kernels can index without rechecking. Each view
//! carries the `Target` its buffer is resident on; backends refuse targets
//! they do not support instead of computing a wrong answer.

use crate::util::{DetPostError, DetPostResult};

/// Execution target a buffer is resident on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Target {
    /// Host memory, served by the CPU backend.
    Cpu,
    /// Device memory of a CUDA accelerator. No backend implements this.
    Cuda,
}

impl Target {
    /// Returns true for host-resident data.
    pub fn is_cpu(self) -> bool {
        matches!(self, Target::Cpu)
    }
}

/// Borrowed N×D view of scored boxes.
///
/// Each row is one box: D-1 coordinate columns followed by the score in
/// the last column. The coordinate layout is interpreted by the overlap
/// metric; the built-in axis-aligned metric expects corner format (all
/// minimum corners, then all maximum corners).
#[derive(Clone, Copy)]
pub struct BoxesView<'a, T> {
    data: &'a [T],
    num_boxes: usize,
    row_len: usize,
    target: Target,
}

impl<'a, T> BoxesView<'a, T> {
    /// Shortest meaningful row: two 1-D corners plus a score.
    const MIN_ROW_LEN: usize = 3;

    /// Creates a CPU-resident view with `num_boxes` rows of `row_len` values.
    pub fn from_slice(data: &'a [T], num_boxes: usize, row_len: usize) -> DetPostResult<Self> {
        Self::with_target(data, num_boxes, row_len, Target::Cpu)
    }

    /// Creates a view declaring the target its buffer is resident on.
    pub fn with_target(
        data: &'a [T],
        num_boxes: usize,
        row_len: usize,
        target: Target,
    ) -> DetPostResult<Self> {
        if row_len < Self::MIN_ROW_LEN {
            return Err(DetPostError::InvalidShape {
                context: "box row length (coordinates plus score)",
                value: row_len,
            });
        }
        let needed = num_boxes
            .checked_mul(row_len)
            .ok_or(DetPostError::InvalidShape {
                context: "box count",
                value: num_boxes,
            })?;
        if data.len() < needed {
            return Err(DetPostError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            num_boxes,
            row_len,
            target,
        })
    }

    /// Returns the number of boxes.
    pub fn len(&self) -> usize {
        self.num_boxes
    }

    /// Returns true if the view holds no boxes.
    pub fn is_empty(&self) -> bool {
        self.num_boxes == 0
    }

    /// Returns the number of values per row, score included.
    pub fn row_len(&self) -> usize {
        self.row_len
    }

    /// Returns the execution target the buffer is resident on.
    pub fn target(&self) -> Target {
        self.target
    }

    /// Returns the coordinate columns of box `index` (score excluded).
    pub fn coords(&self, index: usize) -> Option<&'a [T]> {
        if index >= self.num_boxes {
            return None;
        }
        let start = index * self.row_len;
        self.data.get(start..start + self.row_len - 1)
    }
}

impl<T: Copy> BoxesView<'_, T> {
    /// Returns the score of box `index`.
    pub fn score(&self, index: usize) -> Option<T> {
        if index >= self.num_boxes {
            return None;
        }
        self.data.get(index * self.row_len + self.row_len - 1).copied()
    }
}

/// Borrowed B×N×K view of per-batch candidate points.
///
/// B batches of N points each, K coordinates per point, row-major. Batches
/// are logically independent; B = 0 and N = 0 are degenerate-but-valid.
#[derive(Clone, Copy)]
pub struct PointsView<'a, T> {
    data: &'a [T],
    batches: usize,
    points: usize,
    dims: usize,
    target: Target,
}

impl<'a, T> PointsView<'a, T> {
    /// Creates a CPU-resident view of `batches` × `points` × `dims` values.
    pub fn from_slice(
        data: &'a [T],
        batches: usize,
        points: usize,
        dims: usize,
    ) -> DetPostResult<Self> {
        Self::with_target(data, batches, points, dims, Target::Cpu)
    }

    /// Creates a view declaring the target its buffer is resident on.
    pub fn with_target(
        data: &'a [T],
        batches: usize,
        points: usize,
        dims: usize,
        target: Target,
    ) -> DetPostResult<Self> {
        if dims == 0 {
            return Err(DetPostError::InvalidShape {
                context: "point dimensionality",
                value: dims,
            });
        }
        let needed = batches
            .checked_mul(points)
            .and_then(|v| v.checked_mul(dims))
            .ok_or(DetPostError::InvalidShape {
                context: "point batch volume",
                value: batches,
            })?;
        if data.len() < needed {
            return Err(DetPostError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            batches,
            points,
            dims,
            target,
        })
    }

    /// Returns the number of batches.
    pub fn batches(&self) -> usize {
        self.batches
    }

    /// Returns the number of points per batch.
    pub fn points_per_batch(&self) -> usize {
        self.points
    }

    /// Returns the number of coordinates per point.
    pub fn dims(&self) -> usize {
        self.dims
    }

    /// Returns the execution target the buffer is resident on.
    pub fn target(&self) -> Target {
        self.target
    }

    /// Returns the contiguous N×K slice for batch `batch`.
    pub fn batch(&self, batch: usize) -> Option<&'a [T]> {
        if batch >= self.batches {
            return None;
        }
        let stride = self.points * self.dims;
        let start = batch * stride;
        self.data.get(start..start + stride)
    }
}
