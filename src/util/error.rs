//! Error types for detpost.

use crate::tensor::Target;
use thiserror::Error;

/// Result alias for detpost operations.
pub type DetPostResult<T> = std::result::Result<T, DetPostError>;

/// Errors that can occur when running detpost algorithms.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DetPostError {
    /// A view was declared with dimensions that make no sense.
    #[error("invalid shape: {context} was {value}")]
    InvalidShape {
        /// Which dimension was rejected.
        context: &'static str,
        /// The rejected value.
        value: usize,
    },
    /// The backing slice is shorter than the declared shape requires.
    #[error("buffer too small: need {needed} elements, got {got}")]
    BufferTooSmall {
        /// Elements the declared shape requires.
        needed: usize,
        /// Elements the slice actually holds.
        got: usize,
    },
    /// The data is resident on an execution target no backend implements.
    #[error("unsupported execution target: {target:?}")]
    UnsupportedExecutionTarget {
        /// The target the buffer was declared to live on.
        target: Target,
    },
    /// A configuration value is outside its valid range.
    #[error("invalid config: {reason}")]
    InvalidConfig {
        /// What was wrong with the configuration.
        reason: &'static str,
    },
}
