//! Conditional tracing macros (zero-cost when the feature is disabled).
//!
//! `trace_span!` and `trace_event!` forward to `tracing` when the `tracing`
//! feature is on, and compile to no-ops otherwise, so call sites never need
//! conditional compilation.

/// Creates an info-level span around a major operation.
#[cfg(feature = "tracing")]
macro_rules! trace_span {
    ($name:expr $(, $($field:tt)*)?) => {
        tracing::info_span!($name $(, $($field)*)?)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_span {
    ($name:expr $(, $($field:tt)*)?) => {
        $crate::trace::NoopSpan
    };
}

/// Emits an info-level event for a key measurement.
#[cfg(feature = "tracing")]
macro_rules! trace_event {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        tracing::info!(name: $name, $($key = $value),+)
    };
    ($name:expr) => {
        tracing::info!(name: $name)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_event {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        // Values are evaluated and discarded to keep call sites warning-free.
        let _ = ($($value,)+);
    };
    ($name:expr) => {};
}

pub(crate) use trace_event;
pub(crate) use trace_span;

/// No-op span guard used when tracing is disabled.
///
/// Lets `let _guard = trace_span!(...).entered();` compile unchanged with
/// the feature off.
#[cfg(not(feature = "tracing"))]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    /// Returns self, mimicking `Span::entered()`.
    #[inline]
    pub fn entered(self) -> Self {
        self
    }
}
