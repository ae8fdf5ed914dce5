//! Error types for curve edits and point-list imports

use thiserror::Error;

/// Refused control-point mutations. The curve is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// The edit would leave a curve without control points
    #[error("invalid operation: {0}")]
    InvalidOperation(&'static str),

    #[error("handle index {index} out of range for {len} control points")]
    OutOfRange { index: usize, len: usize },

    /// The curve already holds as many points as the evaluator supports
    #[error("curve already holds the maximum of {capacity} control points")]
    CapacityExceeded { capacity: usize },
}

/// Fatal import errors; nothing from a failed import reaches the scene.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    #[error("malformed input on line {line}: {reason}")]
    MalformedInput { line: usize, reason: String },
}

impl ImportError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        ImportError::MalformedInput {
            line,
            reason: reason.into(),
        }
    }
}
