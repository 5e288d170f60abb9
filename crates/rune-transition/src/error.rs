//! Error types for transition construction.
//!
//! Nothing on the per-tick path returns an error: missing metrics, empty filters and
//! rejected gestures all degrade to "no style". These errors only surface while
//! building interpolations and filters.

use thiserror::Error;

/// Result type for transition construction.
pub type Result<T> = std::result::Result<T, TransitionError>;

/// Errors that can occur while building transitions.
#[derive(Error, Debug)]
pub enum TransitionError {
    /// Interpolation needs at least two stops.
    #[error("interpolation needs at least 2 stops, got {0}")]
    TooFewStops(usize),

    /// Input and output ranges differ in length.
    #[error("input range has {input} stops but output range has {output}")]
    RangeLengthMismatch { input: usize, output: usize },

    /// Input stops must be strictly increasing and inside [0, 1].
    #[error("input range must be strictly increasing within [0, 1]: {0:?}")]
    InvalidInputRange(Vec<f64>),

    /// An angle literal could not be parsed.
    #[error("invalid angle literal: {0:?}")]
    InvalidAngle(String),

    /// A filter pattern failed to compile.
    #[error("invalid filter pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}
