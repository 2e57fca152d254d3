use thiserror::Error;

/// Construction-time precondition failures.
///
/// Per-frame updates never fail; only a degenerate configuration is rejected,
/// before the first frame runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum JourneyError {
    /// A path needs at least two control points to define a direction.
    #[error("path needs at least 2 control points, got {count}")]
    TooFewControlPoints {
        /// Number of control points supplied.
        count: usize,
    },
    /// The proximity threshold must be a positive, finite distance.
    #[error("proximity threshold must be positive and finite, got {0}")]
    InvalidThreshold(f32),
    /// Timeline segments must have a positive, finite duration.
    #[error("timeline segment {index} has invalid duration {duration}")]
    InvalidSegmentDuration {
        /// Position of the offending segment.
        index: usize,
        /// The rejected duration.
        duration: f32,
    },
}
