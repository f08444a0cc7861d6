//! The errors raised by the stages of the embedding pipeline.

/// The errors raised by the stages of the embedding pipeline.
///
/// Every error is raised at the point of detection and logged just before it
/// is returned. No stage retries or hides an error from an earlier stage.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IsomapError {
    /// A neighborhood parameter (`k` or the radius) is out of range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The graph cannot be used, e.g. it has negative edge weights or it is
    /// disconnected where a complete embedding is required.
    #[error("Invalid graph: {0}")]
    InvalidGraph(String),

    /// The target dimension is not in `1..=n-1` for `n` points.
    #[error("Invalid dimension: requested {requested}, but the largest feasible dimension is {max}")]
    InvalidDimension {
        /// The requested target dimension.
        requested: usize,
        /// The largest feasible target dimension.
        max: usize,
    },

    /// The input distances are malformed, e.g. mismatched index sets, missing
    /// pairs, or a degenerate stress denominator.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// The `Result` type used throughout the crate.
pub type Result<T> = core::result::Result<T, IsomapError>;

impl IsomapError {
    /// Logs and builds an `InvalidParameter` error.
    pub(crate) fn parameter(msg: String) -> Self {
        ftlog::error!("{msg}");
        Self::InvalidParameter(msg)
    }

    /// Logs and builds an `InvalidGraph` error.
    pub(crate) fn graph(msg: String) -> Self {
        ftlog::error!("{msg}");
        Self::InvalidGraph(msg)
    }

    /// Logs and builds an `InvalidDimension` error.
    pub(crate) fn dimension(requested: usize, max: usize) -> Self {
        ftlog::error!("The target dimension must be in [1, {max}], but got {requested}.");
        Self::InvalidDimension { requested, max }
    }

    /// Logs and builds an `InvalidInput` error.
    pub(crate) fn input(msg: String) -> Self {
        ftlog::error!("{msg}");
        Self::InvalidInput(msg)
    }
}
