//! Error type used by the crate.

use thiserror::Error;

/// Error enum.
#[derive(Debug, Error)]
pub enum GeometryError {
    /// An argument violates the contract of the called operation: an absent collection member,
    /// a heterogeneous collection passed to a predicate or an overlay operation, a malformed
    /// coordinate list, etc.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The overlay or buffer engine failed because of a robustness issue.
    #[error("topology error: {0}")]
    Topology(String),
    /// The operation is not defined for the given geometry kinds.
    #[error("unsupported operation: {0}")]
    Unsupported(String),
}

impl GeometryError {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}
