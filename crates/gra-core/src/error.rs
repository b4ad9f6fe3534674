//! Error types for graph construction and access.

use thiserror::Error;

/// Result type alias for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;

/// Errors that can occur while building or querying a [`Graph`](crate::Graph).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// Adjacency is not square or not symmetric, or the state vector has the
    /// wrong length.
    #[error("shape error: {message}")]
    Shape { message: String },

    /// A vertex index outside `[0, order)` was passed to an accessor.
    #[error("vertex index {index} out of range for graph of order {order}")]
    Index { index: usize, order: usize },
}

impl GraphError {
    pub(crate) fn shape(message: impl Into<String>) -> Self {
        Self::Shape {
            message: message.into(),
        }
    }
}
