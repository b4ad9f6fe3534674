//! Error types for rule decoding and evolution.

use gra_core::GraphError;
use thiserror::Error;

/// Result type alias for automaton operations.
pub type AutomatonResult<T> = Result<T, AutomatonError>;

/// Errors that can occur while decoding rules or evolving graphs.
#[derive(Debug, Error)]
pub enum AutomatonError {
    /// A numeric input (rule number, degree, table, setting) is out of range.
    #[error("out of range: {message}")]
    Range { message: String },

    /// A configuration index outside `[0, config_count)` was looked up.
    #[error("configuration {configuration} outside [0, {config_count})")]
    Domain {
        configuration: usize,
        config_count: usize,
    },

    /// The graph is not simple, binary-stated and regular of the rule's degree.
    #[error("graph does not satisfy the rule's precondition: {message}")]
    Regularity { message: String },

    /// Graph construction or access error.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// Description serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AutomatonError {
    pub(crate) fn range(message: impl Into<String>) -> Self {
        Self::Range {
            message: message.into(),
        }
    }

    pub(crate) fn regularity(message: impl Into<String>) -> Self {
        Self::Regularity {
            message: message.into(),
        }
    }
}
