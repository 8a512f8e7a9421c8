//! Domain-level errors (no external dependencies)

use std::fmt::Debug;

use thiserror::Error;

/// Errors raised by store, metric, join, centroid, deletion and traversal operations.
///
/// `NotFound` and `Structural` are ordinary results a caller may recover from.
/// `PreconditionViolation` and `Corrupted` signal misuse or a store that was not a
/// valid tree before the call; the operation is aborted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("node not found: {0}")]
    NotFound(String),

    #[error("structural error: {0}")]
    Structural(String),

    #[error("precondition violated: {0}")]
    PreconditionViolation(String),

    #[error("store corrupted: {context}")]
    Corrupted {
        context: String,
        #[source]
        source: Box<GraphError>,
    },
}

impl GraphError {
    pub fn not_found<K: Debug>(key: &K) -> Self {
        Self::NotFound(format!("{:?}", key))
    }

    pub fn structural(message: impl Into<String>) -> Self {
        Self::Structural(message.into())
    }

    pub fn precondition(message: impl Into<String>) -> Self {
        Self::PreconditionViolation(message.into())
    }

    /// Wrap a failure that proves the store was not a tree to begin with.
    pub fn corrupted(context: impl Into<String>, source: GraphError) -> Self {
        Self::Corrupted {
            context: context.into(),
            source: Box::new(source),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn given_missing_key_when_formatting_then_uses_debug_rendering() {
        let err = GraphError::not_found(&"x");
        assert_eq!(err.to_string(), "node not found: \"x\"");
        assert!(err.is_not_found());
    }

    #[test]
    fn given_corrupted_error_when_inspecting_source_then_returns_cause() {
        let err = GraphError::corrupted("reattach", GraphError::structural("no free slot"));
        let source = err.source().map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("structural error: no free slot"));
    }
}
