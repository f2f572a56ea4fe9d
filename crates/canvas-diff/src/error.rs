//! Error types for the diff crate.

use canvas_types::NodeId;

/// Errors that can occur during diff operations.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// A node value could not be converted for an operation payload.
    #[error("failed to serialize node {node_id}: {source}")]
    Serialization {
        node_id: NodeId,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
