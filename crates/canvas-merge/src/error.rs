//! Error types for the merge crate.

use canvas_types::NodeId;

/// Errors that can occur during conflict detection.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// A node value could not be converted for a conflict payload.
    #[error("failed to serialize node {node_id}: {source}")]
    Serialization {
        node_id: NodeId,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience alias for merge results.
pub type MergeResult<T> = Result<T, MergeError>;
