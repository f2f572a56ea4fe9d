use serde::{Deserialize, Serialize};

/// Configuration for a single conflict detection call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConflictDetectionOptions {
    /// Delete/modify, concurrent add, and concurrent move.
    pub enable_structural: bool,
    /// Concurrent frame, visibility, and layout edits.
    pub enable_property: bool,
    /// Concurrent text edits.
    pub enable_content: bool,
    /// Concurrent renames.
    pub enable_metadata: bool,
    /// Upper bound on reported conflicts; `None` is unbounded.
    pub max_conflicts: Option<usize>,
}

impl Default for ConflictDetectionOptions {
    fn default() -> Self {
        Self {
            enable_structural: true,
            enable_property: true,
            enable_content: true,
            enable_metadata: true,
            max_conflicts: None,
        }
    }
}

impl ConflictDetectionOptions {
    /// Only tree-shape conflicts.
    pub fn structural_only() -> Self {
        Self {
            enable_property: false,
            enable_content: false,
            enable_metadata: false,
            ..Default::default()
        }
    }
}
