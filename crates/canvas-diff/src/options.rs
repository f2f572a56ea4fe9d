use serde::{Deserialize, Serialize};

/// Default cap on emitted operations.
pub const DEFAULT_MAX_OPERATIONS: usize = 10_000;

/// Configuration for a single diff call.
///
/// Missing fields take their defaults when deserialized, so a partial
/// config table only overrides what it names.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffOptions {
    /// Diff frame, visibility, and layout facets.
    pub include_property: bool,
    /// Diff text content of text nodes.
    pub include_content: bool,
    /// Diff node names.
    pub include_metadata: bool,
    /// Hard cap on emitted operations; the rest are dropped.
    pub max_operations: usize,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            include_property: true,
            include_content: true,
            include_metadata: true,
            max_operations: DEFAULT_MAX_OPERATIONS,
        }
    }
}

impl DiffOptions {
    /// Only tree-shape changes: adds, removes, and moves.
    pub fn structure_only() -> Self {
        Self {
            include_property: false,
            include_content: false,
            include_metadata: false,
            ..Default::default()
        }
    }

    /// Builder-style: set the operation cap.
    pub fn with_max_operations(mut self, max_operations: usize) -> Self {
        self.max_operations = max_operations;
        self
    }
}
