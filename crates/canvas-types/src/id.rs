use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of a node or artboard.
///
/// Ids are globally unique within a document, survive edits, and are never
/// reused. Ordering is plain string ordering, which gives every consumer a
/// deterministic iteration order over id sets.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Wrap an existing identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique identifier for a detected conflict (UUID v7 for time-ordering).
///
/// Only used for external referencing and as the final sort tiebreak;
/// no detection logic depends on its value.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConflictId(uuid::Uuid);

impl ConflictId {
    /// Generate a new time-ordered conflict ID.
    pub fn generate() -> Self {
        Self(uuid::Uuid::now_v7())
    }

    /// Short representation (first 8 characters of UUID).
    pub fn short_id(&self) -> String {
        self.0.to_string()[..8].to_string()
    }
}

impl fmt::Debug for ConflictId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConflictId({})", self.short_id())
    }
}

impl fmt::Display for ConflictId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn node_id_ordering_is_string_ordering() {
        let a = NodeId::from("a1");
        let b = NodeId::from("b0");
        assert!(a < b);
        assert_eq!(a.as_str(), "a1");
    }

    #[test]
    fn node_id_serializes_as_plain_string() {
        let id = NodeId::from("frame-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"frame-1\"");
        let parsed: NodeId = serde_json::from_str("\"frame-1\"").unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn generated_conflict_ids_are_unique() {
        let ids: HashSet<ConflictId> = (0..1000).map(|_| ConflictId::generate()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn conflict_id_short_form() {
        let id = ConflictId::generate();
        assert_eq!(id.short_id().len(), 8);
        assert!(id.to_string().starts_with(&id.short_id()));
    }

    #[test]
    fn conflict_ids_are_time_ordered() {
        let first = ConflictId::generate();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = ConflictId::generate();
        assert!(first < second);
    }
}
