use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::id::NodeId;
use crate::node::{Artboard, Node};

/// A canvas document snapshot.
///
/// Documents are assumed to be schema-valid on arrival: ids unique, only
/// frames holding children. Nothing in this crate re-validates that.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub artboards: Vec<Artboard>,
}

impl Document {
    pub fn new(id: impl Into<String>, artboards: Vec<Artboard>) -> Self {
        Self {
            id: id.into(),
            name: None,
            artboards,
        }
    }

    /// Parse a document from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self, TypeError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Render the document as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, TypeError> {
        serde_json::to_string_pretty(self).map_err(|e| TypeError::Serialization(e.to_string()))
    }

    /// Total number of artboards and nodes.
    pub fn element_count(&self) -> usize {
        fn count(nodes: &[Node]) -> usize {
            nodes.iter().map(|n| 1 + count(n.children())).sum()
        }
        self.artboards
            .iter()
            .map(|a| 1 + count(&a.children))
            .sum()
    }

    /// Find a node (not an artboard) anywhere in the tree for in-place edits.
    pub fn node_mut(&mut self, id: &NodeId) -> Option<&mut Node> {
        fn find<'a>(nodes: &'a mut [Node], id: &NodeId) -> Option<&'a mut Node> {
            for node in nodes {
                if node.id() == id {
                    return Some(node);
                }
                if let Some(children) = node.children_mut() {
                    if let Some(found) = find(children, id) {
                        return Some(found);
                    }
                }
            }
            None
        }
        self.artboards
            .iter_mut()
            .find_map(|a| find(&mut a.children, id))
    }

    /// Remove a node (and its subtree) from wherever it sits in the tree.
    pub fn remove_node(&mut self, id: &NodeId) -> Option<Node> {
        fn remove(nodes: &mut Vec<Node>, id: &NodeId) -> Option<Node> {
            if let Some(pos) = nodes.iter().position(|n| n.id() == id) {
                return Some(nodes.remove(pos));
            }
            nodes
                .iter_mut()
                .filter_map(|n| n.children_mut())
                .find_map(|children| remove(children, id))
        }
        self.artboards
            .iter_mut()
            .find_map(|a| remove(&mut a.children, id))
    }
}
