//! Diff operations: the externally visible result unit.
//!
//! Operations are independent of each other; their order carries no meaning
//! but is canonicalized by [`sort_operations`] so identical inputs always
//! produce identical output.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use canvas_index::{NodePath, NodeSnapshot};
use canvas_types::NodeId;

use crate::error::{DiffError, DiffResult};

/// The four operation kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Add,
    Remove,
    Move,
    Modify,
}

impl OperationKind {
    /// Sort priority: removals first, modifications last.
    pub fn priority(&self) -> u8 {
        match self {
            Self::Remove => 0,
            Self::Add => 1,
            Self::Move => 2,
            Self::Modify => 3,
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => write!(f, "add"),
            Self::Remove => write!(f, "remove"),
            Self::Move => write!(f, "move"),
            Self::Modify => write!(f, "modify"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
}

/// The node facet a `modify` operation refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    #[serde(rename = "frame.x")]
    FrameX,
    #[serde(rename = "frame.y")]
    FrameY,
    #[serde(rename = "frame.width")]
    FrameWidth,
    #[serde(rename = "frame.height")]
    FrameHeight,
    #[serde(rename = "visible")]
    Visible,
    #[serde(rename = "layout")]
    Layout,
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "name")]
    Name,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FrameX => "frame.x",
            Self::FrameY => "frame.y",
            Self::FrameWidth => "frame.width",
            Self::FrameHeight => "frame.height",
            Self::Visible => "visible",
            Self::Layout => "layout",
            Self::Text => "text",
            Self::Name => "name",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationMetadata {
    /// Human-readable summary of the change.
    pub description: String,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<NodeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
}

/// A single typed change between two documents.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffOperation {
    #[serde(rename = "type")]
    pub kind: OperationKind,
    pub node_id: NodeId,
    pub path: NodePath,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<Field>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_value: Option<Value>,
    pub metadata: OperationMetadata,
}

fn element_value(snapshot: &NodeSnapshot<'_>) -> DiffResult<Value> {
    snapshot
        .element
        .to_value()
        .map_err(|source| DiffError::Serialization {
            node_id: snapshot.id().clone(),
            source,
        })
}

fn placement(snapshot: &NodeSnapshot<'_>, description: String, severity: Severity) -> OperationMetadata {
    OperationMetadata {
        description,
        severity,
        parent_id: snapshot.parent_id.cloned(),
        index: Some(snapshot.index),
    }
}

impl DiffOperation {
    /// An `add` carrying the full new node.
    pub fn added(new: &NodeSnapshot<'_>) -> DiffResult<Self> {
        let description = format!(
            "Added {} \"{}\" at {}",
            new.element.kind(),
            new.element.name(),
            new.path
        );
        Ok(Self {
            kind: OperationKind::Add,
            node_id: new.id().clone(),
            path: new.path.clone(),
            field: None,
            old_value: None,
            new_value: Some(element_value(new)?),
            metadata: placement(new, description, Severity::Info),
        })
    }

    /// A `remove` carrying the full old node.
    pub fn removed(old: &NodeSnapshot<'_>) -> DiffResult<Self> {
        let description = format!(
            "Removed {} \"{}\" from {}",
            old.element.kind(),
            old.element.name(),
            old.path
        );
        Ok(Self {
            kind: OperationKind::Remove,
            node_id: old.id().clone(),
            path: old.path.clone(),
            field: None,
            old_value: Some(element_value(old)?),
            new_value: None,
            metadata: placement(old, description, Severity::Warning),
        })
    }

    /// A `move` located at the new path; values hold the rendered paths.
    pub fn moved(old: &NodeSnapshot<'_>, new: &NodeSnapshot<'_>) -> Self {
        let description = format!(
            "Moved {} \"{}\" from {} to {}",
            new.element.kind(),
            new.element.name(),
            old.path,
            new.path
        );
        Self {
            kind: OperationKind::Move,
            node_id: new.id().clone(),
            path: new.path.clone(),
            field: None,
            old_value: Some(Value::String(old.path.to_string())),
            new_value: Some(Value::String(new.path.to_string())),
            metadata: placement(new, description, Severity::Info),
        }
    }

    /// A `modify` of one facet of a node, located at its new path.
    pub fn modified(
        new: &NodeSnapshot<'_>,
        field: Field,
        old_value: Option<Value>,
        new_value: Option<Value>,
        description: String,
    ) -> Self {
        Self {
            kind: OperationKind::Modify,
            node_id: new.id().clone(),
            path: new.path.clone(),
            field: Some(field),
            old_value,
            new_value,
            metadata: placement(new, description, Severity::Info),
        }
    }
}

/// Canonical order: kind priority, then dot-joined path, then node id.
///
/// The sort is stable, so facet operations of one node keep their
/// generation order.
pub fn sort_operations(operations: &mut [DiffOperation]) {
    operations.sort_by_cached_key(|op| (op.kind.priority(), op.path.joined(), op.node_id.clone()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use canvas_index::build_index;
    use canvas_types::{Artboard, Document, Node};
    use proptest::prelude::*;
    use serde_json::json;

    fn doc() -> Document {
        Document::new(
            "d",
            vec![Artboard::new(
                "ab",
                "Board",
                vec![Node::frame("f", "Frame", vec![Node::text("t", "Label", "hi")])],
            )],
        )
    }

    #[test]
    fn added_operation_carries_node_and_placement() {
        let d = doc();
        let index = build_index(&d);
        let op = DiffOperation::added(index.get(&NodeId::from("t")).unwrap()).unwrap();

        assert_eq!(op.kind, OperationKind::Add);
        assert_eq!(op.metadata.severity, Severity::Info);
        assert_eq!(op.metadata.parent_id, Some(NodeId::from("f")));
        assert_eq!(op.metadata.index, Some(0));
        assert_eq!(op.new_value.as_ref().unwrap()["text"], json!("hi"));
        assert!(op.metadata.description.contains("artboards[0].children[0].children[0]"));
    }

    #[test]
    fn removed_operation_is_a_warning() {
        let d = doc();
        let index = build_index(&d);
        let op = DiffOperation::removed(index.get(&NodeId::from("f")).unwrap()).unwrap();
        assert_eq!(op.kind, OperationKind::Remove);
        assert_eq!(op.metadata.severity, Severity::Warning);
        assert!(op.old_value.is_some());
        assert!(op.new_value.is_none());
    }

    #[test]
    fn operation_serializes_with_external_field_names() {
        let d = doc();
        let index = build_index(&d);
        let snapshot = index.get(&NodeId::from("t")).unwrap();
        let op = DiffOperation::modified(
            snapshot,
            Field::FrameX,
            Some(json!(0.0)),
            Some(json!(5.0)),
            "frame.x changed".into(),
        );
        let value = serde_json::to_value(&op).unwrap();
        assert_eq!(value["type"], json!("modify"));
        assert_eq!(value["nodeId"], json!("t"));
        assert_eq!(value["field"], json!("frame.x"));
        assert_eq!(value["metadata"]["parentId"], json!("f"));
        assert_eq!(value["path"], json!(["artboards", "0", "children", "0", "children", "0"]));
    }

    #[test]
    fn sort_orders_by_priority_then_path_then_id() {
        let d = doc();
        let index = build_index(&d);
        let frame = index.get(&NodeId::from("f")).unwrap();
        let text = index.get(&NodeId::from("t")).unwrap();

        let mut ops = vec![
            DiffOperation::modified(text, Field::Name, None, None, String::new()),
            DiffOperation::added(text).unwrap(),
            DiffOperation::moved(text, text),
            DiffOperation::removed(text).unwrap(),
            DiffOperation::added(frame).unwrap(),
        ];
        sort_operations(&mut ops);

        let order: Vec<(OperationKind, &str)> =
            ops.iter().map(|op| (op.kind, op.node_id.as_str())).collect();
        assert_eq!(
            order,
            vec![
                (OperationKind::Remove, "t"),
                (OperationKind::Add, "f"),
                (OperationKind::Add, "t"),
                (OperationKind::Move, "t"),
                (OperationKind::Modify, "t"),
            ]
        );
    }

    fn mixed_operations() -> Vec<DiffOperation> {
        let d = doc();
        let index = build_index(&d);
        let snapshots: Vec<&NodeSnapshot<'_>> = ["ab", "f", "t"]
            .iter()
            .filter_map(|id| index.get(&NodeId::from(*id)))
            .collect();
        let mut ops = Vec::new();
        for s in snapshots {
            ops.push(DiffOperation::added(s).unwrap());
            ops.push(DiffOperation::removed(s).unwrap());
            ops.push(DiffOperation::moved(s, s));
            ops.push(DiffOperation::modified(s, Field::Name, None, None, String::new()));
        }
        ops
    }

    proptest! {
        #[test]
        fn sort_is_independent_of_input_order(ops in Just(mixed_operations()).prop_shuffle()) {
            let mut shuffled = ops;
            let mut canonical = mixed_operations();
            sort_operations(&mut canonical);
            sort_operations(&mut shuffled);
            prop_assert_eq!(shuffled, canonical);
        }
    }
}
