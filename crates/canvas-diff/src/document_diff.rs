//! Document-level diff: the engine entry point.
//!
//! Indexes both documents, classifies each node id, synthesizes operations,
//! applies the operation cap, and sorts the survivors canonically. Neither
//! input is mutated; the result owns all of its data.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use canvas_index::build_index;
use canvas_types::Document;

use crate::change::{classify_changes, NodeChange};
use crate::error::DiffResult;
use crate::facet::facet_operations;
use crate::operation::{sort_operations, DiffOperation, OperationKind};
use crate::options::DiffOptions;

/// Operation counts per kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub total: usize,
    pub added: usize,
    pub removed: usize,
    pub moved: usize,
    pub modified: usize,
}

impl DiffSummary {
    pub fn from_operations(operations: &[DiffOperation]) -> Self {
        let mut summary = Self {
            total: operations.len(),
            ..Default::default()
        };
        for op in operations {
            match op.kind {
                OperationKind::Add => summary.added += 1,
                OperationKind::Remove => summary.removed += 1,
                OperationKind::Move => summary.moved += 1,
                OperationKind::Modify => summary.modified += 1,
            }
        }
        summary
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffMetadata {
    pub from_document_id: String,
    pub to_document_id: String,
    /// When the diff was computed.
    pub timestamp: DateTime<Utc>,
    /// Wall-clock time the diff took.
    pub duration: Duration,
}

/// The result of comparing two documents.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DocumentDiff {
    /// Canonically ordered operations, at most `max_operations` of them.
    pub operations: Vec<DiffOperation>,
    pub summary: DiffSummary,
    pub metadata: DiffMetadata,
}

impl DocumentDiff {
    /// Returns `true` if the documents are equivalent.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Number of operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }
}

fn change_operations(change: &NodeChange<'_>, options: &DiffOptions) -> DiffResult<Vec<DiffOperation>> {
    Ok(match change {
        NodeChange::Added { new } => vec![DiffOperation::added(new)?],
        NodeChange::Removed { old } => vec![DiffOperation::removed(old)?],
        NodeChange::Moved { old, new } => vec![DiffOperation::moved(old, new)],
        NodeChange::Modified { old, new } => facet_operations(old, new, options),
    })
}

/// Compare `base` against `target`.
///
/// Nodes are matched by id. Operations beyond `options.max_operations` are
/// dropped silently; the summary counts only what is returned.
pub fn diff_documents(
    base: &Document,
    target: &Document,
    options: &DiffOptions,
) -> DiffResult<DocumentDiff> {
    let started = Instant::now();
    let timestamp = Utc::now();

    let base_index = build_index(base);
    let target_index = build_index(target);
    let changes = classify_changes(&base_index, &target_index);
    debug!(
        from = %base.id,
        to = %target.id,
        changes = changes.len(),
        "classified node changes"
    );

    let mut operations = Vec::new();
    for change in &changes {
        if operations.len() >= options.max_operations {
            debug!(cap = options.max_operations, "operation cap reached");
            break;
        }
        operations.extend(change_operations(change, options)?);
    }
    operations.truncate(options.max_operations);

    sort_operations(&mut operations);
    let summary = DiffSummary::from_operations(&operations);

    Ok(DocumentDiff {
        operations,
        summary,
        metadata: DiffMetadata {
            from_document_id: base.id.clone(),
            to_document_id: target.id.clone(),
            timestamp,
            duration: started.elapsed(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::{Field, Severity};
    use canvas_types::{Artboard, Node, NodeId, Rect};
    use serde_json::json;

    fn id(s: &str) -> NodeId {
        NodeId::from(s)
    }

    fn sample() -> Document {
        Document::new(
            "doc-a",
            vec![
                Artboard::new(
                    "ab0",
                    "Desktop",
                    vec![
                        Node::frame(
                            "left",
                            "Left",
                            vec![
                                Node::image("photo", "Photo").with_frame(Rect::new(0.0, 0.0, 200.0, 100.0)),
                                Node::text("caption", "Caption", "A sunny day"),
                            ],
                        ),
                        Node::frame("right", "Right", vec![Node::vector("icon", "Icon")]),
                    ],
                ),
                Artboard::new("ab1", "Mobile", vec![Node::component("btn", "Button")]),
            ],
        )
    }

    fn diff(a: &Document, b: &Document) -> DocumentDiff {
        diff_documents(a, b, &DiffOptions::default()).unwrap()
    }

    #[test]
    fn identical_documents_produce_no_operations() {
        let a = sample();
        let result = diff(&a, &a);
        assert!(result.is_empty());
        assert_eq!(result.summary, DiffSummary::default());

        let clone = a.clone();
        let result = diff(&a, &clone);
        assert!(result.is_empty());
        assert_eq!(result.summary.total, 0);
    }

    #[test]
    fn appended_leaf_is_one_add_and_reverse_is_one_remove() {
        let a = sample();
        let mut b = sample();
        b.node_mut(&id("right"))
            .and_then(Node::children_mut)
            .unwrap()
            .push(Node::text("note", "Note", "new"));

        let forward = diff(&a, &b);
        assert_eq!(forward.len(), 1);
        let op = &forward.operations[0];
        assert_eq!(op.kind, OperationKind::Add);
        assert_eq!(op.node_id, id("note"));
        assert_eq!(op.metadata.severity, Severity::Info);
        assert_eq!(op.metadata.parent_id, Some(id("right")));
        assert_eq!(op.metadata.index, Some(1));
        assert_eq!(forward.summary.added, 1);

        let backward = diff(&b, &a);
        assert_eq!(backward.len(), 1);
        assert_eq!(backward.operations[0].kind, OperationKind::Remove);
        assert_eq!(backward.operations[0].node_id, id("note"));
        assert_eq!(backward.operations[0].metadata.severity, Severity::Warning);
        assert_eq!(backward.summary.removed, 1);
    }

    #[test]
    fn reparented_node_is_a_single_move() {
        let a = sample();
        let mut b = sample();
        let caption = b.remove_node(&id("caption")).unwrap();
        b.node_mut(&id("right"))
            .and_then(Node::children_mut)
            .unwrap()
            .push(caption);

        let result = diff(&a, &b);
        assert_eq!(result.len(), 1);
        let op = &result.operations[0];
        assert_eq!(op.kind, OperationKind::Move);
        assert_eq!(op.node_id, id("caption"));
        assert_eq!(op.path.to_string(), "artboards[0].children[1].children[1]");
        assert_eq!(op.old_value, Some(json!("artboards[0].children[0].children[1]")));
        assert_eq!(op.metadata.parent_id, Some(id("right")));
        assert_eq!(result.summary.moved, 1);
    }

    #[test]
    fn moved_and_renamed_node_reports_modify_only() {
        let a = sample();
        let mut b = sample();
        let mut caption = b.remove_node(&id("caption")).unwrap();
        caption.attrs_mut().name = "Subtitle".into();
        b.node_mut(&id("right"))
            .and_then(Node::children_mut)
            .unwrap()
            .push(caption);

        let result = diff(&a, &b);
        assert_eq!(result.len(), 1);
        assert_eq!(result.operations[0].kind, OperationKind::Modify);
        assert_eq!(result.operations[0].field, Some(Field::Name));
    }

    #[test]
    fn partial_frame_change_reports_only_changed_fields() {
        let a = sample();
        let mut b = sample();
        b.node_mut(&id("photo")).unwrap().attrs_mut().frame = Some(Rect::new(0.0, 40.0, 200.0, 100.0));

        let result = diff(&a, &b);
        assert_eq!(result.len(), 1);
        assert_eq!(result.operations[0].field, Some(Field::FrameY));
        assert_eq!(result.summary.modified, 1);
    }

    #[test]
    fn disabled_facets_yield_no_modify_operations() {
        let a = sample();
        let mut b = sample();
        b.node_mut(&id("btn")).unwrap().attrs_mut().name = "Primary".into();

        let options = DiffOptions {
            include_metadata: false,
            ..Default::default()
        };
        let result = diff_documents(&a, &b, &options).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn max_operations_caps_output_and_summary() {
        let a = sample();
        let mut b = sample();
        for i in 0..5 {
            b.artboards[1]
                .children
                .push(Node::vector(format!("extra-{i}"), "Extra"));
        }
        assert_eq!(diff(&a, &b).len(), 5);

        let options = DiffOptions::default().with_max_operations(3);
        let result = diff_documents(&a, &b, &options).unwrap();
        assert_eq!(result.operations.len(), 3);
        assert_eq!(result.summary.total, 3);
        assert_eq!(result.summary.added, 3);

        let none = diff_documents(&a, &b, &DiffOptions::default().with_max_operations(0)).unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn cap_applies_to_facet_operations_of_one_node() {
        let a = sample();
        let mut b = sample();
        b.node_mut(&id("photo")).unwrap().attrs_mut().frame = Some(Rect::new(1.0, 1.0, 1.0, 1.0));

        let result = diff_documents(&a, &b, &DiffOptions::default().with_max_operations(2)).unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result.summary.modified, 2);
    }

    #[test]
    fn operations_are_canonically_ordered() {
        let a = sample();
        let mut b = sample();
        b.remove_node(&id("icon"));
        b.artboards[1].children.push(Node::image("hero", "Hero"));
        b.node_mut(&id("caption")).unwrap().attrs_mut().name = "Credit".into();
        let photo = b.remove_node(&id("photo")).unwrap();
        b.artboards[1].children.push(photo);

        let result = diff(&a, &b);
        let kinds: Vec<OperationKind> = result.operations.iter().map(|op| op.kind).collect();
        let mut sorted = kinds.clone();
        sorted.sort_by_key(OperationKind::priority);
        assert_eq!(kinds, sorted);
        assert_eq!(kinds.first(), Some(&OperationKind::Remove));
        assert_eq!(kinds.last(), Some(&OperationKind::Modify));
    }

    #[test]
    fn repeated_diffs_are_byte_identical() {
        let a = sample();
        let mut b = sample();
        b.remove_node(&id("icon"));
        b.artboards[0].children.push(Node::text("t2", "Body", "Lorem"));
        b.node_mut(&id("caption")).unwrap().attrs_mut().visible = Some(false);

        let first = serde_json::to_string(&diff(&a, &b).operations).unwrap();
        for _ in 0..10 {
            let again = serde_json::to_string(&diff(&a, &b).operations).unwrap();
            assert_eq!(first, again);
        }
    }

    #[test]
    fn inputs_are_not_mutated() {
        let a = sample();
        let mut b = sample();
        b.remove_node(&id("btn"));
        let (a_before, b_before) = (a.clone(), b.clone());
        let _ = diff(&a, &b);
        assert_eq!(a, a_before);
        assert_eq!(b, b_before);
    }

    #[test]
    fn metadata_names_both_documents() {
        let a = sample();
        let mut b = sample();
        b.id = "doc-b".into();
        let result = diff(&a, &b);
        assert_eq!(result.metadata.from_document_id, "doc-a");
        assert_eq!(result.metadata.to_document_id, "doc-b");
        assert!(result.metadata.timestamp <= Utc::now());
    }
}
