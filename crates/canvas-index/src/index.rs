//! The [`NodeIndex`]: O(1) lookup over one document snapshot.
//!
//! Snapshots are stored once in an arena; the by-id map and the by-parent
//! grouping hold positions into it. Parent buckets are keyed by the parent's
//! own arena position (`None` for artboards). The index borrows the document, so it
//! can never outlive or mutate it.
//!
//! # Invariants
//!
//! - Every element appears in exactly one by-parent bucket.
//! - Artboards are the only elements without a parent (bucket `None`).
//! - Each bucket lists snapshots in sibling order.
//! - Every snapshot's path resolves to its element via [`resolve_path`].
//!
//! [`resolve_path`]: crate::path::resolve_path

use std::collections::HashMap;

use tracing::debug;

use canvas_types::{Document, Element, Node, NodeId};

use crate::path::NodePath;

/// One indexed element: the element itself plus where it sits in the tree.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeSnapshot<'a> {
    pub element: Element<'a>,
    /// `None` for artboards.
    pub parent_id: Option<&'a NodeId>,
    /// Position among its siblings.
    pub index: usize,
    pub path: NodePath,
}

impl<'a> NodeSnapshot<'a> {
    pub fn id(&self) -> &'a NodeId {
        self.element.id()
    }

    /// Returns `true` for parentless (artboard-level) snapshots.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// By-id and by-parent lookup over one document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeIndex<'a> {
    snapshots: Vec<NodeSnapshot<'a>>,
    by_id: HashMap<&'a NodeId, usize>,
    by_parent: HashMap<Option<usize>, Vec<usize>>,
}

/// Index every artboard and node of `document`.
pub fn build_index(document: &Document) -> NodeIndex<'_> {
    let mut index = NodeIndex::default();
    for (i, artboard) in document.artboards.iter().enumerate() {
        let path = NodePath::artboard(i);
        let position = index.insert(
            NodeSnapshot {
                element: Element::Artboard(artboard),
                parent_id: None,
                index: i,
                path: path.clone(),
            },
            None,
        );
        index.visit(&artboard.children, &artboard.attrs.id, position, &path);
    }
    debug!(document = %document.id, elements = index.len(), "built node index");
    index
}

impl<'a> NodeIndex<'a> {
    fn insert(&mut self, snapshot: NodeSnapshot<'a>, parent: Option<usize>) -> usize {
        let position = self.snapshots.len();
        self.by_id.insert(snapshot.id(), position);
        self.by_parent.entry(parent).or_default().push(position);
        self.snapshots.push(snapshot);
        position
    }

    fn visit(
        &mut self,
        nodes: &'a [Node],
        parent: &'a NodeId,
        parent_position: usize,
        parent_path: &NodePath,
    ) {
        for (i, node) in nodes.iter().enumerate() {
            let path = parent_path.child(i);
            let position = self.insert(
                NodeSnapshot {
                    element: Element::Node(node),
                    parent_id: Some(parent),
                    index: i,
                    path: path.clone(),
                },
                Some(parent_position),
            );
            if let Node::Frame(frame) = node {
                self.visit(&frame.children, &frame.attrs.id, position, &path);
            }
        }
    }

    /// Number of indexed elements.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Returns `true` if the document had no artboards.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Look up a snapshot by element id.
    pub fn get(&self, id: &NodeId) -> Option<&NodeSnapshot<'a>> {
        self.by_id.get(id).map(|&i| &self.snapshots[i])
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.by_id.contains_key(id)
    }

    /// Snapshots whose parent is `parent`, in sibling order.
    ///
    /// `None` yields the artboards.
    pub fn children_of(&self, parent: Option<&NodeId>) -> impl Iterator<Item = &NodeSnapshot<'a>> {
        let bucket = match parent {
            None => Some(None),
            Some(id) => self.by_id.get(id).map(|&p| Some(p)),
        };
        bucket
            .and_then(|key| self.by_parent.get(&key))
            .into_iter()
            .flatten()
            .map(move |&i| &self.snapshots[i])
    }

    /// All indexed ids in ascending order.
    pub fn ids(&self) -> Vec<&'a NodeId> {
        let mut ids: Vec<&'a NodeId> = self.by_id.keys().copied().collect();
        ids.sort();
        ids
    }

    /// All snapshots in document (pre-order) order.
    pub fn snapshots(&self) -> &[NodeSnapshot<'a>] {
        &self.snapshots
    }
}
