//! Per-node change classification between two indexes.
//!
//! Every id present in either index lands in at most one [`NodeChange`].
//! Content difference wins over position difference: a node that both moved
//! and changed is reported as `Modified`.

use std::collections::BTreeSet;

use canvas_index::{NodeIndex, NodeSnapshot};
use canvas_types::NodeId;

/// How one node transitioned from the base to the target document.
///
/// Each variant carries exactly the snapshots its operation needs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NodeChange<'a> {
    /// Present in the target only.
    Added { new: &'a NodeSnapshot<'a> },
    /// Present in the base only.
    Removed { old: &'a NodeSnapshot<'a> },
    /// Present in both with different content.
    Modified {
        old: &'a NodeSnapshot<'a>,
        new: &'a NodeSnapshot<'a>,
    },
    /// Present in both with equal content at a different path.
    Moved {
        old: &'a NodeSnapshot<'a>,
        new: &'a NodeSnapshot<'a>,
    },
}

impl<'a> NodeChange<'a> {
    pub fn node_id(&self) -> &'a NodeId {
        match self {
            Self::Added { new } => new.id(),
            Self::Removed { old } => old.id(),
            Self::Modified { new, .. } | Self::Moved { new, .. } => new.id(),
        }
    }
}

/// Classify every id in the union of both indexes, in ascending id order.
///
/// Unchanged nodes produce nothing.
pub fn classify_changes<'a>(base: &'a NodeIndex<'a>, target: &'a NodeIndex<'a>) -> Vec<NodeChange<'a>> {
    let ids: BTreeSet<&NodeId> = base.ids().into_iter().chain(target.ids()).collect();

    ids.into_iter()
        .filter_map(|id| match (base.get(id), target.get(id)) {
            (None, Some(new)) => Some(NodeChange::Added { new }),
            (Some(old), None) => Some(NodeChange::Removed { old }),
            (Some(old), Some(new)) if !old.element.content_eq(&new.element) => {
                Some(NodeChange::Modified { old, new })
            }
            (Some(old), Some(new)) if old.path != new.path => Some(NodeChange::Moved { old, new }),
            _ => None,
        })
        .collect()
}
