//! Three-way conflict detection over indexed snapshots.
//!
//! Every id in the union of the three indexes is classified once. Structural
//! rules look at presence and parentage; facet rules look at nodes present on
//! all three sides and flag a facet only when both branches changed it away
//! from base and disagree with each other. Id combinations that match no rule
//! emit nothing.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use canvas_index::{build_index, NodeIndex, NodeSnapshot};
use canvas_types::{Document, NodeId, NodeKind};

use crate::conflict::{sort_conflicts, Conflict, ConflictCode, ConflictSeverity};
use crate::error::{MergeError, MergeResult};
use crate::options::ConflictDetectionOptions;

/// The three snapshots of a merge.
#[derive(Clone, Copy, Debug)]
pub struct MergeInput<'a> {
    /// Common ancestor.
    pub base: &'a Document,
    pub local: &'a Document,
    pub remote: &'a Document,
}

/// The result of conflict detection.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConflictReport {
    /// Canonically ordered conflicts.
    pub conflicts: Vec<Conflict>,
    /// Soft signals that do not block a merge.
    pub warnings: Vec<String>,
}

impl ConflictReport {
    /// Returns `true` if no conflicts were detected.
    pub fn is_empty(&self) -> bool {
        self.conflicts.is_empty()
    }

    /// Returns `true` if any conflict has error severity.
    pub fn has_errors(&self) -> bool {
        self.conflicts
            .iter()
            .any(|c| c.severity == ConflictSeverity::Error)
    }
}

struct Sides<'a> {
    base: NodeIndex<'a>,
    local: NodeIndex<'a>,
    remote: NodeIndex<'a>,
}

fn node_value(snapshot: &NodeSnapshot<'_>) -> MergeResult<Value> {
    snapshot
        .element
        .to_value()
        .map_err(|source| MergeError::Serialization {
            node_id: snapshot.id().clone(),
            source,
        })
}

fn describe(snapshot: &NodeSnapshot<'_>) -> String {
    format!("{} \"{}\"", snapshot.element.kind(), snapshot.element.name())
}

fn parent_label(parent: Option<&NodeId>) -> String {
    parent.map_or_else(|| "<root>".to_string(), |p| p.to_string())
}

/// Detect conflicts between `local` and `remote` relative to `base`.
///
/// Never fails for well-formed documents; ambiguous cases are skipped rather
/// than guessed at.
pub fn detect_conflicts(
    input: &MergeInput<'_>,
    options: &ConflictDetectionOptions,
) -> MergeResult<ConflictReport> {
    let sides = Sides {
        base: build_index(input.base),
        local: build_index(input.local),
        remote: build_index(input.remote),
    };

    let ids: BTreeSet<&NodeId> = sides
        .base
        .ids()
        .into_iter()
        .chain(sides.local.ids())
        .chain(sides.remote.ids())
        .collect();

    let mut conflicts = Vec::new();
    for id in ids {
        let snapshots = (sides.base.get(id), sides.local.get(id), sides.remote.get(id));
        if options.enable_structural {
            if let Some(conflict) = structural_conflict(snapshots)? {
                conflicts.push(conflict);
            }
        }
        if let (Some(base), Some(local), Some(remote)) = snapshots {
            conflicts.extend(facet_conflicts(base, local, remote, options));
        }
    }
    debug!(
        base = %input.base.id,
        local = %input.local.id,
        remote = %input.remote.id,
        conflicts = conflicts.len(),
        "detected conflicts"
    );

    sort_conflicts(&mut conflicts);

    let mut warnings = Vec::new();
    if let Some(max) = options.max_conflicts {
        if conflicts.len() > max {
            warnings.push(format!(
                "{} conflicts detected; report truncated to {max}",
                conflicts.len()
            ));
            conflicts.truncate(max);
        }
    }

    Ok(ConflictReport {
        conflicts,
        warnings,
    })
}

type Triple<'i, 'a> = (
    Option<&'i NodeSnapshot<'a>>,
    Option<&'i NodeSnapshot<'a>>,
    Option<&'i NodeSnapshot<'a>>,
);

fn structural_conflict(snapshots: Triple<'_, '_>) -> MergeResult<Option<Conflict>> {
    let conflict = match snapshots {
        (Some(base), None, Some(remote)) if !remote.is_root() => Some(
            Conflict::new(
                ConflictCode::DeleteModify,
                base.path.clone(),
                format!("{} was deleted locally but kept remotely", describe(base)),
            )
            .with_values(Some(node_value(base)?), None, Some(node_value(remote)?)),
        ),
        (Some(base), Some(local), None) if !local.is_root() => Some(
            Conflict::new(
                ConflictCode::DeleteModify,
                base.path.clone(),
                format!("{} was deleted remotely but kept locally", describe(base)),
            )
            .with_values(Some(node_value(base)?), Some(node_value(local)?), None),
        ),
        (None, Some(local), Some(remote))
            if !local.is_root() && !remote.is_root() && !local.element.content_eq(&remote.element) =>
        {
            Some(
                Conflict::new(
                    ConflictCode::AddAdd,
                    local.path.clone(),
                    format!(
                        "{} was added on both sides with different content",
                        local.id()
                    ),
                )
                .with_values(None, Some(node_value(local)?), Some(node_value(remote)?)),
            )
        }
        (Some(base), Some(local), Some(remote)) => move_conflict(base, local, remote),
        _ => None,
    };
    Ok(conflict)
}

/// Only frames are checked for concurrent re-parenting.
fn move_conflict(
    base: &NodeSnapshot<'_>,
    local: &NodeSnapshot<'_>,
    remote: &NodeSnapshot<'_>,
) -> Option<Conflict> {
    let base_parent = base.parent_id?;
    let diverged = local.parent_id != remote.parent_id
        && local.parent_id != Some(base_parent)
        && remote.parent_id != Some(base_parent);
    let frames = local.element.kind() == NodeKind::Frame && remote.element.kind() == NodeKind::Frame;
    if !(diverged && frames) {
        return None;
    }

    let (local_parent, remote_parent) = (parent_label(local.parent_id), parent_label(remote.parent_id));
    Some(
        Conflict::new(
            ConflictCode::MoveMove,
            base.path.clone(),
            format!(
                "{} was moved to different parents: {local_parent} locally, {remote_parent} remotely",
                describe(base)
            ),
        )
        .with_values(
            Some(json!(base_parent)),
            Some(json!(local_parent)),
            Some(json!(remote_parent)),
        ),
    )
}

/// Both branches changed the value away from base and disagree.
fn diverges<T: PartialEq>(base: T, local: T, remote: T) -> bool {
    base != local && base != remote && local != remote
}

fn facet_conflicts(
    base: &NodeSnapshot<'_>,
    local: &NodeSnapshot<'_>,
    remote: &NodeSnapshot<'_>,
    options: &ConflictDetectionOptions,
) -> Vec<Conflict> {
    let mut conflicts = Vec::new();
    let (b, l, r) = (&base.element, &local.element, &remote.element);
    let mut push = |code: ConflictCode, values: (Value, Value, Value), facet: &str| {
        conflicts.push(
            Conflict::new(
                code,
                base.path.clone(),
                format!("{facet} of {} was changed differently on both sides", describe(base)),
            )
            .with_values(Some(values.0), Some(values.1), Some(values.2)),
        );
    };

    if options.enable_property {
        if diverges(b.frame(), l.frame(), r.frame()) {
            push(ConflictCode::Frame, (json!(b.frame()), json!(l.frame()), json!(r.frame())), "frame");
        }
        if diverges(b.is_visible(), l.is_visible(), r.is_visible()) {
            push(
                ConflictCode::Visibility,
                (json!(b.is_visible()), json!(l.is_visible()), json!(r.is_visible())),
                "visibility",
            );
        }
        if diverges(b.layout(), l.layout(), r.layout()) {
            push(ConflictCode::Layout, (json!(b.layout()), json!(l.layout()), json!(r.layout())), "layout");
        }
    }

    if options.enable_content {
        if let (Some(bt), Some(lt), Some(rt)) = (b.text(), l.text(), r.text()) {
            if diverges(bt, lt, rt) {
                push(ConflictCode::Text, (json!(bt), json!(lt), json!(rt)), "text");
            }
        }
    }

    if options.enable_metadata && diverges(b.name(), l.name(), r.name()) {
        push(ConflictCode::Name, (json!(b.name()), json!(l.name()), json!(r.name())), "name");
    }

    conflicts
}
