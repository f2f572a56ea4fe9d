//! Facet-level diff of a modified node.
//!
//! Frame fields are reported independently so a resize shows up as a width
//! or height change only. Frames missing on either side are skipped. Missing
//! visibility counts as visible. Layout is one combined operation.

use serde_json::{json, Value};
use similar::TextDiff;

use canvas_index::NodeSnapshot;

use crate::operation::{DiffOperation, Field};
use crate::options::DiffOptions;

/// All `modify` operations for one node, gated by `options`.
///
/// Node kind is not a facet: a kind change with no facet change yields no
/// operations.
pub fn facet_operations(
    old: &NodeSnapshot<'_>,
    new: &NodeSnapshot<'_>,
    options: &DiffOptions,
) -> Vec<DiffOperation> {
    let mut operations = Vec::new();
    let name = new.element.name();

    let mut push = |field: Field, old_value: Option<Value>, new_value: Option<Value>, detail: String| {
        let description = format!("{field} of \"{name}\" {detail}");
        operations.push(DiffOperation::modified(new, field, old_value, new_value, description));
    };

    if options.include_property {
        if let (Some(a), Some(b)) = (old.element.frame(), new.element.frame()) {
            let fields = [
                (Field::FrameX, a.x, b.x),
                (Field::FrameY, a.y, b.y),
                (Field::FrameWidth, a.width, b.width),
                (Field::FrameHeight, a.height, b.height),
            ];
            for (field, before, after) in fields {
                if before != after {
                    push(
                        field,
                        Some(json!(before)),
                        Some(json!(after)),
                        format!("changed from {before} to {after}"),
                    );
                }
            }
        }

        let (before, after) = (old.element.is_visible(), new.element.is_visible());
        if before != after {
            let detail = if after { "shown" } else { "hidden" };
            push(Field::Visible, Some(json!(before)), Some(json!(after)), detail.to_string());
        }

        if old.element.layout() != new.element.layout() {
            push(
                Field::Layout,
                old.element.layout().cloned(),
                new.element.layout().cloned(),
                "changed".to_string(),
            );
        }
    }

    if options.include_content {
        if let (Some(before), Some(after)) = (old.element.text(), new.element.text()) {
            if before != after {
                let similarity = TextDiff::from_chars(before, after).ratio();
                push(
                    Field::Text,
                    Some(json!(before)),
                    Some(json!(after)),
                    format!("changed ({:.0}% similar)", similarity * 100.0),
                );
            }
        }
    }

    if options.include_metadata {
        let (before, after) = (old.element.name(), new.element.name());
        if before != after {
            push(
                Field::Name,
                Some(json!(before)),
                Some(json!(after)),
                format!("renamed from \"{before}\""),
            );
        }
    }

    operations
}
