//! Structural paths and their canonical string rendering.
//!
//! A path is the list of segments that reaches an element from the document
//! root by direct indexed access: `["artboards", "0", "children", "2"]`.
//! Rendered, numeric segments become `[n]` suffixes and named segments are
//! dot-joined: `artboards[0].children[2]`.

use std::fmt;

use serde::{Deserialize, Serialize};

use canvas_types::{Document, Element, Node};

const ARTBOARDS: &str = "artboards";
const CHILDREN: &str = "children";

/// Location of an element inside a document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodePath(Vec<String>);

impl NodePath {
    /// Build a path from raw segments.
    pub fn new(segments: Vec<String>) -> Self {
        Self(segments)
    }

    /// Path of the artboard at `index`.
    pub fn artboard(index: usize) -> Self {
        Self(vec![ARTBOARDS.to_string(), index.to_string()])
    }

    /// Path of the `index`-th child under this path.
    pub fn child(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(CHILDREN.to_string());
        segments.push(index.to_string());
        Self(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Segments joined with `.`, used as a plain sort key.
    pub fn joined(&self) -> String {
        self.0.join(".")
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_path(&self.0))
    }
}

fn is_index_segment(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}

/// Render a path as a dotted/bracketed string.
///
/// Numeric segments render as `[n]`; named segments are joined with `.`,
/// the first one unprefixed.
pub fn format_path<S: AsRef<str>>(segments: &[S]) -> String {
    let mut out = String::new();
    for (i, segment) in segments.iter().enumerate() {
        let segment = segment.as_ref();
        if is_index_segment(segment) {
            out.push('[');
            out.push_str(segment);
            out.push(']');
        } else {
            if i > 0 {
                out.push('.');
            }
            out.push_str(segment);
        }
    }
    out
}

/// Follow a path from the document root.
///
/// Returns `None` when any segment does not resolve.
pub fn resolve_path<'a>(document: &'a Document, path: &NodePath) -> Option<Element<'a>> {
    let [root, artboard_index, rest @ ..] = path.segments() else {
        return None;
    };
    if root != ARTBOARDS {
        return None;
    }
    let artboard = document
        .artboards
        .get(artboard_index.parse::<usize>().ok()?)?;
    if rest.is_empty() {
        return Some(Element::Artboard(artboard));
    }

    let mut siblings: &'a [Node] = &artboard.children;
    let mut current: Option<&'a Node> = None;
    for pair in rest.chunks(2) {
        let [key, index] = pair else {
            return None;
        };
        if key != CHILDREN {
            return None;
        }
        let node = siblings.get(index.parse::<usize>().ok()?)?;
        siblings = node.children();
        current = Some(node);
    }
    current.map(Element::Node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use canvas_types::Artboard;
    use proptest::prelude::*;

    #[test]
    fn formats_artboard_child_path() {
        assert_eq!(
            format_path(&["artboards", "0", "children", "2"]),
            "artboards[0].children[2]"
        );
    }

    #[test]
    fn formats_named_segments_with_dots() {
        assert_eq!(format_path(&["layout", "padding", "top"]), "layout.padding.top");
        assert_eq!(format_path::<&str>(&[]), "");
        assert_eq!(format_path(&["3"]), "[3]");
    }

    #[test]
    fn node_path_builders() {
        let path = NodePath::artboard(1).child(0).child(4);
        assert_eq!(path.to_string(), "artboards[1].children[0].children[4]");
        assert_eq!(path.joined(), "artboards.1.children.0.children.4");
        assert_eq!(path.len(), 6);
    }

    #[test]
    fn node_path_serializes_as_segment_list() {
        let path = NodePath::artboard(0).child(2);
        let json = serde_json::to_value(&path).unwrap();
        assert_eq!(json, serde_json::json!(["artboards", "0", "children", "2"]));
    }

    fn sample() -> Document {
        Document::new(
            "doc",
            vec![
                Artboard::new("ab0", "First", vec![Node::text("t0", "Text", "a")]),
                Artboard::new(
                    "ab1",
                    "Second",
                    vec![
                        Node::image("img", "Image"),
                        Node::frame("f1", "Frame", vec![Node::vector("v1", "Vector")]),
                    ],
                ),
            ],
        )
    }

    #[test]
    fn resolves_artboards_and_nested_nodes() {
        let doc = sample();
        let ab = resolve_path(&doc, &NodePath::artboard(1)).unwrap();
        assert_eq!(ab.id().as_str(), "ab1");

        let nested = resolve_path(&doc, &NodePath::artboard(1).child(1).child(0)).unwrap();
        assert_eq!(nested.id().as_str(), "v1");
    }

    #[test]
    fn unresolvable_paths_return_none() {
        let doc = sample();
        assert!(resolve_path(&doc, &NodePath::artboard(5)).is_none());
        assert!(resolve_path(&doc, &NodePath::artboard(0).child(3)).is_none());
        assert!(resolve_path(&doc, &NodePath::artboard(1).child(0).child(0)).is_none());
        assert!(resolve_path(&doc, &NodePath::default()).is_none());
        let bogus = NodePath::new(vec!["artboards".into(), "0".into(), "kids".into(), "0".into()]);
        assert!(resolve_path(&doc, &bogus).is_none());
    }

    proptest! {
        #[test]
        fn formatted_path_keeps_every_segment(indices in prop::collection::vec(0usize..50, 1..6)) {
            let mut path = NodePath::artboard(indices[0]);
            for &i in &indices[1..] {
                path = path.child(i);
            }
            let formatted = path.to_string();
            prop_assert!(formatted.starts_with("artboards["));
            prop_assert_eq!(formatted.matches('[').count(), indices.len());
            prop_assert_eq!(formatted.matches(".children").count(), indices.len() - 1);
        }
    }
}
