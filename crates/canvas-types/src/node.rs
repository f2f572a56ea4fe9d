//! Node model: artboards, the node sum type, and borrowed element views.
//!
//! Nodes are an internally tagged union on `"type"`, so a JSON node such as
//! `{"type": "text", "id": "t1", "name": "Title", "text": "Hello"}` maps
//! directly onto [`Node::Text`]. Only frames carry `children`.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::id::NodeId;

/// Position and size of a node on the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Attributes shared by every node kind and by artboards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeAttrs {
    pub id: NodeId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame: Option<Rect>,
    /// Absent means visible.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    /// Opaque layout record, compared structurally.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<Value>,
}

impl NodeAttrs {
    pub fn new(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            frame: None,
            visible: None,
            layout: None,
        }
    }

    /// Visibility with the documented default applied.
    pub fn is_visible(&self) -> bool {
        self.visible.unwrap_or(true)
    }
}

/// A container node whose children are laid out inside it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameNode {
    #[serde(flatten)]
    pub attrs: NodeAttrs,
    #[serde(default)]
    pub children: Vec<Node>,
}

/// A node holding text content.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextNode {
    #[serde(flatten)]
    pub attrs: NodeAttrs,
    #[serde(default)]
    pub text: String,
}

/// A visual node inside an artboard.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Frame(FrameNode),
    Text(TextNode),
    Component(NodeAttrs),
    Vector(NodeAttrs),
    Image(NodeAttrs),
}

impl Node {
    pub fn frame(id: impl Into<NodeId>, name: impl Into<String>, children: Vec<Node>) -> Self {
        Self::Frame(FrameNode {
            attrs: NodeAttrs::new(id, name),
            children,
        })
    }

    pub fn text(id: impl Into<NodeId>, name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Text(TextNode {
            attrs: NodeAttrs::new(id, name),
            text: text.into(),
        })
    }

    pub fn component(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Self::Component(NodeAttrs::new(id, name))
    }

    pub fn vector(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Self::Vector(NodeAttrs::new(id, name))
    }

    pub fn image(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Self::Image(NodeAttrs::new(id, name))
    }

    /// Builder-style: set the frame rectangle.
    pub fn with_frame(mut self, frame: Rect) -> Self {
        self.attrs_mut().frame = Some(frame);
        self
    }

    /// Builder-style: set explicit visibility.
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.attrs_mut().visible = Some(visible);
        self
    }

    /// Builder-style: set the layout record.
    pub fn with_layout(mut self, layout: Value) -> Self {
        self.attrs_mut().layout = Some(layout);
        self
    }

    pub fn attrs(&self) -> &NodeAttrs {
        match self {
            Self::Frame(frame) => &frame.attrs,
            Self::Text(text) => &text.attrs,
            Self::Component(attrs) | Self::Vector(attrs) | Self::Image(attrs) => attrs,
        }
    }

    pub fn attrs_mut(&mut self) -> &mut NodeAttrs {
        match self {
            Self::Frame(frame) => &mut frame.attrs,
            Self::Text(text) => &mut text.attrs,
            Self::Component(attrs) | Self::Vector(attrs) | Self::Image(attrs) => attrs,
        }
    }

    pub fn id(&self) -> &NodeId {
        &self.attrs().id
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Frame(_) => NodeKind::Frame,
            Self::Text(_) => NodeKind::Text,
            Self::Component(_) => NodeKind::Component,
            Self::Vector(_) => NodeKind::Vector,
            Self::Image(_) => NodeKind::Image,
        }
    }

    /// Child nodes; empty for every kind except frames.
    pub fn children(&self) -> &[Node] {
        match self {
            Self::Frame(frame) => &frame.children,
            Self::Text(_) | Self::Component(_) | Self::Vector(_) | Self::Image(_) => &[],
        }
    }

    /// Mutable child list, only available on frames.
    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Self::Frame(frame) => Some(&mut frame.children),
            Self::Text(_) | Self::Component(_) | Self::Vector(_) | Self::Image(_) => None,
        }
    }

    /// Text content; `None` for every kind except text.
    pub fn text_content(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(&text.text),
            Self::Frame(_) | Self::Component(_) | Self::Vector(_) | Self::Image(_) => None,
        }
    }
}

/// Top-level container on the canvas.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Artboard {
    #[serde(flatten)]
    pub attrs: NodeAttrs,
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Artboard {
    pub fn new(id: impl Into<NodeId>, name: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            attrs: NodeAttrs::new(id, name),
            children,
        }
    }
}

/// The closed set of element kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Artboard,
    Frame,
    Text,
    Component,
    Vector,
    Image,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Artboard => "artboard",
            Self::Frame => "frame",
            Self::Text => "text",
            Self::Component => "component",
            Self::Vector => "vector",
            Self::Image => "image",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A borrowed view over either an artboard or a node.
///
/// Indexes store elements rather than nodes so that artboards and nodes can
/// be compared through a single set of accessors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Element<'a> {
    Artboard(&'a Artboard),
    Node(&'a Node),
}

impl<'a> Element<'a> {
    pub fn attrs(&self) -> &'a NodeAttrs {
        match self {
            Self::Artboard(artboard) => &artboard.attrs,
            Self::Node(node) => node.attrs(),
        }
    }

    pub fn id(&self) -> &'a NodeId {
        &self.attrs().id
    }

    pub fn name(&self) -> &'a str {
        &self.attrs().name
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Artboard(_) => NodeKind::Artboard,
            Self::Node(node) => node.kind(),
        }
    }

    pub fn frame(&self) -> Option<&'a Rect> {
        self.attrs().frame.as_ref()
    }

    pub fn is_visible(&self) -> bool {
        self.attrs().is_visible()
    }

    pub fn layout(&self) -> Option<&'a Value> {
        self.attrs().layout.as_ref()
    }

    pub fn text(&self) -> Option<&'a str> {
        match self {
            Self::Artboard(_) => None,
            Self::Node(node) => node.text_content(),
        }
    }

    pub fn children(&self) -> &'a [Node] {
        match self {
            Self::Artboard(artboard) => &artboard.children,
            Self::Node(node) => node.children(),
        }
    }

    /// Returns `true` if both elements carry the same content.
    ///
    /// Compares name, kind, effective visibility, frame, layout, and (for
    /// text nodes) text. Position in the tree and children are not part of
    /// an element's content.
    pub fn content_eq(&self, other: &Element<'_>) -> bool {
        let (a, b) = (self.attrs(), other.attrs());
        a.name == b.name
            && self.kind() == other.kind()
            && a.is_visible() == b.is_visible()
            && a.frame == b.frame
            && a.layout == b.layout
            && self.text() == other.text()
    }

    /// The full element value as JSON.
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        match self {
            Self::Artboard(artboard) => serde_json::to_value(artboard),
            Self::Node(node) => serde_json::to_value(node),
        }
    }
}
