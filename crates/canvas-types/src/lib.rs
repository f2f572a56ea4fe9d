//! Foundation types for canvas documents.
//!
//! A canvas document is a tree: a list of artboards, each holding an ordered
//! list of nodes, where frames nest further nodes under `children`. Every
//! other canvas crate depends on `canvas-types`.
//!
//! # Key Types
//!
//! - [`Document`] -- A full document snapshot (root list of artboards)
//! - [`Artboard`] -- Top-level container on the canvas
//! - [`Node`] -- Tagged union over node kinds (frame, text, component, ...)
//! - [`Element`] -- Borrowed view over either an artboard or a node
//! - [`NodeId`] -- Stable, sortable node identifier
//! - [`ConflictId`] -- UUID v7 identifier for detected merge conflicts

pub mod document;
pub mod error;
pub mod id;
pub mod node;

pub use document::Document;
pub use error::TypeError;
pub use id::{ConflictId, NodeId};
pub use node::{Artboard, Element, FrameNode, Node, NodeAttrs, NodeKind, Rect, TextNode};
