//! Node indexing for canvas documents.
//!
//! Builds O(1) lookup structures over one document snapshot so that the diff
//! engine and the conflict detector never walk a tree more than once.
//!
//! # Key Types
//!
//! - [`NodeIndex`] -- By-id map and by-parent grouping over a document
//! - [`NodeSnapshot`] -- One element with its parent, sibling index, and path
//! - [`NodePath`] -- Structural path from the document root (`artboards[0].children[2]`)

pub mod index;
pub mod path;

pub use index::{build_index, NodeIndex, NodeSnapshot};
pub use path::{format_path, resolve_path, NodePath};
