//! Semantic diff engine for canvas documents.
//!
//! Compares two document snapshots node by node (matched on stable ids, not
//! on position) and produces a canonically ordered list of typed operations
//! plus a per-type summary.
//!
//! # Key Types
//!
//! - [`diff_documents`] / [`DocumentDiff`] -- Entry point and its result
//! - [`DiffOperation`] / [`OperationKind`] -- One add, remove, move, or modify
//! - [`DiffOptions`] -- Facet toggles and the operation cap
//! - [`NodeChange`] -- Per-node classification feeding operation synthesis

pub mod change;
pub mod document_diff;
pub mod error;
pub mod facet;
pub mod operation;
pub mod options;

pub use change::{classify_changes, NodeChange};
pub use document_diff::{diff_documents, DiffMetadata, DiffSummary, DocumentDiff};
pub use error::{DiffError, DiffResult};
pub use operation::{sort_operations, DiffOperation, Field, OperationKind, OperationMetadata, Severity};
pub use options::DiffOptions;
