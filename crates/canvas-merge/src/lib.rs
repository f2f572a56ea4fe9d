//! Three-way conflict detection for canvas documents.
//!
//! Given a common ancestor (`base`) and two divergent snapshots (`local`,
//! `remote`), classifies where the two branches disagree about the tree and
//! returns a deterministically ordered conflict list. Detection only; nothing
//! here resolves or applies anything.
//!
//! # Key Types
//!
//! - [`detect_conflicts`] / [`ConflictReport`] -- Entry point and its result
//! - [`Conflict`] / [`ConflictCode`] -- One classified disagreement
//! - [`ConflictDetectionOptions`] -- Category toggles and the conflict cap

pub mod conflict;
pub mod detector;
pub mod error;
pub mod options;

pub use conflict::{sort_conflicts, Conflict, ConflictCode, ConflictKind, ConflictSeverity};
pub use detector::{detect_conflicts, ConflictReport, MergeInput};
pub use error::{MergeError, MergeResult};
pub use options::ConflictDetectionOptions;
