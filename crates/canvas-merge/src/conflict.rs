//! Conflict records and their canonical ordering.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use canvas_index::NodePath;
use canvas_types::ConflictId;

/// Broad category of a conflict.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictKind {
    /// Tree-shape disagreement.
    Structural,
    /// Frame, visibility, or layout disagreement.
    Property,
    /// Text disagreement.
    Content,
    /// Name disagreement.
    Metadata,
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Structural => write!(f, "structural"),
            Self::Property => write!(f, "property"),
            Self::Content => write!(f, "content"),
            Self::Metadata => write!(f, "metadata"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictSeverity {
    Error,
    Warning,
}

impl fmt::Display for ConflictSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// Short stable identifier of a conflict rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConflictCode {
    /// One side deleted a node the other side kept.
    #[serde(rename = "S-DEL-MOD")]
    DeleteModify,
    /// Both sides introduced the same id with different content.
    #[serde(rename = "S-ADD-ADD")]
    AddAdd,
    /// Both sides re-parented a frame to different parents.
    #[serde(rename = "S-MOVE-MOVE")]
    MoveMove,
    #[serde(rename = "P-FRAME")]
    Frame,
    #[serde(rename = "P-VISIBLE")]
    Visibility,
    #[serde(rename = "P-LAYOUT")]
    Layout,
    #[serde(rename = "C-TEXT")]
    Text,
    #[serde(rename = "M-NAME")]
    Name,
}

impl ConflictCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DeleteModify => "S-DEL-MOD",
            Self::AddAdd => "S-ADD-ADD",
            Self::MoveMove => "S-MOVE-MOVE",
            Self::Frame => "P-FRAME",
            Self::Visibility => "P-VISIBLE",
            Self::Layout => "P-LAYOUT",
            Self::Text => "C-TEXT",
            Self::Name => "M-NAME",
        }
    }

    pub fn kind(&self) -> ConflictKind {
        match self {
            Self::DeleteModify | Self::AddAdd | Self::MoveMove => ConflictKind::Structural,
            Self::Frame | Self::Visibility | Self::Layout => ConflictKind::Property,
            Self::Text => ConflictKind::Content,
            Self::Name => ConflictKind::Metadata,
        }
    }

    /// Losing a node outright is the only error; everything else warns.
    pub fn severity(&self) -> ConflictSeverity {
        match self {
            Self::DeleteModify => ConflictSeverity::Error,
            Self::AddAdd
            | Self::MoveMove
            | Self::Frame
            | Self::Visibility
            | Self::Layout
            | Self::Text
            | Self::Name => ConflictSeverity::Warning,
        }
    }
}

impl fmt::Display for ConflictCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A detected disagreement between the local and remote branches.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    pub id: ConflictId,
    #[serde(rename = "type")]
    pub kind: ConflictKind,
    pub code: ConflictCode,
    pub severity: ConflictSeverity,
    pub path: NodePath,
    pub auto_resolvable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_value: Option<Value>,
    pub message: String,
}

impl Conflict {
    /// Create a conflict with a fresh id; kind and severity follow the code.
    pub fn new(code: ConflictCode, path: NodePath, message: impl Into<String>) -> Self {
        Self {
            id: ConflictId::generate(),
            kind: code.kind(),
            code,
            severity: code.severity(),
            path,
            auto_resolvable: false,
            base_value: None,
            local_value: None,
            remote_value: None,
            message: message.into(),
        }
    }

    /// Builder-style: attach the three sides' values.
    pub fn with_values(mut self, base: Option<Value>, local: Option<Value>, remote: Option<Value>) -> Self {
        self.base_value = base;
        self.local_value = local;
        self.remote_value = remote;
        self
    }
}

/// Canonical order: formatted path, then code, then id.
pub fn sort_conflicts(conflicts: &mut [Conflict]) {
    conflicts.sort_by_cached_key(|c| (c.path.to_string(), c.code.as_str(), c.id.clone()));
}
