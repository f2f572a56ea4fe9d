//! Option files for the `canvas` binary.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use canvas_diff::DiffOptions;
use canvas_merge::ConflictDetectionOptions;

use crate::cli::{ConflictsArgs, DiffArgs};

/// Engine options as read from a TOML file.
///
/// Both tables are optional; absent keys keep their defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub diff: DiffOptions,
    pub conflicts: ConflictDetectionOptions,
}

impl EngineConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Load `path` if given, otherwise use defaults.
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    /// Diff options with command-line flags applied over the file.
    pub fn diff_options(&self, args: &DiffArgs) -> DiffOptions {
        let mut options = self.diff.clone();
        options.include_property &= !args.no_property;
        options.include_content &= !args.no_content;
        options.include_metadata &= !args.no_metadata;
        if let Some(max) = args.max_operations {
            options.max_operations = max;
        }
        options
    }

    pub fn conflict_options(&self, args: &ConflictsArgs) -> ConflictDetectionOptions {
        let mut options = self.conflicts.clone();
        options.enable_structural &= !args.no_structural;
        options.enable_property &= !args.no_property;
        options.enable_content &= !args.no_content;
        options.enable_metadata &= !args.no_metadata;
        if args.max_conflicts.is_some() {
            options.max_conflicts = args.max_conflicts;
        }
        options
    }
}
