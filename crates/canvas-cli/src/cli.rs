use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "canvas",
    about = "Semantic diff and three-way conflict detection for canvas documents",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML file with `[diff]` and `[conflicts]` option tables
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the operations that turn BASE into TARGET
    Diff(DiffArgs),
    /// Detect conflicts between LOCAL and REMOTE relative to BASE
    Conflicts(ConflictsArgs),
}

#[derive(Args)]
pub struct DiffArgs {
    pub base: PathBuf,
    pub target: PathBuf,
    /// Skip frame, visibility, and layout changes
    #[arg(long)]
    pub no_property: bool,
    /// Skip text changes
    #[arg(long)]
    pub no_content: bool,
    /// Skip name changes
    #[arg(long)]
    pub no_metadata: bool,
    #[arg(long)]
    pub max_operations: Option<usize>,
}

#[derive(Args)]
pub struct ConflictsArgs {
    pub base: PathBuf,
    pub local: PathBuf,
    pub remote: PathBuf,
    #[arg(long)]
    pub no_structural: bool,
    #[arg(long)]
    pub no_property: bool,
    #[arg(long)]
    pub no_content: bool,
    #[arg(long)]
    pub no_metadata: bool,
    #[arg(long)]
    pub max_conflicts: Option<usize>,
}
