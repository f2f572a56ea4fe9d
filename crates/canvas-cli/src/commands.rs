use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use tracing::debug;

use canvas_diff::{diff_documents, DocumentDiff, OperationKind};
use canvas_merge::{detect_conflicts, ConflictReport, ConflictSeverity, MergeInput};
use canvas_types::Document;

use crate::cli::*;
use crate::config::EngineConfig;

/// Runs the parsed command; returns `true` when error-severity conflicts were found.
pub fn run_command(cli: Cli) -> anyhow::Result<bool> {
    let config = EngineConfig::load_or_default(cli.config.as_deref())?;
    match cli.command {
        Command::Diff(args) => cmd_diff(&config, &args, cli.format).map(|_| false),
        Command::Conflicts(args) => cmd_conflicts(&config, &args, cli.format),
    }
}

fn load_document(path: &Path) -> anyhow::Result<Document> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let document = Document::from_json(&raw).with_context(|| format!("parsing {}", path.display()))?;
    debug!(path = %path.display(), id = %document.id, elements = document.element_count(), "loaded document");
    Ok(document)
}

fn cmd_diff(config: &EngineConfig, args: &DiffArgs, format: OutputFormat) -> anyhow::Result<()> {
    let base = load_document(&args.base)?;
    let target = load_document(&args.target)?;
    let diff = diff_documents(&base, &target, &config.diff_options(args))?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&diff)?),
        OutputFormat::Text => print_diff(&diff),
    }
    Ok(())
}

fn print_diff(diff: &DocumentDiff) {
    if diff.is_empty() {
        println!("No changes.");
        return;
    }
    for op in &diff.operations {
        let tag = match op.kind {
            OperationKind::Add => "+ add   ".green(),
            OperationKind::Remove => "- remove".red(),
            OperationKind::Move => "> move  ".cyan(),
            OperationKind::Modify => "~ modify".yellow(),
        };
        println!("{} {}  {}", tag, op.path.to_string().dimmed(), op.metadata.description);
    }
    let s = &diff.summary;
    println!(
        "\n{} operations: {} added, {} removed, {} moved, {} modified",
        s.total.to_string().bold(),
        s.added,
        s.removed,
        s.moved,
        s.modified
    );
}

fn cmd_conflicts(config: &EngineConfig, args: &ConflictsArgs, format: OutputFormat) -> anyhow::Result<bool> {
    let base = load_document(&args.base)?;
    let local = load_document(&args.local)?;
    let remote = load_document(&args.remote)?;
    let input = MergeInput {
        base: &base,
        local: &local,
        remote: &remote,
    };
    let report = detect_conflicts(&input, &config.conflict_options(args))?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print_conflicts(&report),
    }
    Ok(report.has_errors())
}

fn print_conflicts(report: &ConflictReport) {
    if report.is_empty() {
        println!("{} No conflicts.", "✓".green().bold());
    }
    for c in &report.conflicts {
        let severity = match c.severity {
            ConflictSeverity::Error => "error".red().bold(),
            ConflictSeverity::Warning => "warning".yellow(),
        };
        println!("{} [{}] {}  {}", severity, c.code.to_string().cyan(), c.path.to_string().dimmed(), c.message);
    }
    for warning in &report.warnings {
        println!("{} {}", "note:".dimmed(), warning);
    }
}
