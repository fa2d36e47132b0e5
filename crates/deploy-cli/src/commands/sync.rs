//! The synchronization command
//!
//! Resolves the roots (flag > config file > built-in default), clears the
//! destination's immediate children, mirrors the source tree into it, and
//! prints one progress line per filesystem action.

use std::path::PathBuf;

use colored::Colorize;
use serde::Serialize;

use deploy_fs::{
    DeployConfig, MirrorOptions, MirrorStats, Progress, default_dest_root, default_source_root,
    ensure_preconditions, overwrite_sync,
};

use crate::error::Result;

/// Arguments for one run, as collected from the CLI.
#[derive(Debug, Clone, Default)]
pub struct SyncInvocation {
    pub source: Option<PathBuf>,
    pub dest: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub dry_run: bool,
    pub json: bool,
}

/// Report from a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct DeployReport {
    pub success: bool,
    pub dry_run: bool,
    pub source: PathBuf,
    pub dest: PathBuf,
    pub actions: Vec<String>,
    pub stats: MirrorStats,
}

/// Run the synchronization
pub fn run_sync(inv: &SyncInvocation) -> Result<()> {
    let config = match &inv.config {
        Some(path) => Some(DeployConfig::load(path)?),
        None => DeployConfig::discover(&std::env::current_dir()?)?,
    }
    .unwrap_or_default();

    let source = match inv.source.clone().or(config.source) {
        Some(path) => path,
        None => default_source_root()?,
    };
    let dest = match inv.dest.clone().or(config.destination) {
        Some(path) => path,
        None => default_dest_root()?,
    };

    let opts = MirrorOptions {
        dry_run: inv.dry_run,
    };
    let roots = ensure_preconditions(&source, &dest, opts)?;

    if !inv.json {
        println!(
            "{} Syncing {} into {}",
            "=>".blue().bold(),
            roots.source.display().to_string().cyan(),
            roots.dest.display().to_string().cyan()
        );
    }

    let mut actions = Vec::new();
    let stats = overwrite_sync(&roots.source, &roots.dest, opts, &mut |event| {
        if !inv.json {
            print_event(&event);
        }
        actions.push(describe_event(&event, inv.dry_run));
    })?;

    let report = DeployReport {
        success: true,
        dry_run: inv.dry_run,
        source: roots.source,
        dest: roots.dest,
        actions,
        stats,
    };

    if inv.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if inv.dry_run {
        println!("{} Dry run complete. Nothing was modified.", "OK".green().bold());
    } else {
        println!(
            "{} Deploy complete. {} stale entries removed, {} files copied, {} directories ensured.",
            "OK".green().bold(),
            stats.entries_removed,
            stats.files_copied,
            stats.dirs_ensured
        );
    }

    Ok(())
}

fn print_event(event: &Progress<'_>) {
    match event {
        Progress::RemoveFile { path } | Progress::RemoveDir { path } => {
            println!("   {} {}", "-".yellow(), path.display());
        }
        Progress::CopyFile { from, to } => {
            println!("   {} {} -> {}", "+".green(), from.display(), to.display());
        }
        Progress::CreateDir { path } => {
            println!("   {} {}/", "+".green(), path.display());
        }
    }
}

/// Plain-text action line for the report (no color codes).
fn describe_event(event: &Progress<'_>, dry_run: bool) -> String {
    match (event, dry_run) {
        (Progress::RemoveFile { path }, false) => format!("Removed file {}", path.display()),
        (Progress::RemoveFile { path }, true) => {
            format!("[dry-run] Would remove file {}", path.display())
        }
        (Progress::RemoveDir { path }, false) => {
            format!("Removed directory {}", path.display())
        }
        (Progress::RemoveDir { path }, true) => {
            format!("[dry-run] Would remove directory {}", path.display())
        }
        (Progress::CopyFile { from, to }, false) => {
            format!("Copied {} -> {}", from.display(), to.display())
        }
        (Progress::CopyFile { from, to }, true) => {
            format!("[dry-run] Would copy {} -> {}", from.display(), to.display())
        }
        (Progress::CreateDir { path }, false) => {
            format!("Created directory {}", path.display())
        }
        (Progress::CreateDir { path }, true) => {
            format!("[dry-run] Would create directory {}", path.display())
        }
    }
}
