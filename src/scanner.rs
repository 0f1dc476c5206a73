// SPDX-License-Identifier: PMPL-1.0-or-later
//! File and directory scanner.
//!
//! Walks directory trees, parses every HTML file and runs the rule set
//! over its elements.

use crate::element::Document;
use crate::runner::RuleRunner;
use crate::violation::ViolationSet;
use std::path::Path;
use tracing::{info, warn};
use walkdir::WalkDir;

/// File extensions to scan
const SCANNABLE_EXTENSIONS: &[&str] = &["html", "htm", "xhtml"];

/// Scan a directory for accessibility violations, skipping hidden
/// directories and any directory named in `exclude`
pub fn scan_directory(
    dir: &Path,
    runner: &RuleRunner,
    exclude: &[String],
) -> anyhow::Result<ViolationSet> {
    let mut all_violations = ViolationSet::new();
    let mut files_scanned = 0;

    info!("Scanning directory: {}", dir.display());

    for entry in WalkDir::new(dir)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| {
            let name = e.file_name().to_str().unwrap_or("");
            if e.file_type().is_dir() && e.depth() > 0 {
                return !exclude.iter().any(|x| x == name) && !name.starts_with('.');
            }
            true
        })
    {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_file() || !is_scannable(entry.path()) {
            continue;
        }

        match scan_file(entry.path(), runner) {
            Ok(violations) => {
                all_violations.extend(violations.violations);
                files_scanned += 1;
            }
            Err(e) => warn!("Skipping {}: {}", entry.path().display(), e),
        }
    }

    info!(
        "Scanned {} files, found {} violations",
        files_scanned,
        all_violations.len()
    );

    Ok(all_violations)
}

/// Scan a single HTML file
pub fn scan_file(path: &Path, runner: &RuleRunner) -> anyhow::Result<ViolationSet> {
    let content = std::fs::read_to_string(path)?;
    let doc = Document::parse(&content);
    Ok(runner.check_document(&doc, Some(path)))
}

/// Scan a file or a directory
pub fn scan_path(
    path: &Path,
    runner: &RuleRunner,
    exclude: &[String],
) -> anyhow::Result<ViolationSet> {
    if path.is_dir() {
        scan_directory(path, runner, exclude)
    } else {
        scan_file(path, runner)
    }
}

fn is_scannable(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| SCANNABLE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}
