//! Scan driver: discover files, fan out analysis, fan in the report.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use rayon::prelude::*;
use thiserror::Error;

use crate::{
    config::AnalysisConfig,
    core::{
        analyzer::{FileOutcome, analyze_file},
        cancellation::ScanCancellation,
        file_scanner::scan_files,
    },
    issues::{RuleId, ScanReport},
    rules::{RuleKind, missing_layer_structure},
};

/// Conditions that abort the whole scan. No report is produced.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("scan root does not exist: {}", .0.display())]
    RootMissing(PathBuf),

    #[error("scan root is not a directory: {}", .0.display())]
    RootNotDirectory(PathBuf),

    #[error("cannot read scan root {}: {source}", path.display())]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no rules enabled; check 'enabledRules'/'disabledRules' or --rules")]
    NoRulesEnabled,

    #[error("scan cancelled")]
    Cancelled,
}

fn check_root(root: &Path) -> Result<PathBuf, ScanError> {
    if root.as_os_str().is_empty() || !root.exists() {
        return Err(ScanError::RootMissing(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(ScanError::RootNotDirectory(root.to_path_buf()));
    }
    let unreadable = |source| ScanError::RootUnreadable {
        path: root.to_path_buf(),
        source,
    };
    let canonical = fs::canonicalize(root).map_err(unreadable)?;
    fs::read_dir(&canonical).map_err(unreadable)?;
    Ok(canonical)
}

/// Scan every matching source file under `root`.
///
/// Files are analyzed in parallel; each worker returns its own violations and
/// the report is built once all of them are done. Cancellation stops new
/// files from starting and discards everything collected so far.
pub fn run(
    root: &Path,
    config: &AnalysisConfig,
    cancel: &ScanCancellation,
) -> Result<ScanReport, ScanError> {
    if config.enabled_rules.is_empty() {
        return Err(ScanError::NoRulesEnabled);
    }
    let rules = RuleKind::enabled(config);
    let root = check_root(root)?;

    let scan = scan_files(&root, config);
    tracing::info!(
        root = %root.display(),
        files = scan.files.len(),
        skipped = scan.skipped_count,
        "discovered source files"
    );

    let results: Vec<Option<(String, FileOutcome)>> = scan
        .files
        .par_iter()
        .map(|file| {
            if cancel.is_cancelled() {
                return None;
            }
            Some((file.display_path.clone(), analyze_file(file, config, &rules)))
        })
        .collect();

    if cancel.is_cancelled() {
        tracing::warn!("scan interrupted; discarding partial results");
        return Err(ScanError::Cancelled);
    }

    let mut files_scanned = 0;
    let mut file_results: Vec<(String, Vec<_>)> = results
        .into_iter()
        .flatten()
        .filter_map(|(path, outcome)| match outcome {
            FileOutcome::Analyzed(violations) => {
                files_scanned += 1;
                Some((path, violations))
            }
            FileOutcome::Skipped => None,
        })
        .collect();

    if config.enabled_rules.contains(&RuleId::MissingLayerStructure) {
        file_results.push((
            missing_layer_structure::PROJECT_PATH.to_string(),
            missing_layer_structure::check_project(&root, config),
        ));
    }

    let report = ScanReport::aggregate(file_results, files_scanned);
    tracing::info!(
        violations = report.violations().len(),
        files = files_scanned,
        "scan finished"
    );
    Ok(report)
}
