use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::{config::AnalysisConfig, core::model::Dialect};

/// A source file found under the scan root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    pub path: PathBuf,
    /// Path relative to the scan root.
    pub rel_path: PathBuf,
    /// `rel_path` with `/` separators, as shown in reports.
    pub display_path: String,
    pub dialect: Dialect,
}

/// Result of scanning files.
pub struct ScanResult {
    /// Sorted by display path.
    pub files: Vec<DiscoveredFile>,
    pub skipped_count: usize,
}

fn display_path(rel: &Path) -> String {
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn is_excluded_dir(entry: &DirEntry, config: &AnalysisConfig) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && config
            .excluded_dirs
            .iter()
            .any(|d| entry.file_name().to_string_lossy() == d.as_str())
}

fn scannable_dialect(path: &Path, config: &AnalysisConfig) -> Option<Dialect> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    if !config.extensions.contains(&ext) {
        return None;
    }
    Dialect::from_extension(&ext)
}

pub fn scan_files(root: &Path, config: &AnalysisConfig) -> ScanResult {
    let mut files = Vec::new();
    let mut skipped_count = 0;

    let walker = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| !is_excluded_dir(entry, config));

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                skipped_count += 1;
                tracing::warn!("cannot access path: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let Some(dialect) = scannable_dialect(path, config) else {
            continue;
        };
        let rel_path = path.strip_prefix(root).unwrap_or(path).to_path_buf();
        let display_path = display_path(&rel_path);

        if config.ignores.iter().any(|p| p.matches(&display_path)) {
            tracing::debug!(file = %display_path, "ignored by pattern");
            continue;
        }

        files.push(DiscoveredFile {
            path: path.to_path_buf(),
            rel_path,
            display_path,
            dialect,
        });
    }

    files.sort_by(|a, b| a.display_path.cmp(&b.display_path));

    ScanResult {
        files,
        skipped_count,
    }
}
