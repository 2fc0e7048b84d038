//! Project-level check for the test and Page Object directories.
//!
//! Unlike the class rules this looks at the scan root once per scan. Its
//! single violation is reported against the root (`.`) at line 0.

use std::{fs, path::Path};

use crate::{
    config::AnalysisConfig,
    issues::{RuleId, Violation},
};

/// Report path used for project-level violations.
pub const PROJECT_PATH: &str = ".";

/// Immediate subdirectories of `root` must include one of `testDirs` and
/// one of `pageDirs`, compared case-insensitively.
pub fn check_project(root: &Path, config: &AnalysisConfig) -> Vec<Violation> {
    let subdirs: Vec<String> = match fs::read_dir(root) {
        Ok(entries) => entries
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_ok_and(|t| t.is_dir()))
            .map(|entry| entry.file_name().to_string_lossy().to_lowercase())
            .collect(),
        Err(err) => {
            tracing::warn!(root = %root.display(), %err, "cannot list scan root");
            return Vec::new();
        }
    };
    let present = |names: &[String]| subdirs.iter().any(|d| names.contains(d));

    let mut missing = Vec::new();
    if !present(config.test_dirs.as_slice()) {
        missing.push(format!("a test directory (one of: {})", config.test_dirs.join(", ")));
    }
    if !present(config.page_dirs.as_slice()) {
        missing.push(format!(
            "a Page Object directory (one of: {})",
            config.page_dirs.join(", ")
        ));
    }
    if missing.is_empty() {
        return Vec::new();
    }

    vec![Violation::new(
        RuleId::MissingLayerStructure,
        PROJECT_PATH,
        0,
        format!(
            "Project lacks the gTAA layer structure; missing {}",
            missing.join(" and ")
        ),
    )]
}
