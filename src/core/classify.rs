//! Layer classification.
//!
//! A pure heuristic over the file path and the extracted model; nothing is
//! cached between files or scans.

use std::path::{Component, Path};

use crate::{
    config::AnalysisConfig,
    core::model::{ClassModel, LayerKind},
};

/// Which heuristic decided the layer. Logged at debug level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    PagesDirectory,
    TestsDirectoryAnnotated,
    Annotated,
    NoSignal,
}

/// First-match-wins classification:
/// 1. a page directory segment in the path → `PageObject`
/// 2. a test directory segment and a test-annotated method → `TestDefinition`
/// 3. a test-annotated method anywhere → `TestDefinition`
/// 4. otherwise `Unclassified`
///
/// `rel_path` is relative to the scan root, so directories above the root
/// never influence the result.
pub fn classify(class: &ClassModel, rel_path: &Path, config: &AnalysisConfig) -> (LayerKind, Reason) {
    if has_dir_segment(rel_path, &config.page_dirs) {
        return (LayerKind::PageObject, Reason::PagesDirectory);
    }

    let annotated = class.methods.iter().any(|m| config.is_test_method(m));
    if annotated && has_dir_segment(rel_path, &config.test_dirs) {
        return (LayerKind::TestDefinition, Reason::TestsDirectoryAnnotated);
    }
    if annotated {
        return (LayerKind::TestDefinition, Reason::Annotated);
    }

    (LayerKind::Unclassified, Reason::NoSignal)
}

/// Case-insensitive match of any directory segment (the file name itself is
/// not a directory) against lowercased `names`.
fn has_dir_segment(path: &Path, names: &[String]) -> bool {
    let Some(parent) = path.parent() else {
        return false;
    };
    parent.components().any(|c| match c {
        Component::Normal(segment) => {
            let segment = segment.to_string_lossy().to_lowercase();
            names.iter().any(|n| *n == segment)
        }
        _ => false,
    })
}

/// A class together with the layer assigned to it.
///
/// The layer is fixed at construction and cannot be changed afterwards.
#[derive(Debug)]
pub struct ClassifiedClass<'a> {
    pub class: &'a ClassModel,
    /// Report path of the file declaring the class.
    pub file_path: &'a str,
    layer: LayerKind,
}

impl<'a> ClassifiedClass<'a> {
    pub fn new(
        class: &'a ClassModel,
        file_path: &'a str,
        rel_path: &Path,
        config: &AnalysisConfig,
    ) -> Self {
        let (layer, reason) = classify(class, rel_path, config);
        tracing::debug!(
            file = file_path,
            class = %class.name,
            %layer,
            ?reason,
            "classified"
        );
        Self {
            class,
            file_path,
            layer,
        }
    }

    pub fn layer(&self) -> LayerKind {
        self.layer
    }
}
