//! Test-framework imports inside Page Objects.

use crate::{
    config::AnalysisConfig,
    core::{classify::ClassifiedClass, model::LayerKind},
    issues::{RuleId, Violation},
    rules::{Rule, dedup_lines},
    utils::has_namespace_prefix,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ForbiddenImport;

impl Rule for ForbiddenImport {
    fn id(&self) -> RuleId {
        RuleId::ForbiddenImport
    }

    fn layer(&self) -> LayerKind {
        LayerKind::PageObject
    }

    fn check(&self, class: &ClassifiedClass<'_>, config: &AnalysisConfig) -> Vec<Violation> {
        let violations = class
            .class
            .imports
            .iter()
            .filter(|import| {
                config
                    .test_framework_imports
                    .iter()
                    .any(|prefix| has_namespace_prefix(&import.qualified_name, prefix))
            })
            .map(|import| {
                Violation::new(
                    self.id(),
                    class.file_path,
                    import.line,
                    format!(
                        "Page Object imports test framework '{}'; test frameworks belong in the test definition layer",
                        import.qualified_name
                    ),
                )
            })
            .collect();
        dedup_lines(violations)
    }
}
