//! Branching and looping inside Page Object methods.

use crate::{
    config::AnalysisConfig,
    core::{classify::ClassifiedClass, model::LayerKind},
    issues::{RuleId, Violation},
    rules::{Rule, dedup_lines},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BusinessLogicInPom;

impl Rule for BusinessLogicInPom {
    fn id(&self) -> RuleId {
        RuleId::BusinessLogicInPom
    }

    fn layer(&self) -> LayerKind {
        LayerKind::PageObject
    }

    fn check(&self, class: &ClassifiedClass<'_>, _config: &AnalysisConfig) -> Vec<Violation> {
        let violations = class
            .class
            .methods
            .iter()
            .flat_map(|method| {
                method.branches.iter().map(move |branch| {
                    Violation::new(
                        self.id(),
                        class.file_path,
                        branch.line,
                        format!(
                            "Page Object method '{}' contains {}; move the logic to a separate service layer",
                            method.name, branch.construct
                        ),
                    )
                })
            })
            .collect();
        dedup_lines(violations)
    }
}
