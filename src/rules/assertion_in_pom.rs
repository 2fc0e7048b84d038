//! Assertion calls inside Page Object methods.

use crate::{
    config::AnalysisConfig,
    core::{
        classify::ClassifiedClass,
        model::{CallSite, LayerKind},
    },
    issues::{RuleId, Violation},
    rules::{Rule, dedup_lines},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssertionInPom;

/// Qualified calls match on the receiver, unqualified ones on the callee.
fn is_assertion(call: &CallSite, config: &AnalysisConfig) -> bool {
    if call.receiver_hint.is_empty() {
        config
            .assertion_callees
            .iter()
            .any(|p| p.matches_name(&call.callee_name))
    } else {
        config
            .assertion_receivers
            .iter()
            .any(|p| p.matches_receiver(&call.receiver_hint, &call.callee_name))
    }
}

impl Rule for AssertionInPom {
    fn id(&self) -> RuleId {
        RuleId::AssertionInPom
    }

    fn layer(&self) -> LayerKind {
        LayerKind::PageObject
    }

    fn check(&self, class: &ClassifiedClass<'_>, config: &AnalysisConfig) -> Vec<Violation> {
        let mut violations = Vec::new();
        for method in &class.class.methods {
            for call in method.call_sites.iter().filter(|c| is_assertion(c, config)) {
                let target = if call.receiver_hint.is_empty() {
                    call.callee_name.clone()
                } else {
                    format!("{}.{}", call.receiver_hint, call.callee_name)
                };
                violations.push(Violation::new(
                    self.id(),
                    class.file_path,
                    call.line,
                    format!(
                        "Page Object method '{}' calls assertion '{}'; return the value and let the test verify it",
                        method.name, target
                    ),
                ));
            }
        }
        dedup_lines(violations)
    }
}
