//! Direct driver calls inside test methods.
//!
//! Test definitions should express what is verified and leave the driving of
//! the system under test to the adaptation layer. A call whose receiver
//! matches a driver pattern (and no exempt pattern) inside a test-annotated
//! method is reported once per line.

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
pub struct AdaptationInDefinition;

fn is_driver_call(call: &CallSite, config: &AnalysisConfig) -> bool {
    let matches = |patterns: &[crate::utils::CallPattern]| {
        patterns
            .iter()
            .any(|p| p.matches_receiver(&call.receiver_hint, &call.callee_name))
    };
    matches(&config.driver_receivers) && !matches(&config.exempt_receivers)
}

impl Rule for AdaptationInDefinition {
    fn id(&self) -> RuleId {
        RuleId::AdaptationInDefinition
    }

    fn layer(&self) -> LayerKind {
        LayerKind::TestDefinition
    }

    fn check(&self, class: &ClassifiedClass<'_>, config: &AnalysisConfig) -> Vec<Violation> {
        let mut violations = Vec::new();
        for method in class.class.methods.iter().filter(|m| config.is_test_method(m)) {
            for call in method.call_sites.iter().filter(|c| is_driver_call(c, config)) {
                violations.push(Violation::new(
                    self.id(),
                    class.file_path,
                    call.line,
                    format!(
                        "Test method '{}' calls '{}.{}' directly; drive the application through a Page Object",
                        method.name, call.receiver_hint, call.callee_name
                    ),
                ));
            }
        }
        dedup_lines(violations)
    }
}
