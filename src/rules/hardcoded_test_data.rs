//! Sensitive literals passed as call arguments inside test methods.

use crate::{
    config::AnalysisConfig,
    core::{
        classify::ClassifiedClass,
        model::{LayerKind, LiteralKind},
    },
    issues::{RuleId, Violation},
    rules::{Rule, dedup_lines},
};

/// Shorter string literals are never reported.
const MIN_LITERAL_LEN: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HardcodedTestData;

impl Rule for HardcodedTestData {
    fn id(&self) -> RuleId {
        RuleId::HardcodedTestData
    }

    fn layer(&self) -> LayerKind {
        LayerKind::TestDefinition
    }

    fn check(&self, class: &ClassifiedClass<'_>, config: &AnalysisConfig) -> Vec<Violation> {
        let mut violations = Vec::new();
        for method in class.class.methods.iter().filter(|m| config.is_test_method(m)) {
            let sensitive = method.literal_arguments.iter().filter(|arg| {
                arg.kind == LiteralKind::String
                    && arg.value.chars().count() >= MIN_LITERAL_LEN
                    && config.sensitive_data.iter().any(|re| re.is_match(&arg.value))
            });
            for arg in sensitive {
                violations.push(Violation::new(
                    self.id(),
                    class.file_path,
                    arg.line,
                    format!(
                        "Hardcoded test data '{}' passed to '{}'; move test data out of the test definition",
                        arg.value, arg.callee_name
                    ),
                ));
            }
        }
        dedup_lines(violations)
    }
}
