use crate::{
    config::AnalysisConfig,
    core::{classify::ClassifiedClass, model::LayerKind},
    issues::{RuleId, Violation},
    rules::{Rule, dedup_lines},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LongTestFunction;

impl Rule for LongTestFunction {
    fn id(&self) -> RuleId {
        RuleId::LongTestFunction
    }

    fn layer(&self) -> LayerKind {
        LayerKind::TestDefinition
    }

    fn check(&self, class: &ClassifiedClass<'_>, config: &AnalysisConfig) -> Vec<Violation> {
        let max = config.thresholds.max_method_lines;
        let violations = class
            .class
            .methods
            .iter()
            .filter(|m| config.is_test_method(m) && m.body_line_count > max)
            .map(|m| {
                Violation::new(
                    self.id(),
                    class.file_path,
                    m.line_start,
                    format!(
                        "Test method '{}' has {} lines (limit: {}); long tests are hard to read and maintain",
                        m.name, m.body_line_count, max
                    ),
                )
            })
            .collect();
        dedup_lines(violations)
    }
}
