//! Rule catalog for gtaa.
//!
//! Each rule is a unit struct implementing [`Rule`]: a pure function from one
//! classified class to its violations. The closed set of rules is the
//! [`RuleKind`] enum, dispatched statically via `enum_dispatch`.
//!
//! ## Module Structure
//!
//! - `forbidden_import`: test-framework imports in Page Objects
//! - `assertion_in_pom`: assertion calls in Page Objects
//! - `business_logic_in_pom`: branching and loops in Page Objects (opt-in)
//! - `adaptation_in_definition`: direct driver calls in test methods
//! - `hardcoded_test_data`: sensitive literals passed in test methods
//! - `poor_test_naming`: generic or too-short test names
//! - `long_test_function`: test methods over the line threshold
//! - `missing_layer_structure`: project-level directory check (opt-in)

pub mod adaptation_in_definition;
pub mod assertion_in_pom;
pub mod business_logic_in_pom;
pub mod forbidden_import;
pub mod hardcoded_test_data;
pub mod long_test_function;
pub mod missing_layer_structure;
pub mod poor_test_naming;

use std::collections::HashSet;

use enum_dispatch::enum_dispatch;

pub use adaptation_in_definition::AdaptationInDefinition;
pub use assertion_in_pom::AssertionInPom;
pub use business_logic_in_pom::BusinessLogicInPom;
pub use forbidden_import::ForbiddenImport;
pub use hardcoded_test_data::HardcodedTestData;
pub use long_test_function::LongTestFunction;
pub use poor_test_naming::PoorTestNaming;

use crate::{
    config::AnalysisConfig,
    core::{classify::ClassifiedClass, model::LayerKind},
    issues::{RuleId, Violation},
};

/// A structural rule over one classified class.
#[enum_dispatch]
pub trait Rule {
    fn id(&self) -> RuleId;

    /// The only layer this rule inspects.
    fn layer(&self) -> LayerKind;

    /// Violations for `class`, which is already known to be in `layer()`.
    fn check(&self, class: &ClassifiedClass<'_>, config: &AnalysisConfig) -> Vec<Violation>;
}

#[enum_dispatch(Rule)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    ForbiddenImport(ForbiddenImport),
    AssertionInPom(AssertionInPom),
    AdaptationInDefinition(AdaptationInDefinition),
    HardcodedTestData(HardcodedTestData),
    PoorTestNaming(PoorTestNaming),
    LongTestFunction(LongTestFunction),
    BusinessLogicInPom(BusinessLogicInPom),
}

impl RuleKind {
    /// Lookup of class-level rules. `None` for `PARSE_ERROR` and for the
    /// project-level `MISSING_LAYER_STRUCTURE`.
    pub fn for_id(id: RuleId) -> Option<Self> {
        match id {
            RuleId::ForbiddenImport => Some(ForbiddenImport.into()),
            RuleId::AssertionInPom => Some(AssertionInPom.into()),
            RuleId::AdaptationInDefinition => Some(AdaptationInDefinition.into()),
            RuleId::HardcodedTestData => Some(HardcodedTestData.into()),
            RuleId::PoorTestNaming => Some(PoorTestNaming.into()),
            RuleId::LongTestFunction => Some(LongTestFunction.into()),
            RuleId::BusinessLogicInPom => Some(BusinessLogicInPom.into()),
            RuleId::MissingLayerStructure | RuleId::ParseError => None,
        }
    }

    /// Rules to run for `config`, in catalog order.
    pub fn enabled(config: &AnalysisConfig) -> Vec<Self> {
        config
            .enabled_rules
            .iter()
            .filter_map(|id| Self::for_id(*id))
            .collect()
    }
}

/// Run `rule` on `class`. Classes outside the rule's layer (including every
/// `Unclassified` class) produce nothing.
pub fn evaluate(
    rule: &RuleKind,
    class: &ClassifiedClass<'_>,
    config: &AnalysisConfig,
) -> Vec<Violation> {
    if class.layer() != rule.layer() {
        return Vec::new();
    }
    rule.check(class, config)
}

/// Keep the first violation per line, preserving order.
pub(crate) fn dedup_lines(violations: Vec<Violation>) -> Vec<Violation> {
    let mut seen = HashSet::new();
    violations
        .into_iter()
        .filter(|v| seen.insert(v.line))
        .collect()
}
