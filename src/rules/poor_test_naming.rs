//! Generic or too-short test method names.

use crate::{
    config::AnalysisConfig,
    core::{classify::ClassifiedClass, model::LayerKind},
    issues::{RuleId, Violation},
    rules::{Rule, dedup_lines},
    utils::split_words,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoorTestNaming;

/// Drop a leading `test`/`Test`/`test_` when it is a word of its own.
fn strip_test_prefix(name: &str) -> &str {
    let Some(prefix) = name.get(..4) else {
        return name;
    };
    if !prefix.eq_ignore_ascii_case("test") {
        return name;
    }
    let rest = &name[4..];
    match rest.chars().next() {
        Some(c) if c.is_lowercase() => name,
        _ => rest.trim_start_matches('_'),
    }
}

/// Number of alphabetic words left once the `test` prefix is removed.
pub fn descriptive_word_count(name: &str) -> usize {
    split_words(strip_test_prefix(name)).len()
}

impl Rule for PoorTestNaming {
    fn id(&self) -> RuleId {
        RuleId::PoorTestNaming
    }

    fn layer(&self) -> LayerKind {
        LayerKind::TestDefinition
    }

    fn check(&self, class: &ClassifiedClass<'_>, config: &AnalysisConfig) -> Vec<Violation> {
        let min_words = config.thresholds.naming_min_words;
        let violations = class
            .class
            .methods
            .iter()
            .filter(|m| config.is_test_method(m))
            .filter(|m| {
                config.generic_test_names.iter().any(|re| re.is_match(&m.name))
                    || descriptive_word_count(&m.name) < min_words
            })
            .map(|m| {
                Violation::new(
                    self.id(),
                    class.file_path,
                    m.line_start,
                    format!(
                        "Test name '{}' is not descriptive; name the behavior being verified",
                        m.name
                    ),
                )
            })
            .collect();
        dedup_lines(violations)
    }
}

#[cfg(test)]
mod tests {
    use crate::rules::poor_test_naming::*;
    use crate::rules::test_support::*;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    #[test]
    fn test_strip_test_prefix() {
        assert_eq!(strip_test_prefix("testUserLogin"), "UserLogin");
        assert_eq!(strip_test_prefix("test_user_login"), "user_login");
        assert_eq!(strip_test_prefix("Test1"), "1");
        assert_eq!(strip_test_prefix("testing"), "testing");
        assert_eq!(strip_test_prefix("te"), "te");
        assert_eq!(strip_test_prefix("LoginWorks"), "LoginWorks");
    }

    #[test]
    fn test_descriptive_word_count() {
        assert_eq!(descriptive_word_count("testUserCanLoginWithValidCredentials"), 6);
        assert_eq!(descriptive_word_count("test1"), 0);
        assert_eq!(descriptive_word_count("testA"), 1);
        assert_eq!(descriptive_word_count("testLogin"), 1);
        assert_eq!(descriptive_word_count("LoginWorks"), 2);
    }

    #[test]
    fn test_flags_generic_and_short_names() {
        let config = config();
        let class = java_class(
            r#"class LoginTest {
    @Test
    void test1() {}

    @Test
    void testA() {}

    @Test
    void testLogin() {}

    @Test
    void testUserCanLoginWithValidCredentials() {}

    void x() {}
}
"#,
        );
        let classified = ClassifiedClass::new(&class, "tests/LoginTest.java", Path::new("tests/LoginTest.java"), &config);

        let violations = PoorTestNaming.check(&classified, &config);
        let lines: Vec<_> = violations.iter().map(|v| v.line).collect();
        assert_eq!(lines, vec![3, 6, 9]);
        assert_eq!(
            violations[0].message,
            "Test name 'test1' is not descriptive; name the behavior being verified"
        );
    }

    #[test]
    fn test_threshold_is_configurable() {
        let mut config = config();
        config.thresholds.naming_min_words = 1;
        let class = java_class("class T {\n @Test\n void testLogin() {}\n}\n");
        let classified = ClassifiedClass::new(&class, "tests/T.java", Path::new("tests/T.java"), &config);
        assert!(PoorTestNaming.check(&classified, &config).is_empty());
    }
}
