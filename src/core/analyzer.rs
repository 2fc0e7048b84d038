//! Per-file pipeline: read → extract → classify → rules.
//!
//! Everything here works on a single file and never fails the scan: parse
//! failures become `PARSE_ERROR` violations and a panicking rule is logged
//! and contributes nothing.

use std::{
    fs,
    panic::{self, AssertUnwindSafe},
};

use crate::{
    config::AnalysisConfig,
    core::{
        classify::ClassifiedClass,
        extract::{ParseFailure, extract},
        file_scanner::DiscoveredFile,
        model::SourceFile,
    },
    issues::{RuleId, Violation},
    rules::{Rule, RuleKind, evaluate},
};

/// What happened to one discovered file.
#[derive(Debug, PartialEq, Eq)]
pub enum FileOutcome {
    Analyzed(Vec<Violation>),
    /// Not analyzed at all (over the size limit).
    Skipped,
}

/// Read a discovered file. Invalid UTF-8 is decoded lossily.
pub fn read_source(file: &DiscoveredFile) -> Result<SourceFile, ParseFailure> {
    let bytes = fs::read(&file.path).map_err(|e| ParseFailure::Unreadable {
        reason: e.to_string(),
    })?;
    Ok(SourceFile {
        path: file.path.clone(),
        display_path: file.display_path.clone(),
        text: String::from_utf8_lossy(&bytes).into_owned(),
        dialect: file.dialect,
    })
}

pub fn analyze_file(
    file: &DiscoveredFile,
    config: &AnalysisConfig,
    rules: &[RuleKind],
) -> FileOutcome {
    if let Ok(meta) = fs::metadata(&file.path)
        && meta.len() > config.max_file_bytes
    {
        tracing::warn!(
            file = %file.display_path,
            bytes = meta.len(),
            limit = config.max_file_bytes,
            "skipping oversized file"
        );
        return FileOutcome::Skipped;
    }

    let source = match read_source(file) {
        Ok(source) => source,
        Err(failure) => return FileOutcome::Analyzed(vec![parse_error(&file.display_path, &failure)]),
    };

    FileOutcome::Analyzed(analyze_source(&source, file, config, rules))
}

/// Run extraction, classification and every rule over one file's text.
pub fn analyze_source(
    source: &SourceFile,
    file: &DiscoveredFile,
    config: &AnalysisConfig,
    rules: &[RuleKind],
) -> Vec<Violation> {
    let classes = match extract(&source.text, source.dialect, &config.budget()) {
        Ok(classes) => classes,
        Err(failure) => {
            tracing::debug!(file = %source.display_path, %failure, "parse failure");
            return vec![parse_error(&source.display_path, &failure)];
        }
    };

    let mut violations = Vec::new();
    for class in &classes {
        let classified = ClassifiedClass::new(class, &source.display_path, &file.rel_path, config);
        for rule in rules {
            violations.extend(run_isolated(rule.id(), &source.display_path, &class.name, || {
                evaluate(rule, &classified, config)
            }));
        }
    }
    violations
}

/// Run one rule evaluation. A panic is logged and yields no violations, so
/// the other rules and files are unaffected.
pub fn run_isolated(
    rule: RuleId,
    file: &str,
    class: &str,
    evaluate: impl FnOnce() -> Vec<Violation>,
) -> Vec<Violation> {
    match panic::catch_unwind(AssertUnwindSafe(evaluate)) {
        Ok(found) => found,
        Err(_) => {
            tracing::error!(
                rule = %rule,
                file,
                class,
                "rule evaluation failed; its result for this file is dropped"
            );
            Vec::new()
        }
    }
}

fn parse_error(display_path: &str, failure: &ParseFailure) -> Violation {
    Violation::new(
        RuleId::ParseError,
        display_path,
        failure.line(),
        format!("could not analyze file: {}", failure),
    )
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use crate::config::Config;
    use crate::core::analyzer::*;
    use crate::core::model::Dialect;

    fn discovered(root: &Path, rel: &str) -> DiscoveredFile {
        DiscoveredFile {
            path: root.join(rel),
            rel_path: PathBuf::from(rel),
            display_path: rel.to_string(),
            dialect: Dialect::from_path(Path::new(rel)).unwrap(),
        }
    }

    #[test]
    fn test_parse_failure_becomes_violation() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("Broken.java"), "class Broken {\n  void m() {\n").unwrap();

        let config = Config::default().compile().unwrap();
        let rules = RuleKind::enabled(&config);
        let outcome = analyze_file(&discovered(dir.path(), "Broken.java"), &config, &rules);

        let FileOutcome::Analyzed(violations) = outcome else {
            panic!("expected analyzed outcome");
        };
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule_id, RuleId::ParseError);
        assert!(violations[0].line >= 2);
        assert!(
            violations[0]
                .message
                .starts_with("could not analyze file: "),
            "{}",
            violations[0].message
        );
    }

    #[test]
    fn test_panicking_rule_is_isolated() {
        let kept = Violation::new(RuleId::LongTestFunction, "A.java", 3, "too long".to_string());
        let expected = vec![kept.clone()];

        let dropped = run_isolated(RuleId::AssertionInPom, "A.java", "A", || {
            panic!("rule bug")
        });
        let survived = run_isolated(RuleId::LongTestFunction, "A.java", "A", move || vec![kept]);

        assert!(dropped.is_empty());
        assert_eq!(survived, expected);
    }

    #[test]
    fn test_missing_file_is_parse_error() {
        let dir = tempdir().unwrap();
        let config = Config::default().compile().unwrap();
        let outcome = analyze_file(&discovered(dir.path(), "Gone.java"), &config, &[]);

        let FileOutcome::Analyzed(violations) = outcome else {
            panic!("expected analyzed outcome");
        };
        assert_eq!(violations[0].rule_id, RuleId::ParseError);
        assert_eq!(violations[0].line, 1);
    }

    #[test]
    fn test_oversized_file_is_skipped() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("Big.java"), "class Big {}\n").unwrap();

        let config = Config {
            max_file_bytes: 4,
            ..Default::default()
        }
        .compile()
        .unwrap();
        let outcome = analyze_file(&discovered(dir.path(), "Big.java"), &config, &[]);
        assert_eq!(outcome, FileOutcome::Skipped);
    }

    #[test]
    fn test_invalid_utf8_is_decoded_lossily() {
        let dir = tempdir().unwrap();
        let mut bytes = b"class A { void m() { x(\"".to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe]);
        bytes.extend_from_slice(b"\"); } }\n");
        fs::write(dir.path().join("A.java"), bytes).unwrap();

        let config = Config::default().compile().unwrap();
        let rules = RuleKind::enabled(&config);
        let outcome = analyze_file(&discovered(dir.path(), "A.java"), &config, &rules);
        assert_eq!(outcome, FileOutcome::Analyzed(Vec::new()));
    }

    #[test]
    fn test_rules_run_per_class() {
        let dir = tempdir().unwrap();
        let config = Config::default().compile().unwrap();
        let rules = RuleKind::enabled(&config);
        let file = discovered(dir.path(), "tests/LoginTest.java");
        let source = SourceFile {
            path: file.path.clone(),
            display_path: file.display_path.clone(),
            text: "class LoginTest {\n  @Test\n  void test1() {\n    driver.get(url);\n  }\n}\n"
                .to_string(),
            dialect: Dialect::Java,
        };

        let mut found: Vec<_> = analyze_source(&source, &file, &config, &rules)
            .into_iter()
            .map(|v| (v.rule_id, v.line))
            .collect();
        found.sort();
        assert_eq!(
            found,
            vec![
                (RuleId::AdaptationInDefinition, 4),
                (RuleId::PoorTestNaming, 3),
            ]
        );
    }
}
