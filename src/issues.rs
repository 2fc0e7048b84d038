//! Violation types for gTAA analysis results.
//!
//! This module defines everything a scan produces:
//! - `Severity` and `RuleId`: the classification of each finding
//! - `Violation`: a single finding at file/line granularity
//! - `ScanReport`: the frozen, ordered result of a whole scan

use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::Serialize;

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    /// Penalty subtracted from the compliance score for each violation.
    pub fn score_penalty(self) -> u32 {
        match self {
            Severity::Error => 10,
            Severity::Warning => 5,
            Severity::Info => 1,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// Rule identifier for each violation type.
///
/// Variants are declared in lexical order of their ids, so the derived
/// `Ord` matches sorting by the id string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleId {
    AdaptationInDefinition,
    AssertionInPom,
    BusinessLogicInPom,
    ForbiddenImport,
    HardcodedTestData,
    LongTestFunction,
    MissingLayerStructure,
    ParseError,
    PoorTestNaming,
}

impl RuleId {
    /// Rules that live in the catalog and can be toggled by configuration.
    pub const CATALOG: [RuleId; 6] = [
        RuleId::ForbiddenImport,
        RuleId::AssertionInPom,
        RuleId::AdaptationInDefinition,
        RuleId::HardcodedTestData,
        RuleId::PoorTestNaming,
        RuleId::LongTestFunction,
    ];

    /// Rules that only run when `enabledRules` or `--rules` names them.
    pub const OPT_IN: [RuleId; 2] = [RuleId::BusinessLogicInPom, RuleId::MissingLayerStructure];

    /// Every rule id a user may select.
    pub fn selectable() -> impl Iterator<Item = RuleId> {
        Self::CATALOG.into_iter().chain(Self::OPT_IN)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RuleId::AdaptationInDefinition => "ADAPTATION_IN_DEFINITION",
            RuleId::AssertionInPom => "ASSERTION_IN_POM",
            RuleId::BusinessLogicInPom => "BUSINESS_LOGIC_IN_POM",
            RuleId::ForbiddenImport => "FORBIDDEN_IMPORT",
            RuleId::HardcodedTestData => "HARDCODED_TEST_DATA",
            RuleId::LongTestFunction => "LONG_TEST_FUNCTION",
            RuleId::MissingLayerStructure => "MISSING_LAYER_STRUCTURE",
            RuleId::ParseError => "PARSE_ERROR",
            RuleId::PoorTestNaming => "POOR_TEST_NAMING",
        }
    }

    /// Fixed severity of the rule.
    pub fn severity(self) -> Severity {
        match self {
            RuleId::ForbiddenImport
            | RuleId::AssertionInPom
            | RuleId::MissingLayerStructure
            | RuleId::ParseError => Severity::Error,
            RuleId::AdaptationInDefinition
            | RuleId::BusinessLogicInPom
            | RuleId::HardcodedTestData
            | RuleId::LongTestFunction => Severity::Warning,
            RuleId::PoorTestNaming => Severity::Info,
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown rule id '{0}' (expected one of: {ids})", ids = catalog_ids())]
pub struct UnknownRuleId(pub String);

fn catalog_ids() -> String {
    RuleId::selectable()
        .map(|r| r.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl FromStr for RuleId {
    type Err = UnknownRuleId;

    /// Accepts `FORBIDDEN_IMPORT` as well as `forbidden-import`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        RuleId::selectable()
            .chain([RuleId::ParseError])
            .find(|rule| rule.as_str() == normalized)
            .ok_or_else(|| UnknownRuleId(s.to_string()))
    }
}

impl<'de> serde::Deserialize<'de> for RuleId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================
// Violation
// ============================================================

/// A single detected deviation from the expected layering or convention.
///
/// Identity is `(rule_id, file_path, line)`; a scan never reports two
/// violations with the same triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    #[serde(rename = "file")]
    pub file_path: String,
    pub line: usize,
    #[serde(rename = "ruleId")]
    pub rule_id: RuleId,
    pub severity: Severity,
    pub message: String,
}

impl Violation {
    pub fn new(
        rule_id: RuleId,
        file_path: impl Into<String>,
        line: usize,
        message: impl Into<String>,
    ) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            rule_id,
            severity: rule_id.severity(),
            message: message.into(),
        }
    }

    fn sort_key(&self) -> (&str, usize, RuleId) {
        (&self.file_path, self.line, self.rule_id)
    }
}

// ============================================================
// Scan Report
// ============================================================

/// Overall outcome of a scan, before mapping to a process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStatus {
    /// No violations at all.
    Clean,
    /// Only warning/info violations; informational, not failing.
    Findings,
    /// At least one error-severity violation.
    Failing,
}

/// Ordered, frozen result of a scan.
///
/// Violations are sorted by `(file, line, ruleId)` and deduplicated on the
/// same triple. Grouping by file falls out of the ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    violations: Vec<Violation>,
    summary: BTreeMap<RuleId, usize>,
    #[serde(skip)]
    files_scanned: usize,
}

impl ScanReport {
    /// Merge per-file violation lists into a single report.
    pub fn aggregate<I>(file_results: I, files_scanned: usize) -> Self
    where
        I: IntoIterator<Item = (String, Vec<Violation>)>,
    {
        let mut violations: Vec<Violation> = file_results
            .into_iter()
            .flat_map(|(_, violations)| violations)
            .collect();

        violations.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        violations.dedup_by(|a, b| a.sort_key() == b.sort_key());

        let mut summary = BTreeMap::new();
        for v in &violations {
            *summary.entry(v.rule_id).or_insert(0) += 1;
        }

        Self {
            violations,
            summary,
            files_scanned,
        }
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn summary(&self) -> &BTreeMap<RuleId, usize> {
        &self.summary
    }

    pub fn files_scanned(&self) -> usize {
        self.files_scanned
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Number of distinct files with at least one violation.
    pub fn files_with_violations(&self) -> usize {
        let mut count = 0;
        let mut last: Option<&str> = None;
        for v in &self.violations {
            if last != Some(v.file_path.as_str()) {
                count += 1;
                last = Some(&v.file_path);
            }
        }
        count
    }

    pub fn count_by_severity(&self, severity: Severity) -> usize {
        self.violations
            .iter()
            .filter(|v| v.severity == severity)
            .count()
    }

    /// Compliance score from 0 to 100.
    pub fn score(&self) -> u32 {
        let penalty: u32 = self
            .violations
            .iter()
            .map(|v| v.severity.score_penalty())
            .sum();
        100u32.saturating_sub(penalty)
    }

    pub fn status(&self) -> ScanStatus {
        if self.count_by_severity(Severity::Error) > 0 {
            ScanStatus::Failing
        } else if self.violations.is_empty() {
            ScanStatus::Clean
        } else {
            ScanStatus::Findings
        }
    }
}
