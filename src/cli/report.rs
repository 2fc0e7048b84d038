//! Report formatting and printing.
//!
//! Separate from the core so the analysis can be used as a library. Every
//! printer has a `_to` variant writing into any `Write` for tests.

use std::io::{self, Write};

use anyhow::{Context, Result};
use colored::{ColoredString, Colorize};

use crate::issues::{ScanReport, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{} {}", count, word)
    } else {
        format!("{} {}s", count, word)
    }
}

fn severity_tag(severity: Severity) -> ColoredString {
    match severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
        Severity::Info => "info".bold().cyan(),
    }
}

pub fn print_text(report: &ScanReport) {
    print_text_to(report, &mut io::stdout().lock());
}

/// One line per violation, then a blank line and the summary.
pub fn print_text_to<W: Write>(report: &ScanReport, writer: &mut W) {
    if report.is_empty() {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Scanned {} file(s) - no violations found",
                report.files_scanned()
            )
            .green()
        );
        return;
    }

    for v in report.violations() {
        let _ = writeln!(
            writer,
            "{}:{}: [{}] {} \u{2014} {}",
            v.file_path,
            v.line,
            severity_tag(v.severity),
            v.rule_id,
            v.message
        );
    }

    print_summary(report, writer);
}

fn print_summary<W: Write>(report: &ScanReport, writer: &mut W) {
    let errors = report.count_by_severity(Severity::Error);
    let warnings = report.count_by_severity(Severity::Warning);
    let infos = report.count_by_severity(Severity::Info);

    let _ = writeln!(
        writer,
        "\n{} {} in {} ({}, {}, {})",
        FAILURE_MARK.red(),
        plural(report.violations().len(), "violation"),
        plural(report.files_with_violations(), "file"),
        plural(errors, "error").red(),
        plural(warnings, "warning").yellow(),
        format!("{} info", infos).cyan(),
    );

    let width = report
        .summary()
        .keys()
        .map(|r| r.as_str().len())
        .max()
        .unwrap_or(0);
    for (rule, count) in report.summary() {
        let _ = writeln!(writer, "  {:<width$}  {}", rule.as_str(), count);
    }

    let _ = writeln!(
        writer,
        "Compliance score: {}/100 ({} scanned)",
        report.score(),
        plural(report.files_scanned(), "file")
    );
}

pub fn print_json(report: &ScanReport) -> Result<()> {
    print_json_to(report, &mut io::stdout().lock())
}

/// `{"violations": [...], "summary": {ruleId: count}}`, pretty-printed.
pub fn print_json_to<W: Write>(report: &ScanReport, writer: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, report).context("Failed to serialize report")?;
    writeln!(writer)?;
    Ok(())
}
