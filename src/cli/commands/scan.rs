use anyhow::Result;

use crate::{
    cli::{
        args::{OutputFormat, ScanCommand},
        exit_status::ExitStatus,
        report,
    },
    config::{Config, ConfigLoadResult, load_config, load_config_file},
    core::{self, ScanCancellation},
};

/// Apply command-line overrides on top of the file (or default) config.
fn apply_overrides(config: &mut Config, cmd: &ScanCommand) {
    if !cmd.rules.is_empty() {
        config.enabled_rules = cmd.rules.clone();
        config.disabled_rules.clear();
    }
    if let Some(max) = cmd.max_method_lines {
        config.max_method_lines = max;
    }
    if let Some(min) = cmd.naming_min_words {
        config.naming_min_words = min;
    }
}

pub fn scan(cmd: ScanCommand, cancel: &ScanCancellation) -> Result<ExitStatus> {
    let ConfigLoadResult { mut config, source } = match &cmd.config {
        Some(path) => load_config_file(path)?,
        None => load_config(&cmd.root)?,
    };
    match &source {
        Some(path) => tracing::debug!(path = %path.display(), "loaded config file"),
        None => tracing::debug!("no config file found, using defaults"),
    }

    apply_overrides(&mut config, &cmd);
    let analysis = config.compile()?;

    let scan_report = core::run(&cmd.root, &analysis, cancel)?;

    match cmd.format {
        OutputFormat::Text => report::print_text(&scan_report),
        OutputFormat::Json => report::print_json(&scan_report)?,
    }

    Ok(scan_report.status().into())
}
