use std::fs;

use anyhow::{Context, Result, bail};
use colored::Colorize;

use crate::cli::{args::InitCommand, exit_status::ExitStatus, report::SUCCESS_MARK};
use crate::config::{CONFIG_FILE_NAME, default_config_json};

/// Write the default `.gtaarc.json` into the target directory. An existing
/// file is never overwritten.
pub fn init(cmd: InitCommand) -> Result<ExitStatus> {
    let target = cmd.dir.join(CONFIG_FILE_NAME);

    if target.exists() {
        bail!("{} already exists", target.display());
    }

    let json = default_config_json()?;
    fs::write(&target, json + "\n")
        .with_context(|| format!("Failed to write {}", target.display()))?;
    tracing::debug!(path = %target.display(), "wrote default config");

    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", target.display()).green()
    );
    Ok(ExitStatus::Success)
}
