//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `scan`: Analyze a test source tree for gTAA violations
//! - `init`: Initialize a `.gtaarc.json` configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

use crate::issues::RuleId;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Scan(cmd)) => cmd.verbose,
            Some(Command::Init(_)) | None => false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Args)]
pub struct ScanCommand {
    /// Root directory of the test sources
    pub root: PathBuf,

    /// Only run these rules, e.g. --rules=FORBIDDEN_IMPORT,poor-test-naming
    #[arg(long, value_delimiter = ',')]
    pub rules: Vec<RuleId>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Maximum body lines for a test method (overrides config file)
    #[arg(long)]
    pub max_method_lines: Option<usize>,

    /// Minimum descriptive words in a test name (overrides config file)
    #[arg(long)]
    pub naming_min_words: Option<usize>,

    /// Config file to use instead of searching for .gtaarc.json
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct InitCommand {
    /// Directory to create the config file in
    #[arg(default_value = ".")]
    pub dir: PathBuf,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scan test sources for gTAA layering violations
    Scan(ScanCommand),
    /// Initialize a new .gtaarc.json configuration file
    Init(InitCommand),
}
