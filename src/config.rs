use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result, bail};
use glob::Pattern;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{
    core::{extract::Budget, model::MethodModel},
    issues::RuleId,
    utils::CallPattern,
};

pub const CONFIG_FILE_NAME: &str = ".gtaarc.json";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Rules to run; empty means the whole catalog.
    #[serde(default)]
    pub enabled_rules: Vec<RuleId>,
    #[serde(default)]
    pub disabled_rules: Vec<RuleId>,
    #[serde(default = "default_max_method_lines")]
    pub max_method_lines: usize,
    #[serde(default = "default_naming_min_words")]
    pub naming_min_words: usize,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_excluded_dirs")]
    pub excluded_dirs: Vec<String>,
    #[serde(default = "default_page_dirs")]
    pub page_dirs: Vec<String>,
    #[serde(default = "default_test_dirs")]
    pub test_dirs: Vec<String>,
    #[serde(default = "default_test_annotations")]
    pub test_annotations: Vec<String>,
    #[serde(default = "default_test_framework_imports")]
    pub test_framework_imports: Vec<String>,
    #[serde(default = "default_assertion_receivers")]
    pub assertion_receivers: Vec<String>,
    #[serde(default = "default_assertion_callees")]
    pub assertion_callees: Vec<String>,
    #[serde(default = "default_driver_receivers")]
    pub driver_receivers: Vec<String>,
    #[serde(default = "default_exempt_receivers")]
    pub exempt_receivers: Vec<String>,
    #[serde(default = "default_sensitive_data_patterns")]
    pub sensitive_data_patterns: Vec<String>,
    #[serde(default = "default_generic_test_names")]
    pub generic_test_names: Vec<String>,
    /// Per-file extraction deadline; 0 disables it.
    #[serde(default = "default_file_timeout_ms")]
    pub file_timeout_ms: u64,
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,
    #[serde(default = "default_max_nesting")]
    pub max_nesting: usize,
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn default_max_method_lines() -> usize {
    50
}

fn default_naming_min_words() -> usize {
    2
}

fn default_extensions() -> Vec<String> {
    strings(&["java", "cs"])
}

fn default_excluded_dirs() -> Vec<String> {
    strings(&[
        ".git",
        "target",
        "build",
        "bin",
        "obj",
        "node_modules",
        "out",
        ".gradle",
        ".idea",
        ".vs",
    ])
}

fn default_page_dirs() -> Vec<String> {
    strings(&["pages", "page_objects", "pom"])
}

fn default_test_dirs() -> Vec<String> {
    strings(&["tests", "test"])
}

fn default_test_annotations() -> Vec<String> {
    strings(&[
        "Test",
        "ParameterizedTest",
        "RepeatedTest",
        "TestFactory",
        "TestTemplate",
        "Fact",
        "Theory",
        "TestMethod",
        "TestCase",
        "TestCaseSource",
    ])
}

fn default_test_framework_imports() -> Vec<String> {
    strings(&[
        "org.junit",
        "org.testng",
        "org.hamcrest",
        "org.assertj",
        "NUnit.Framework",
        "Xunit",
        "Microsoft.VisualStudio.TestTools",
        "FluentAssertions",
    ])
}

fn default_assertion_receivers() -> Vec<String> {
    strings(&["Assert*", "*Assert", "*Assertions"])
}

fn default_assertion_callees() -> Vec<String> {
    strings(&["assert*"])
}

fn default_driver_receivers() -> Vec<String> {
    strings(&["driver", "_driver", "webDriver", "browser"])
}

fn default_exempt_receivers() -> Vec<String> {
    strings(&["page.*", "*Page"])
}

fn default_sensitive_data_patterns() -> Vec<String> {
    strings(&[
        // email
        r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}",
        // url
        r#"https?://[^\s"']+"#,
        // phone
        r"\b\d{3}[-.]?\d{3}[-.]?\d{4}\b",
        // credential keywords
        r"(?i)(password|passwd|pwd|secret|token|api_?key)",
    ])
}

fn default_generic_test_names() -> Vec<String> {
    strings(&[r"(?i)^test_?([0-9]+|[a-z]|case[0-9]*)$"])
}

fn default_file_timeout_ms() -> u64 {
    2000
}

fn default_max_file_bytes() -> u64 {
    10 * 1024 * 1024
}

fn default_max_nesting() -> usize {
    Budget::DEFAULT_MAX_NESTING
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enabled_rules: Vec::new(),
            disabled_rules: Vec::new(),
            max_method_lines: default_max_method_lines(),
            naming_min_words: default_naming_min_words(),
            extensions: default_extensions(),
            ignores: Vec::new(),
            excluded_dirs: default_excluded_dirs(),
            page_dirs: default_page_dirs(),
            test_dirs: default_test_dirs(),
            test_annotations: default_test_annotations(),
            test_framework_imports: default_test_framework_imports(),
            assertion_receivers: default_assertion_receivers(),
            assertion_callees: default_assertion_callees(),
            driver_receivers: default_driver_receivers(),
            exempt_receivers: default_exempt_receivers(),
            sensitive_data_patterns: default_sensitive_data_patterns(),
            generic_test_names: default_generic_test_names(),
            file_timeout_ms: default_file_timeout_ms(),
            max_file_bytes: default_max_file_bytes(),
            max_nesting: default_max_nesting(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if a glob or regex is invalid or a threshold is zero.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }
        compile_regexes(&self.sensitive_data_patterns, "sensitiveDataPatterns")?;
        compile_regexes(&self.generic_test_names, "genericTestNames")?;

        if self.max_method_lines == 0 {
            bail!("'maxMethodLines' must be greater than 0");
        }
        if self.naming_min_words == 0 {
            bail!("'namingMinWords' must be greater than 0");
        }
        if self.max_nesting == 0 {
            bail!("'maxNesting' must be greater than 0");
        }
        if self.extensions.is_empty() {
            bail!("'extensions' must list at least one file extension");
        }

        Ok(())
    }

    /// Rules left after applying `enabledRules` and `disabledRules`, in
    /// catalog order. An empty `enabledRules` selects the default catalog;
    /// opt-in rules run only when listed.
    pub fn effective_rules(&self) -> Vec<RuleId> {
        RuleId::selectable()
            .filter(|rule| {
                if self.enabled_rules.is_empty() {
                    RuleId::CATALOG.contains(rule)
                } else {
                    self.enabled_rules.contains(rule)
                }
            })
            .filter(|rule| !self.disabled_rules.contains(rule))
            .collect()
    }

    /// Validate and freeze into the form the analysis consumes.
    pub fn compile(&self) -> Result<AnalysisConfig> {
        self.validate()?;

        let ignores = self
            .ignores
            .iter()
            .map(|p| Pattern::new(p))
            .collect::<Result<Vec<_>, _>>()
            .context("Invalid glob pattern in 'ignores'")?;

        Ok(AnalysisConfig {
            enabled_rules: self.effective_rules(),
            thresholds: Thresholds {
                max_method_lines: self.max_method_lines,
                naming_min_words: self.naming_min_words,
            },
            extensions: self
                .extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
                .collect(),
            ignores,
            excluded_dirs: self.excluded_dirs.clone(),
            page_dirs: lowercase(&self.page_dirs),
            test_dirs: lowercase(&self.test_dirs),
            test_annotations: self.test_annotations.clone(),
            test_framework_imports: self.test_framework_imports.clone(),
            assertion_receivers: call_patterns(&self.assertion_receivers),
            assertion_callees: call_patterns(&self.assertion_callees),
            driver_receivers: call_patterns(&self.driver_receivers),
            exempt_receivers: call_patterns(&self.exempt_receivers),
            sensitive_data: compile_regexes(&self.sensitive_data_patterns, "sensitiveDataPatterns")?,
            generic_test_names: compile_regexes(&self.generic_test_names, "genericTestNames")?,
            file_timeout: (self.file_timeout_ms > 0)
                .then(|| Duration::from_millis(self.file_timeout_ms)),
            max_file_bytes: self.max_file_bytes,
            max_nesting: self.max_nesting,
        })
    }
}

fn lowercase(values: &[String]) -> Vec<String> {
    values.iter().map(|v| v.to_lowercase()).collect()
}

fn call_patterns(values: &[String]) -> Vec<CallPattern> {
    values.iter().map(|v| CallPattern::new(v)).collect()
}

fn compile_regexes(patterns: &[String], field: &str) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| {
            Regex::new(p)
                .with_context(|| format!("Invalid regular expression in '{}': \"{}\"", field, p))
        })
        .collect()
}

/// Numeric rule thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub max_method_lines: usize,
    pub naming_min_words: usize,
}

/// Immutable analysis configuration threaded through the driver and every
/// rule.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub enabled_rules: Vec<RuleId>,
    pub thresholds: Thresholds,
    pub extensions: Vec<String>,
    pub ignores: Vec<Pattern>,
    pub excluded_dirs: Vec<String>,
    pub page_dirs: Vec<String>,
    pub test_dirs: Vec<String>,
    pub test_annotations: Vec<String>,
    pub test_framework_imports: Vec<String>,
    pub assertion_receivers: Vec<CallPattern>,
    pub assertion_callees: Vec<CallPattern>,
    pub driver_receivers: Vec<CallPattern>,
    pub exempt_receivers: Vec<CallPattern>,
    pub sensitive_data: Vec<Regex>,
    pub generic_test_names: Vec<Regex>,
    pub file_timeout: Option<Duration>,
    pub max_file_bytes: u64,
    pub max_nesting: usize,
}

impl AnalysisConfig {
    pub fn is_test_annotation(&self, name: &str) -> bool {
        self.test_annotations.iter().any(|a| a == name)
    }

    /// A method carrying a recognized test-method annotation.
    pub fn is_test_method(&self, method: &MethodModel) -> bool {
        method.has_annotation(|name| self.is_test_annotation(name))
    }

    /// Fresh extraction budget for one file; the deadline starts now.
    pub fn budget(&self) -> Budget {
        Budget::new(self.file_timeout, self.max_nesting)
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Path of the file the config came from, `None` when using defaults.
    pub source: Option<PathBuf>,
}

/// Load the config file found from `start_dir` upward, or defaults.
pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    // A relative root such as "." has no parents to walk up to.
    let start_dir = fs::canonicalize(start_dir).unwrap_or_else(|_| start_dir.to_path_buf());
    match find_config_file(&start_dir) {
        Some(path) => load_config_file(&path),
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            source: None,
        }),
    }
}

/// Load an explicit config file.
pub fn load_config_file(path: &Path) -> Result<ConfigLoadResult> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;
    let config: Config = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;
    config.validate()?;
    Ok(ConfigLoadResult {
        config,
        source: Some(path.to_path_buf()),
    })
}
