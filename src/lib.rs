//! gtaa - gTAA layering checker for UI/API test automation code
//!
//! gtaa is a CLI tool and library that reads Java and C# test sources and
//! flags violations of the Generic Test Automation Architecture: test
//! framework code leaking into Page Objects, tests driving the browser
//! directly, hardcoded test data, vague test names and oversized tests.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and compilation
//! - `core`: Extraction, classification and the scan driver
//! - `issues`: Violation types and the scan report
//! - `rules`: The rule catalog
//! - `utils`: Shared matching helpers

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod rules;
pub mod utils;
