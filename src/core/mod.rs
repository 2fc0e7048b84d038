//! Core analysis engine.
//!
//! Data flows through the modules in this order:
//!
//! 1. `file_scanner`: enumerate source files under the scan root
//! 2. `extract`: turn each file's text into [`model::ClassModel`]s
//! 3. `classify`: assign every class its [`model::LayerKind`]
//! 4. `crate::rules`: evaluate the rule catalog per class
//! 5. `driver`: run 1-4 for every file in parallel and aggregate
//!
//! `analyzer` holds the per-file part of the pipeline.

pub mod analyzer;
pub mod cancellation;
pub mod classify;
pub mod driver;
pub mod extract;
pub mod file_scanner;
pub mod model;

pub use cancellation::ScanCancellation;
pub use driver::{ScanError, run};
