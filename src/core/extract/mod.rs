//! Source model extraction.
//!
//! Parses one Java or C# file with its tree-sitter grammar, then walks the
//! syntax tree and records imports, type declarations, methods, call sites,
//! literal arguments and branching statements.
//!
//! Extraction either yields the complete model for the file or a
//! [`ParseFailure`]; partial models are never returned. A syntax tree with
//! any error or missing node counts as a failure.

pub mod languages;
mod walker;

use std::cell::RefCell;
use std::time::{Duration, Instant};

use thiserror::Error;
use tree_sitter::Parser;

use crate::core::model::{ClassModel, Dialect};

/// Why a file could not be modeled. The line is the best known location.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFailure {
    #[error("syntax error at line {line}")]
    Syntax { line: usize },

    #[error("missing '{token}' at line {line}")]
    Missing { token: String, line: usize },

    #[error("nesting deeper than {limit} levels at line {line}")]
    TooDeep { limit: usize, line: usize },

    #[error("parse timed out after {timeout_ms}ms near line {line}")]
    Timeout { timeout_ms: u64, line: usize },

    #[error("could not read file: {reason}")]
    Unreadable { reason: String },

    #[error("grammar unavailable: {reason}")]
    Grammar { reason: String },
}

impl ParseFailure {
    /// Line to report the failure at; 1 when nothing better is known.
    pub fn line(&self) -> usize {
        match self {
            ParseFailure::Syntax { line }
            | ParseFailure::Missing { line, .. }
            | ParseFailure::TooDeep { line, .. }
            | ParseFailure::Timeout { line, .. } => (*line).max(1),
            ParseFailure::Unreadable { .. } | ParseFailure::Grammar { .. } => 1,
        }
    }
}

/// Resource limits for extracting one file.
#[derive(Debug, Clone)]
pub struct Budget {
    deadline: Option<Instant>,
    timeout_ms: u64,
    pub max_nesting: usize,
}

impl Budget {
    pub const DEFAULT_MAX_NESTING: usize = 256;

    /// Start the clock now. `None` disables the deadline.
    pub fn new(timeout: Option<Duration>, max_nesting: usize) -> Self {
        Self {
            deadline: timeout.map(|t| Instant::now() + t),
            timeout_ms: timeout.map_or(0, |t| t.as_millis() as u64),
            max_nesting,
        }
    }

    pub fn unlimited() -> Self {
        Self::new(None, Self::DEFAULT_MAX_NESTING)
    }

    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Parser timeout for the time left; 0 means no timeout.
    fn remaining_micros(&self) -> u64 {
        self.deadline.map_or(0, |deadline| {
            let left = deadline.saturating_duration_since(Instant::now());
            (left.as_micros() as u64).max(1)
        })
    }

    /// Fail with [`ParseFailure::Timeout`] once the deadline has passed.
    pub fn check(&self, line: usize) -> Result<(), ParseFailure> {
        if self.is_expired() {
            return Err(ParseFailure::Timeout {
                timeout_ms: self.timeout_ms,
                line,
            });
        }
        Ok(())
    }
}

thread_local! {
    static PARSER: RefCell<Parser> = RefCell::new(Parser::new());
}

/// Extract every type declared in `text`.
///
/// Each returned class carries the file's imports. A file that declares no
/// types yields an empty list.
pub fn extract(
    text: &str,
    dialect: Dialect,
    budget: &Budget,
) -> Result<Vec<ClassModel>, ParseFailure> {
    budget.check(1)?;
    let grammar = languages::for_dialect(dialect);
    let tree = PARSER.with(|parser| -> Result<_, ParseFailure> {
        let mut parser = parser.borrow_mut();
        parser.reset();
        parser
            .set_language(&grammar.language())
            .map_err(|err| ParseFailure::Grammar {
                reason: err.to_string(),
            })?;
        parser.set_timeout_micros(budget.remaining_micros());
        Ok(parser.parse(text, None))
    })?;
    let Some(tree) = tree else {
        return Err(ParseFailure::Timeout {
            timeout_ms: budget.timeout_ms,
            line: 1,
        });
    };

    let root = tree.root_node();
    if root.has_error() {
        let node = walker::first_error(root).unwrap_or(root);
        let line = node.start_position().row + 1;
        return Err(if node.is_missing() {
            ParseFailure::Missing {
                token: node.kind().to_string(),
                line,
            }
        } else {
            ParseFailure::Syntax { line }
        });
    }

    walker::Walker::new(grammar, text.as_bytes(), budget).walk(root)
}
