//! Structural model extracted from one test source file.
//!
//! The model is deliberately shallow: it records just enough about classes,
//! methods, imports, annotations, call sites and literal arguments for the
//! rule catalog to work on, with exact 1-based line numbers everywhere.

use std::path::{Path, PathBuf};

/// Host language dialect of a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    Java,
    CSharp,
}

impl Dialect {
    /// Detect the dialect from a file extension (without the dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "java" => Some(Dialect::Java),
            "cs" => Some(Dialect::CSharp),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

/// One source file read from disk. Immutable once read.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Absolute path, the file's identity.
    pub path: PathBuf,
    /// Path relative to the scan root with `/` separators, used in reports.
    pub display_path: String,
    pub text: String,
    pub dialect: Dialect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportStatement {
    pub qualified_name: String,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationUsage {
    /// Simple name, e.g. `Test` for `@org.junit.Test` or `[TestAttribute]`.
    pub name: String,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    pub callee_name: String,
    /// Root identifier of the receiver chain; empty for unqualified calls.
    pub receiver_hint: String,
    pub line: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    String,
    Number,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralArg {
    pub value: String,
    pub line: usize,
    pub kind: LiteralKind,
    /// Callee of the call this literal was passed into.
    pub callee_name: String,
}

/// A branching or looping statement inside a method body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchSite {
    /// Human label such as `if/else` or `for loop`.
    pub construct: &'static str,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodModel {
    pub name: String,
    pub line_start: usize,
    pub line_end: usize,
    pub body_line_count: usize,
    pub annotations: Vec<AnnotationUsage>,
    pub call_sites: Vec<CallSite>,
    pub literal_arguments: Vec<LiteralArg>,
    pub branches: Vec<BranchSite>,
}

impl MethodModel {
    pub fn has_annotation(&self, matches: impl Fn(&str) -> bool) -> bool {
        self.annotations.iter().any(|a| matches(&a.name))
    }
}

/// Architectural layer of a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    PageObject,
    TestDefinition,
    Unclassified,
}

impl std::fmt::Display for LayerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayerKind::PageObject => write!(f, "page-object"),
            LayerKind::TestDefinition => write!(f, "test-definition"),
            LayerKind::Unclassified => write!(f, "unclassified"),
        }
    }
}

/// One type declaration (top-level or nested) as seen by the extractor.
///
/// The layer is not part of the extracted model; it is assigned exactly once
/// by [`ClassifiedClass::new`](crate::core::classify::ClassifiedClass::new).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassModel {
    pub name: String,
    pub line: usize,
    pub imports: Vec<ImportStatement>,
    pub methods: Vec<MethodModel>,
}
