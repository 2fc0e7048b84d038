//! Host grammars: the tree-sitter language of each dialect plus the node
//! kinds the walker needs to find types, methods, calls and literals.

pub mod csharp;
pub mod java;

use tree_sitter::{Language, Node};

use crate::core::model::{AnnotationUsage, Dialect};

/// One call expression as the walker sees it.
pub struct CallShape<'t> {
    /// Simple name of the method (or type, for constructor calls).
    pub callee: String,
    /// Node whose position is reported for the call.
    pub position: Node<'t>,
    /// Expression the method is invoked on, if any.
    pub receiver: Option<Node<'t>>,
    pub arguments: Option<Node<'t>>,
}

/// Dialect-specific knowledge layered over a tree-sitter grammar.
pub trait HostGrammar: Sync {
    fn language(&self) -> Language;

    /// Declarations that become their own `ClassModel`.
    fn is_type_declaration(&self, kind: &str) -> bool;

    fn is_method(&self, kind: &str) -> bool;

    /// Nodes inside a type body that hold further members.
    fn is_member_group(&self, _kind: &str) -> bool {
        false
    }

    fn is_comment(&self, kind: &str) -> bool;

    fn is_string_literal(&self, kind: &str) -> bool;

    fn is_number_literal(&self, kind: &str) -> bool;

    /// Label for branching and looping statements.
    fn branch_construct(&self, kind: &str) -> Option<&'static str>;

    /// Qualified name brought in by an import directive.
    fn import_name(&self, node: Node<'_>, source: &[u8]) -> Option<String>;

    /// Annotations or attributes attached to a member declaration.
    fn annotations(&self, member: Node<'_>, source: &[u8]) -> Vec<AnnotationUsage>;

    fn call<'t>(&self, node: Node<'t>, source: &[u8]) -> Option<CallShape<'t>>;

    /// `None` for declarations without a body (abstract, interface, extern).
    fn method_body<'t>(&self, member: Node<'t>) -> Option<Node<'t>> {
        member.child_by_field_name("body")
    }
}

pub fn for_dialect(dialect: Dialect) -> &'static dyn HostGrammar {
    match dialect {
        Dialect::Java => &java::Java,
        Dialect::CSharp => &csharp::CSharp,
    }
}

pub fn node_text<'s>(node: Node<'_>, source: &'s [u8]) -> &'s str {
    node.utf8_text(source).unwrap_or("")
}

/// 1-based line of the node's first byte.
pub fn line_of(node: Node<'_>) -> usize {
    node.start_position().row + 1
}

/// `java.util.List<String>` → `List`.
pub fn simple_name(text: &str) -> &str {
    let base = text.split('<').next().unwrap_or(text).trim();
    base.rsplit('.').next().unwrap_or(base).trim()
}

/// Strip the quotes (and a C# `@`/`$` prefix) from a string literal.
pub fn unquote(text: &str) -> &str {
    let body = text.trim_start_matches(['@', '$']);
    let quotes = body.len() - body.trim_start_matches('"').len();
    if quotes == 2 || body.len() < quotes * 2 {
        return "";
    }
    &body[quotes..body.len() - quotes]
}

pub fn named_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}
