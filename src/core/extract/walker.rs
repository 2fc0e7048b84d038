//! Syntax tree walk that builds [`ClassModel`]s.
//!
//! Type declarations are collected wherever they appear, including inside
//! method bodies, and each becomes its own class. Everything else under a
//! method body is attributed to that method: call sites, literal arguments
//! and branching statements.

use tree_sitter::{Node, TreeCursor};

use crate::core::extract::languages::{
    HostGrammar, line_of, named_children, node_text, simple_name, unquote,
};
use crate::core::extract::{Budget, ParseFailure};
use crate::core::model::{
    BranchSite, CallSite, ClassModel, ImportStatement, LiteralArg, LiteralKind, MethodModel,
};

/// Hard cap on syntax tree depth, whatever the configured nesting limit.
const MAX_TREE_DEPTH: usize = 4096;

/// Nodes visited between two deadline checks.
const DEADLINE_CHECK_INTERVAL: usize = 4096;

/// Upper bound on links followed when resolving a receiver chain.
const MAX_CHAIN_WALK: usize = 64;

/// Nodes that open a nesting level: bodies, blocks and bracketed groups.
const SCOPE_KINDS: &[&str] = &[
    "class_body",
    "interface_body",
    "enum_body",
    "annotation_type_body",
    "declaration_list",
    "block",
    "constructor_body",
    "switch_block",
    "switch_body",
    "argument_list",
    "parenthesized_expression",
    "array_initializer",
    "initializer_expression",
    "lambda_expression",
];

#[derive(Debug, Clone, Copy, Default)]
struct Depth {
    scopes: usize,
    tree: usize,
}

impl Depth {
    fn descend(self, kind: &str) -> Self {
        Self {
            scopes: self.scopes + usize::from(SCOPE_KINDS.contains(&kind)),
            tree: self.tree + 1,
        }
    }
}

/// What one method body contributes, keyed by byte offset for ordering.
#[derive(Default)]
struct MethodFacts {
    calls: Vec<(usize, CallSite)>,
    literals: Vec<(usize, LiteralArg)>,
    branches: Vec<BranchSite>,
}

pub struct Walker<'a> {
    grammar: &'static dyn HostGrammar,
    source: &'a [u8],
    budget: &'a Budget,
    imports: Vec<ImportStatement>,
    classes: Vec<ClassModel>,
    visited: usize,
}

impl<'a> Walker<'a> {
    pub fn new(grammar: &'static dyn HostGrammar, source: &'a [u8], budget: &'a Budget) -> Self {
        Self {
            grammar,
            source,
            budget,
            imports: Vec::new(),
            classes: Vec::new(),
            visited: 0,
        }
    }

    /// Walk the compilation unit and return its classes, each carrying the
    /// file's imports.
    pub fn walk(mut self, root: Node<'_>) -> Result<Vec<ClassModel>, ParseFailure> {
        self.walk_scope(root, Depth::default())?;
        let imports = self.imports;
        Ok(self
            .classes
            .into_iter()
            .map(|class| ClassModel {
                imports: imports.clone(),
                ..class
            })
            .collect())
    }

    fn enter(&mut self, node: Node<'_>, depth: Depth) -> Result<Depth, ParseFailure> {
        let depth = depth.descend(node.kind());
        if depth.scopes > self.budget.max_nesting {
            return Err(ParseFailure::TooDeep {
                limit: self.budget.max_nesting,
                line: line_of(node),
            });
        }
        if depth.tree > MAX_TREE_DEPTH {
            return Err(ParseFailure::TooDeep {
                limit: MAX_TREE_DEPTH,
                line: line_of(node),
            });
        }
        self.visited += 1;
        if self.visited % DEADLINE_CHECK_INTERVAL == 0 {
            self.budget.check(line_of(node))?;
        }
        Ok(depth)
    }

    /// Package, namespace and compilation-unit level.
    fn walk_scope(&mut self, node: Node<'_>, depth: Depth) -> Result<(), ParseFailure> {
        let depth = self.enter(node, depth)?;
        for child in named_children(node) {
            if let Some(qualified_name) = self.grammar.import_name(child, self.source) {
                self.imports.push(ImportStatement {
                    qualified_name,
                    line: line_of(child),
                });
            } else if self.grammar.is_type_declaration(child.kind()) {
                self.walk_type(child, depth)?;
            } else if !self.grammar.is_comment(child.kind()) {
                self.walk_scope(child, depth)?;
            }
        }
        Ok(())
    }

    fn walk_type(&mut self, node: Node<'_>, depth: Depth) -> Result<(), ParseFailure> {
        let depth = self.enter(node, depth)?;
        let name = node.child_by_field_name("name");
        // Reserve the slot first so an enclosing type precedes its nested types.
        let index = self.classes.len();
        self.classes.push(ClassModel {
            name: name
                .map(|n| node_text(n, self.source).to_string())
                .unwrap_or_default(),
            line: line_of(name.unwrap_or(node)),
            imports: Vec::new(),
            methods: Vec::new(),
        });
        if let Some(body) = node.child_by_field_name("body") {
            self.walk_members(body, index, depth)?;
        }
        Ok(())
    }

    fn walk_members(
        &mut self,
        body: Node<'_>,
        index: usize,
        depth: Depth,
    ) -> Result<(), ParseFailure> {
        let depth = self.enter(body, depth)?;
        for member in named_children(body) {
            let kind = member.kind();
            if self.grammar.is_type_declaration(kind) {
                self.walk_type(member, depth)?;
            } else if self.grammar.is_member_group(kind) {
                self.walk_members(member, index, depth)?;
            } else if self.grammar.is_method(kind) {
                if let Some(method) = self.method(member, depth)? {
                    self.classes[index].methods.push(method);
                }
            }
        }
        Ok(())
    }

    fn method(
        &mut self,
        member: Node<'_>,
        depth: Depth,
    ) -> Result<Option<MethodModel>, ParseFailure> {
        let Some(body) = self.grammar.method_body(member) else {
            return Ok(None);
        };
        let name = member.child_by_field_name("name");

        let mut facts = MethodFacts::default();
        self.walk_body(body, &mut facts, None, depth)?;
        facts.calls.sort_by_key(|(offset, _)| *offset);
        facts.literals.sort_by_key(|(offset, _)| *offset);
        facts.branches.sort_by_key(|branch| branch.line);

        // An expression body ends with the declaration's `;`.
        let end = if body.kind() == "arrow_expression_clause" {
            member
        } else {
            body
        };
        Ok(Some(MethodModel {
            name: name
                .map(|n| node_text(n, self.source).to_string())
                .unwrap_or_default(),
            line_start: line_of(name.unwrap_or(member)),
            line_end: end.end_position().row + 1,
            body_line_count: self.body_line_count(body),
            annotations: self.grammar.annotations(member, self.source),
            call_sites: facts.calls.into_iter().map(|(_, call)| call).collect(),
            literal_arguments: facts.literals.into_iter().map(|(_, lit)| lit).collect(),
            branches: facts.branches,
        }))
    }

    /// `callee` is set while inside the argument list of that call.
    fn walk_body(
        &mut self,
        node: Node<'_>,
        facts: &mut MethodFacts,
        callee: Option<&str>,
        depth: Depth,
    ) -> Result<(), ParseFailure> {
        let kind = node.kind();
        if self.grammar.is_type_declaration(kind) {
            return self.walk_type(node, depth);
        }
        let depth = self.enter(node, depth)?;

        if let Some(construct) = self.grammar.branch_construct(kind) {
            facts.branches.push(BranchSite {
                construct,
                line: line_of(node),
            });
        }

        if let Some(call) = self.grammar.call(node, self.source) {
            let receiver_hint = call
                .receiver
                .map(|receiver| receiver_hint(receiver, self.source))
                .unwrap_or_default();
            facts.calls.push((
                call.position.start_byte(),
                CallSite {
                    callee_name: call.callee.clone(),
                    receiver_hint,
                    line: line_of(call.position),
                },
            ));
            let arguments = call.arguments.map(|a| a.id());
            for child in named_children(node) {
                let context = if Some(child.id()) == arguments {
                    Some(call.callee.as_str())
                } else {
                    callee
                };
                self.walk_body(child, facts, context, depth)?;
            }
            return Ok(());
        }

        let literal_kind = if self.grammar.is_string_literal(kind) {
            Some(LiteralKind::String)
        } else if self.grammar.is_number_literal(kind) {
            Some(LiteralKind::Number)
        } else {
            None
        };
        if let Some(literal_kind) = literal_kind {
            if let Some(callee) = callee {
                let text = node_text(node, self.source);
                let value = match literal_kind {
                    LiteralKind::String => unquote(text),
                    LiteralKind::Number => text,
                };
                facts.literals.push((
                    node.start_byte(),
                    LiteralArg {
                        value: value.to_string(),
                        line: line_of(node),
                        kind: literal_kind,
                        callee_name: callee.to_string(),
                    },
                ));
            }
            return Ok(());
        }

        for child in named_children(node) {
            self.walk_body(child, facts, callee, depth)?;
        }
        Ok(())
    }

    /// Distinct lines holding code strictly inside the body delimiters.
    fn body_line_count(&self, body: Node<'_>) -> usize {
        let braced = body.kind() != "arrow_expression_clause";
        let mut rows = Vec::new();
        for_each_leaf(body.walk(), |leaf| {
            let delimiter = if braced {
                leaf.start_byte() == body.start_byte() || leaf.end_byte() == body.end_byte()
            } else {
                leaf.kind() == "=>"
            };
            if !delimiter && !self.grammar.is_comment(leaf.kind()) {
                rows.push(leaf.start_position().row);
            }
        });
        rows.sort_unstable();
        rows.dedup();
        rows.len()
    }
}

/// Root identifier of a receiver chain: `driver` for
/// `this.driver.findElement(..).click()`, empty when there is none.
pub fn receiver_hint(node: Node<'_>, source: &[u8]) -> String {
    let is_self = |n: Node<'_>| matches!(node_text(n, source), "this" | "super" | "base");

    let mut current = node;
    for _ in 0..MAX_CHAIN_WALK {
        let next = match current.kind() {
            "identifier" => return node_text(current, source).to_string(),
            "generic_name" | "type_identifier" => {
                return simple_name(node_text(current, source)).to_string();
            }
            "field_access" | "member_access_expression" => {
                let (object, member) = if current.kind() == "field_access" {
                    ("object", "field")
                } else {
                    ("expression", "name")
                };
                match current.child_by_field_name(object) {
                    Some(object) if is_self(object) => {
                        return current
                            .child_by_field_name(member)
                            .map(|m| simple_name(node_text(m, source)).to_string())
                            .unwrap_or_default();
                    }
                    other => other,
                }
            }
            "method_invocation" => match current.child_by_field_name("object") {
                Some(object) if !is_self(object) => Some(object),
                _ => {
                    return current
                        .child_by_field_name("name")
                        .map(|n| node_text(n, source).to_string())
                        .unwrap_or_default();
                }
            },
            "invocation_expression" => current.child_by_field_name("function"),
            "array_access" => current.child_by_field_name("array"),
            "element_access_expression" => current.child_by_field_name("expression"),
            "conditional_access_expression" => current
                .child_by_field_name("condition")
                .or_else(|| current.named_child(0)),
            "parenthesized_expression" | "cast_expression" => {
                current.named_child(current.named_child_count().saturating_sub(1))
            }
            _ => None,
        };
        match next {
            Some(next) => current = next,
            None => return String::new(),
        }
    }
    String::new()
}

/// First error or missing node in document order.
pub fn first_error(root: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        if node.has_error() && cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return None;
            }
        }
    }
}

fn for_each_leaf<'t>(mut cursor: TreeCursor<'t>, mut visit: impl FnMut(Node<'t>)) {
    loop {
        if cursor.goto_first_child() {
            continue;
        }
        visit(cursor.node());
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return;
            }
        }
    }
}
