//! C# grammar.

use tree_sitter::{Language, Node};

use crate::core::extract::languages::{
    CallShape, HostGrammar, line_of, named_children, node_text, simple_name,
};
use crate::core::model::AnnotationUsage;

pub struct CSharp;

impl HostGrammar for CSharp {
    fn language(&self) -> Language {
        tree_sitter_c_sharp::LANGUAGE.into()
    }

    fn is_type_declaration(&self, kind: &str) -> bool {
        matches!(
            kind,
            "class_declaration"
                | "struct_declaration"
                | "interface_declaration"
                | "record_declaration"
                | "record_struct_declaration"
                | "enum_declaration"
        )
    }

    fn is_method(&self, kind: &str) -> bool {
        matches!(kind, "method_declaration" | "constructor_declaration")
    }

    fn is_comment(&self, kind: &str) -> bool {
        kind == "comment"
    }

    fn is_string_literal(&self, kind: &str) -> bool {
        matches!(
            kind,
            "string_literal" | "verbatim_string_literal" | "raw_string_literal"
        )
    }

    fn is_number_literal(&self, kind: &str) -> bool {
        matches!(kind, "integer_literal" | "real_literal")
    }

    fn branch_construct(&self, kind: &str) -> Option<&'static str> {
        match kind {
            "if_statement" => Some("if/else"),
            "for_statement" | "foreach_statement" => Some("for loop"),
            "while_statement" | "do_statement" => Some("while loop"),
            _ => None,
        }
    }

    fn import_name(&self, node: Node<'_>, source: &[u8]) -> Option<String> {
        if node.kind() != "using_directive" {
            return None;
        }
        // `using Alias = Target;` names the alias first, so the target is last.
        let target = named_children(node).into_iter().rev().find(|child| {
            matches!(
                child.kind(),
                "qualified_name" | "identifier" | "generic_name" | "alias_qualified_name"
            )
        })?;
        Some(node_text(target, source).to_string())
    }

    fn annotations(&self, member: Node<'_>, source: &[u8]) -> Vec<AnnotationUsage> {
        named_children(member)
            .into_iter()
            .filter(|child| child.kind() == "attribute_list")
            .flat_map(named_children)
            .filter(|child| child.kind() == "attribute")
            .filter_map(|attribute| {
                let name = attribute.child_by_field_name("name")?;
                let simple = simple_name(node_text(name, source));
                let simple = match simple.strip_suffix("Attribute") {
                    Some(stripped) if !stripped.is_empty() => stripped,
                    _ => simple,
                };
                Some(AnnotationUsage {
                    name: simple.to_string(),
                    line: line_of(attribute),
                })
            })
            .collect()
    }

    fn call<'t>(&self, node: Node<'t>, source: &[u8]) -> Option<CallShape<'t>> {
        match node.kind() {
            "invocation_expression" => {
                let function = node.child_by_field_name("function")?;
                let (name, receiver) = invoked_member(function)?;
                Some(CallShape {
                    callee: simple_name(node_text(name, source)).to_string(),
                    position: name,
                    receiver,
                    arguments: node.child_by_field_name("arguments"),
                })
            }
            "object_creation_expression" => {
                let ty = node.child_by_field_name("type")?;
                Some(CallShape {
                    callee: simple_name(node_text(ty, source)).to_string(),
                    position: ty,
                    receiver: None,
                    arguments: node.child_by_field_name("arguments"),
                })
            }
            _ => None,
        }
    }

    fn method_body<'t>(&self, member: Node<'t>) -> Option<Node<'t>> {
        member.child_by_field_name("body").or_else(|| {
            named_children(member)
                .into_iter()
                .find(|child| matches!(child.kind(), "block" | "arrow_expression_clause"))
        })
    }
}

/// Callee name node and receiver expression of an invoked function.
fn invoked_member(function: Node<'_>) -> Option<(Node<'_>, Option<Node<'_>>)> {
    match function.kind() {
        "member_access_expression" => Some((
            function.child_by_field_name("name")?,
            function.child_by_field_name("expression"),
        )),
        "identifier" | "generic_name" => Some((function, None)),
        // `driver?.Quit()` parsed with the invocation outside the conditional access.
        "conditional_access_expression" => {
            let binding = named_children(function)
                .into_iter()
                .find(|child| child.kind() == "member_binding_expression")?;
            Some((
                binding.child_by_field_name("name")?,
                conditional_target(function),
            ))
        }
        // `driver?.Quit()` parsed with the invocation inside the conditional access.
        "member_binding_expression" => {
            let receiver = std::iter::successors(function.parent(), |node| node.parent())
                .take(4)
                .find(|node| node.kind() == "conditional_access_expression")
                .and_then(conditional_target);
            Some((function.child_by_field_name("name")?, receiver))
        }
        _ => None,
    }
}

fn conditional_target(access: Node<'_>) -> Option<Node<'_>> {
    access
        .child_by_field_name("condition")
        .or_else(|| access.named_child(0))
}
