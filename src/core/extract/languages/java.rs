//! Java grammar.

use tree_sitter::{Language, Node};

use crate::core::extract::languages::{
    CallShape, HostGrammar, line_of, named_children, node_text, simple_name,
};
use crate::core::model::AnnotationUsage;

pub struct Java;

impl HostGrammar for Java {
    fn language(&self) -> Language {
        tree_sitter_java::LANGUAGE.into()
    }

    fn is_type_declaration(&self, kind: &str) -> bool {
        matches!(
            kind,
            "class_declaration"
                | "interface_declaration"
                | "enum_declaration"
                | "record_declaration"
                | "annotation_type_declaration"
        )
    }

    fn is_method(&self, kind: &str) -> bool {
        matches!(
            kind,
            "method_declaration" | "constructor_declaration" | "compact_constructor_declaration"
        )
    }

    fn is_member_group(&self, kind: &str) -> bool {
        kind == "enum_body_declarations"
    }

    fn is_comment(&self, kind: &str) -> bool {
        matches!(kind, "line_comment" | "block_comment")
    }

    fn is_string_literal(&self, kind: &str) -> bool {
        matches!(kind, "string_literal" | "text_block")
    }

    fn is_number_literal(&self, kind: &str) -> bool {
        matches!(
            kind,
            "decimal_integer_literal"
                | "hex_integer_literal"
                | "octal_integer_literal"
                | "binary_integer_literal"
                | "decimal_floating_point_literal"
                | "hex_floating_point_literal"
        )
    }

    fn branch_construct(&self, kind: &str) -> Option<&'static str> {
        match kind {
            "if_statement" => Some("if/else"),
            "for_statement" | "enhanced_for_statement" => Some("for loop"),
            "while_statement" | "do_statement" => Some("while loop"),
            _ => None,
        }
    }

    fn import_name(&self, node: Node<'_>, source: &[u8]) -> Option<String> {
        if node.kind() != "import_declaration" {
            return None;
        }
        let children = named_children(node);
        let name = children
            .iter()
            .find(|child| matches!(child.kind(), "scoped_identifier" | "identifier"))?;
        let mut qualified = node_text(*name, source).to_string();
        if children.iter().any(|child| child.kind() == "asterisk") {
            qualified.push_str(".*");
        }
        Some(qualified)
    }

    fn annotations(&self, member: Node<'_>, source: &[u8]) -> Vec<AnnotationUsage> {
        let Some(modifiers) = named_children(member)
            .into_iter()
            .find(|child| child.kind() == "modifiers")
        else {
            return Vec::new();
        };
        named_children(modifiers)
            .into_iter()
            .filter(|child| matches!(child.kind(), "marker_annotation" | "annotation"))
            .filter_map(|annotation| {
                let name = annotation.child_by_field_name("name")?;
                Some(AnnotationUsage {
                    name: simple_name(node_text(name, source)).to_string(),
                    line: line_of(annotation),
                })
            })
            .collect()
    }

    fn call<'t>(&self, node: Node<'t>, source: &[u8]) -> Option<CallShape<'t>> {
        match node.kind() {
            "method_invocation" => {
                let name = node.child_by_field_name("name")?;
                Some(CallShape {
                    callee: node_text(name, source).to_string(),
                    position: name,
                    receiver: node.child_by_field_name("object"),
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
            "assert_statement" => Some(CallShape {
                callee: "assert".to_string(),
                position: node,
                receiver: None,
                arguments: None,
            }),
            _ => None,
        }
    }
}
