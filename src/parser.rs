//! @ai:module:intent Parse source files with tree-sitter and lower top-level functions
//! @ai:module:layer application
//! @ai:module:public_api parse_file, parse_source, ParsedSource, TreeSitterFrontend
//! @ai:module:depends_on language, syntax, error
//! @ai:module:stateless true

use crate::error::{Error, Result};
use crate::language::{detect_language, Language};
use crate::syntax::{FunctionDecl, ParamDecl, SyntaxFrontend, TypeKind, TypeNode};
use std::path::Path;
use tree_sitter::{Node, Parser};

const FUNCTION_KINDS: &[&str] = &[
    "function_declaration",
    "generator_function_declaration",
    "function_signature",
];

/// @ai:intent Parsed source file lowered to the declaration model
#[derive(Debug)]
pub struct ParsedSource {
    pub language: Language,
    pub functions: Vec<FunctionDecl>,
}

/// @ai:intent Tree-sitter backed front end for one language
#[derive(Debug, Clone, Copy)]
pub struct TreeSitterFrontend {
    language: Language,
}

impl TreeSitterFrontend {
    pub fn new(language: Language) -> Self {
        Self { language }
    }
}

impl SyntaxFrontend for TreeSitterFrontend {
    /// @ai:intent Parse the source and collect every function declared at the top level
    /// @ai:post nested declarations are visited but never collected
    /// @ai:effects pure
    fn top_level_functions(&self, source: &str) -> Result<Vec<FunctionDecl>> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language.grammar())
            .map_err(|source| Error::Grammar {
                language: self.language.name(),
                source,
            })?;

        let tree = parser.parse(source, None).ok_or_else(|| {
            Error::Parse(format!(
                "tree-sitter returned no tree for {} source",
                self.language.name()
            ))
        })?;

        let mut functions = Vec::new();
        visit(tree.root_node(), source.as_bytes(), &mut functions);
        Ok(functions)
    }
}

/// @ai:intent Parse a source file into the declaration model
/// @ai:pre path exists and is readable
/// @ai:effects fs:read
pub fn parse_file(path: &Path) -> Result<ParsedSource> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_source(&content, detect_language(path))
}

/// @ai:intent Parse source text into the declaration model
/// @ai:effects pure
pub fn parse_source(content: &str, language: Language) -> Result<ParsedSource> {
    let functions = TreeSitterFrontend::new(language).top_level_functions(content)?;
    Ok(ParsedSource {
        language,
        functions,
    })
}

fn visit(node: Node, source: &[u8], functions: &mut Vec<FunctionDecl>) {
    if FUNCTION_KINDS.contains(&node.kind()) && is_top_level(node) {
        functions.push(lower_function(node, source));
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        visit(child, source, functions);
    }
}

/// @ai:intent Check whether a declaration sits directly in the program, possibly behind `export`
/// @ai:effects pure
fn is_top_level(node: Node) -> bool {
    match node.parent() {
        Some(parent) if parent.kind() == "program" => true,
        Some(parent) if parent.kind() == "export_statement" => parent
            .parent()
            .is_some_and(|grandparent| grandparent.kind() == "program"),
        _ => false,
    }
}

fn lower_function(node: Node, source: &[u8]) -> FunctionDecl {
    let name = node
        .child_by_field_name("name")
        .map(|n| node_text(n, source).to_string())
        .unwrap_or_default();

    let parameters = node
        .child_by_field_name("parameters")
        .map(|params| lower_parameters(params, source))
        .unwrap_or_default();

    let return_type = node
        .child_by_field_name("return_type")
        .map(|annotation| lower_annotation(annotation, source));

    FunctionDecl {
        name,
        docs: leading_docs(node, source),
        parameters,
        return_type,
        line: node.start_position().row + 1,
    }
}

/// @ai:intent Collect the JSDoc blocks directly preceding a declaration or its export wrapper
/// @ai:post blocks are returned in source order; plain comments in between are skipped
/// @ai:effects pure
fn leading_docs(node: Node, source: &[u8]) -> Vec<String> {
    let anchor = match node.parent() {
        Some(parent) if parent.kind() == "export_statement" => parent,
        _ => node,
    };

    let mut docs = Vec::new();
    let mut current = anchor.prev_sibling();
    while let Some(sibling) = current {
        if sibling.kind() != "comment" {
            break;
        }
        let text = node_text(sibling, source);
        if is_jsdoc(text) {
            docs.push(text.to_string());
        }
        current = sibling.prev_sibling();
    }

    docs.reverse();
    docs
}

fn is_jsdoc(comment: &str) -> bool {
    comment.starts_with("/**") && !comment.starts_with("/**/") && comment.ends_with("*/")
}

fn lower_parameters(params: Node, source: &[u8]) -> Vec<ParamDecl> {
    let mut cursor = params.walk();
    let lowered = params
        .named_children(&mut cursor)
        .filter_map(|child| lower_parameter(child, source))
        .collect();
    lowered
}

/// @ai:intent Lower one formal parameter from either the TypeScript or JavaScript grammar
/// @ai:effects pure
fn lower_parameter(node: Node, source: &[u8]) -> Option<ParamDecl> {
    match node.kind() {
        // TypeScript
        "required_parameter" | "optional_parameter" => {
            let pattern = node.child_by_field_name("pattern")?;
            let (name, rest) = pattern_name(pattern, source);
            Some(ParamDecl {
                name,
                type_node: node
                    .child_by_field_name("type")
                    .map(|annotation| lower_annotation(annotation, source)),
                question: node.kind() == "optional_parameter",
                has_default: node.child_by_field_name("value").is_some(),
                rest,
            })
        }
        // JavaScript
        "assignment_pattern" => {
            let left = node.child_by_field_name("left")?;
            let (name, rest) = pattern_name(left, source);
            Some(ParamDecl {
                name,
                has_default: true,
                rest,
                ..Default::default()
            })
        }
        "identifier" | "rest_pattern" | "object_pattern" | "array_pattern" => {
            let (name, rest) = pattern_name(node, source);
            Some(ParamDecl {
                name,
                rest,
                ..Default::default()
            })
        }
        _ => None,
    }
}

fn pattern_name(pattern: Node, source: &[u8]) -> (String, bool) {
    if pattern.kind() == "rest_pattern" {
        let name = pattern
            .named_child(0)
            .map(|inner| node_text(inner, source))
            .unwrap_or_else(|| node_text(pattern, source).trim_start_matches("..."));
        return (name.to_string(), true);
    }
    (node_text(pattern, source).to_string(), false)
}

/// @ai:intent Lower a `: T` annotation, or a predicate/asserts annotation, to a type node
/// @ai:effects pure
fn lower_annotation(annotation: Node, source: &[u8]) -> TypeNode {
    if annotation.kind() == "type_annotation" {
        if let Some(inner) = annotation.named_child(0) {
            return lower_type(inner, source);
        }
    }
    TypeNode::new(
        TypeKind::Other,
        node_text(annotation, source).trim_start_matches(':').trim(),
    )
}

fn lower_type(node: Node, source: &[u8]) -> TypeNode {
    let text = node_text(node, source).trim();

    let kind = match node.kind() {
        "predefined_type" => TypeKind::Keyword(text.to_string()),
        "union_type" => TypeKind::Union,
        "tuple_type" => TypeKind::Tuple,
        "type_identifier" | "nested_type_identifier" => TypeKind::Reference {
            name: text.to_string(),
            arguments: Vec::new(),
        },
        "generic_type" => {
            let name = node
                .child_by_field_name("name")
                .map(|n| node_text(n, source).trim().to_string())
                .unwrap_or_default();
            let arguments = node
                .child_by_field_name("type_arguments")
                .map(|args| {
                    let mut cursor = args.walk();
                    let lowered: Vec<TypeNode> = args
                        .named_children(&mut cursor)
                        .filter(|arg| arg.kind() != "comment")
                        .map(|arg| lower_type(arg, source))
                        .collect();
                    lowered
                })
                .unwrap_or_default();
            TypeKind::Reference { name, arguments }
        }
        "array_type" => match node.named_child(0) {
            Some(element) => TypeKind::Array(Box::new(lower_type(element, source))),
            None => TypeKind::Other,
        },
        "parenthesized_type" => {
            if let Some(inner) = node.named_child(0) {
                return lower_type(inner, source);
            }
            TypeKind::Other
        }
        _ => TypeKind::Other,
    };

    TypeNode::new(kind, text)
}

fn node_text<'a>(node: Node, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or("")
}
