//! @ai:module:intent Parser-independent model of the declarations the extractor consumes
//! @ai:module:layer domain
//! @ai:module:public_api FunctionDecl, ParamDecl, TypeNode, TypeKind, SyntaxFrontend
//! @ai:module:stateless true
//!
//! The classifier and type resolver only ever see these types. A front end
//! (see [`crate::parser`]) lowers its own tree into them.

use crate::error::Result;

/// @ai:intent Produce the top-level function declarations of a source text in source order
pub trait SyntaxFrontend {
    fn top_level_functions(&self, source: &str) -> Result<Vec<FunctionDecl>>;
}

/// @ai:intent A top-level function declaration with its attached JSDoc blocks
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FunctionDecl {
    pub name: String,
    /// Raw `/** ... */` blocks preceding the declaration, in source order
    pub docs: Vec<String>,
    pub parameters: Vec<ParamDecl>,
    pub return_type: Option<TypeNode>,
    /// 1-based
    pub line: usize,
}

/// @ai:intent A declared parameter and its language-level markers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamDecl {
    pub name: String,
    pub type_node: Option<TypeNode>,
    pub question: bool,
    pub has_default: bool,
    pub rest: bool,
}

/// @ai:intent A language-level type expression together with its source text
#[derive(Debug, Clone, PartialEq)]
pub struct TypeNode {
    pub kind: TypeKind,
    pub text: String,
}

/// @ai:intent The type shapes the resolver distinguishes
#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    /// Predefined keyword such as `number`, `any` or `void`
    Keyword(String),
    Union,
    Tuple,
    /// Named reference with optional type arguments, e.g. `Array<number>`
    Reference {
        name: String,
        arguments: Vec<TypeNode>,
    },
    /// `T[]`
    Array(Box<TypeNode>),
    Other,
}

impl TypeNode {
    pub fn new(kind: TypeKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// @ai:intent Build a keyword type whose text is the keyword itself
    pub fn keyword(keyword: &str) -> Self {
        Self::new(TypeKind::Keyword(keyword.to_string()), keyword)
    }

    /// @ai:intent Build a named reference, rendering `Name<A, B>` as its text
    pub fn reference(name: &str, arguments: Vec<TypeNode>) -> Self {
        let text = if arguments.is_empty() {
            name.to_string()
        } else {
            let args: Vec<&str> = arguments.iter().map(|a| a.text.as_str()).collect();
            format!("{}<{}>", name, args.join(", "))
        };
        Self::new(
            TypeKind::Reference {
                name: name.to_string(),
                arguments,
            },
            text,
        )
    }

    /// @ai:intent Build an array-syntax type around an element
    pub fn array(element: TypeNode) -> Self {
        let text = format!("{}[]", element.text);
        Self::new(TypeKind::Array(Box::new(element)), text)
    }

    /// @ai:intent Name of a reference type, if this is one
    /// @ai:effects pure
    pub fn reference_name(&self) -> Option<&str> {
        match &self.kind {
            TypeKind::Reference { name, .. } => Some(name),
            _ => None,
        }
    }

    /// @ai:intent Type arguments of a reference type; empty for every other shape
    /// @ai:effects pure
    pub fn type_arguments(&self) -> &[TypeNode] {
        match &self.kind {
            TypeKind::Reference { arguments, .. } => arguments,
            _ => &[],
        }
    }
}

impl ParamDecl {
    pub fn new(name: impl Into<String>, type_node: Option<TypeNode>) -> Self {
        Self {
            name: name.into(),
            type_node,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_text() {
        let node = TypeNode::reference("Array", vec![TypeNode::keyword("number")]);
        assert_eq!(node.text, "Array<number>");
        assert_eq!(node.reference_name(), Some("Array"));
    }

    #[test]
    fn test_array_text() {
        let node = TypeNode::array(TypeNode::array(TypeNode::keyword("string")));
        assert_eq!(node.text, "string[][]");
        assert_eq!(node.reference_name(), None);
    }
}
