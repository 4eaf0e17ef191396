//! @ai:module:intent Resolve declared and documented types to a value type and dimensionality
//! @ai:module:layer domain
//! @ai:module:public_api ResolvedType, resolve_type, resolve_structural, apply_comment_type
//! @ai:module:depends_on syntax, metadata, context
//! @ai:module:stateless true

use crate::context::ExtractionContext;
use crate::metadata::{Dimensionality, ValueType};
use crate::syntax::{TypeKind, TypeNode};

const ARRAY: &str = "Array";

/// @ai:intent Outcome of resolving one parameter or result type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResolvedType {
    pub value_type: ValueType,
    pub dimensionality: Dimensionality,
}

impl ResolvedType {
    pub fn new(value_type: ValueType, dimensionality: Dimensionality) -> Self {
        Self {
            value_type,
            dimensionality,
        }
    }

    /// `(any, scalar)`
    pub fn fallback() -> Self {
        Self::default()
    }
}

/// @ai:intent Resolve a declared type, falling back to the comment type only when it is `any`
/// @ai:effects ctx:errors
pub fn resolve_type(
    node: Option<&TypeNode>,
    comment_type: Option<&str>,
    ctx: &mut ExtractionContext,
) -> ResolvedType {
    let structural = resolve_structural(node, ctx);
    apply_comment_type(structural, comment_type, ctx)
}

/// @ai:intent Resolve a declared type without consulting comments
/// @ai:post dimensionality is matrix for every reference or array node, even when the element fails
/// @ai:effects ctx:errors
pub fn resolve_structural(node: Option<&TypeNode>, ctx: &mut ExtractionContext) -> ResolvedType {
    match node {
        None => ResolvedType::fallback(),
        Some(node) => ResolvedType::new(structural_type(node, ctx), dimensionality_of(node)),
    }
}

/// @ai:intent Adopt a documented type when structural resolution produced `any`
/// @ai:post never changes dimensionality; never overrides a resolved structural type
/// @ai:effects ctx:errors
pub fn apply_comment_type(
    resolved: ResolvedType,
    comment_type: Option<&str>,
    ctx: &mut ExtractionContext,
) -> ResolvedType {
    if resolved.value_type != ValueType::Any {
        return resolved;
    }
    let Some(text) = comment_type else {
        return resolved;
    };

    match ValueType::from_name(&text.to_lowercase()) {
        Some(value_type) => ResolvedType {
            value_type,
            ..resolved
        },
        None => {
            ctx.error(format!("Unsupported type in code comment:{}", text));
            resolved
        }
    }
}

fn dimensionality_of(node: &TypeNode) -> Dimensionality {
    match node.kind {
        TypeKind::Reference { .. } | TypeKind::Array(_) => Dimensionality::Matrix,
        _ => Dimensionality::Scalar,
    }
}

fn structural_type(node: &TypeNode, ctx: &mut ExtractionContext) -> ValueType {
    match &node.kind {
        TypeKind::Keyword(keyword) => ValueType::from_name(keyword).unwrap_or(ValueType::Any),
        TypeKind::Union | TypeKind::Tuple | TypeKind::Other => ValueType::Any,
        TypeKind::Reference { name, arguments } => {
            if name != ARRAY {
                ctx.error(format!("Invalid type: {}", name));
                return ValueType::Any;
            }
            let [inner] = arguments.as_slice() else {
                ctx.error(format!("Invalid type array: {}", node.text));
                return ValueType::Any;
            };
            if !matches!(inner.kind, TypeKind::Reference { .. }) {
                return element_type(inner, ctx);
            }
            match array_element(inner) {
                Some(element) => element_type(element, ctx),
                None => {
                    ctx.error(format!("Invalid type array: {}", inner.text));
                    ValueType::Any
                }
            }
        }
        TypeKind::Array(inner) => match &inner.kind {
            TypeKind::Array(element) => element_type(element, ctx),
            _ => {
                ctx.error(format!("Invalid array type node: {}", inner.text));
                ValueType::Any
            }
        },
    }
}

/// `Array<T>` with exactly one argument yields `T`
fn array_element(node: &TypeNode) -> Option<&TypeNode> {
    match &node.kind {
        TypeKind::Reference { name, arguments } if name == ARRAY && arguments.len() == 1 => {
            arguments.first()
        }
        _ => None,
    }
}

/// @ai:intent Map the cell type of a matrix
/// @ai:post a third array level is rejected rather than truncated
fn element_type(element: &TypeNode, ctx: &mut ExtractionContext) -> ValueType {
    match &element.kind {
        TypeKind::Keyword(keyword) => match ValueType::from_name(keyword) {
            Some(value_type) => value_type,
            None => {
                ctx.error(format!("Type doesn't match mappings: {}", element.text));
                ValueType::Any
            }
        },
        TypeKind::Union | TypeKind::Tuple => ValueType::Any,
        TypeKind::Array(_) => {
            ctx.error(format!("Invalid type array: {}", element.text));
            ValueType::Any
        }
        TypeKind::Reference { name, .. } if name == ARRAY => {
            ctx.error(format!("Invalid type array: {}", element.text));
            ValueType::Any
        }
        TypeKind::Reference { .. } | TypeKind::Other => {
            ctx.error(format!("Type doesn't match mappings: {}", element.text));
            ValueType::Any
        }
    }
}
