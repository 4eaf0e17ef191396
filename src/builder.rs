//! @ai:module:intent Build parameter, result and function records for an exposed declaration
//! @ai:module:layer application
//! @ai:module:public_api build_function, build_parameters, build_result
//! @ai:module:depends_on annotation, classifier, types, metadata, context
//! @ai:module:stateless true

use crate::annotation::DocTags;
use crate::classifier::Classification;
use crate::context::ExtractionContext;
use crate::metadata::{FunctionRecord, ParameterRecord, ResultRecord};
use crate::syntax::{FunctionDecl, ParamDecl, TypeNode};
use crate::types::{apply_comment_type, resolve_structural, resolve_type, ResolvedType};

const PROMISE: &str = "Promise";
const VOID: &str = "void";

const STREAMING_ARGUMENT_ERROR: &str = "The 'CustomFunctions.StreamingHandler' needs to be passed in a single result type (e.g., 'CustomFunctions.StreamingHandler < number >')";
const STREAMING_RETURN_ERROR: &str = "A streaming function should not have a return type.  Instead, its type should be based purely on what's inside \"CustomFunctions.StreamingHandler<T>\".";

/// @ai:intent Assemble the full record for an exposed declaration
/// @ai:pre class.exposed
/// @ai:effects ctx:errors
pub fn build_function(
    func: &FunctionDecl,
    tags: &DocTags,
    class: &Classification,
    ctx: &mut ExtractionContext,
) -> FunctionRecord {
    let mut record = FunctionRecord::new(&func.name);
    record.help_url = tags.help_url.clone();
    record.description = tags.description.clone();
    record.parameters = build_parameters(class.value_parameters(func), tags, ctx);
    record.result = build_result(func, class, tags, ctx);
    record.options = class.options();
    record
}

/// @ai:intent Build one record per value parameter, in declaration order
/// @ai:effects ctx:errors
pub fn build_parameters(
    params: &[ParamDecl],
    tags: &DocTags,
    ctx: &mut ExtractionContext,
) -> Vec<ParameterRecord> {
    params
        .iter()
        .map(|param| build_parameter(param, tags, ctx))
        .collect()
}

fn build_parameter(
    param: &ParamDecl,
    tags: &DocTags,
    ctx: &mut ExtractionContext,
) -> ParameterRecord {
    let resolved = resolve_type(
        param.type_node.as_ref(),
        tags.param_type(&param.name),
        ctx,
    );

    ParameterRecord {
        name: param.name.clone(),
        description: tags.param_description(&param.name).map(str::to_string),
        value_type: resolved.value_type,
        dimensionality: resolved.dimensionality,
        optional: is_optional(param, tags),
    }
}

/// @ai:intent Language markers win; otherwise the `[name]` convention; otherwise false
/// @ai:effects pure
fn is_optional(param: &ParamDecl, tags: &DocTags) -> bool {
    param.question || param.has_default || param.rest || tags.param_bracketed(&param.name)
}

/// @ai:intent Derive the result from the streaming handler, a Promise, or the declared return type
/// @ai:post streaming shape errors yield `(any, scalar)` without consulting the return tag
/// @ai:effects ctx:errors
pub fn build_result(
    func: &FunctionDecl,
    class: &Classification,
    tags: &DocTags,
    ctx: &mut ExtractionContext,
) -> ResultRecord {
    let structural = if let Some(handler) = class.streaming_handler {
        match streaming_result(func, handler, ctx) {
            Some(resolved) => resolved,
            None => return ResultRecord::default(),
        }
    } else if let Some(return_type) = &func.return_type {
        let target = promise_argument(return_type).unwrap_or(return_type);
        resolve_structural(Some(target), ctx)
    } else {
        tracing::debug!(
            "no return type specified for {} (line {}); continuing as any",
            func.name,
            func.line
        );
        ResolvedType::fallback()
    };

    // result tag types are reported lowercased; parameter tags keep their text
    let return_type = tags.return_type().to_lowercase();
    let resolved = apply_comment_type(structural, Some(&return_type), ctx);
    ResultRecord::new(resolved.value_type, resolved.dimensionality)
}

fn streaming_result(
    func: &FunctionDecl,
    handler: &TypeNode,
    ctx: &mut ExtractionContext,
) -> Option<ResolvedType> {
    let [argument] = handler.type_arguments() else {
        ctx.error(STREAMING_ARGUMENT_ERROR);
        return None;
    };

    if let Some(return_type) = &func.return_type {
        if return_type.text.trim() != VOID {
            ctx.error(STREAMING_RETURN_ERROR);
            return None;
        }
    }

    Some(resolve_structural(Some(argument), ctx))
}

/// `Promise<T>` with exactly one argument yields `T`
fn promise_argument(node: &TypeNode) -> Option<&TypeNode> {
    match (node.reference_name(), node.type_arguments()) {
        (Some(PROMISE), [argument]) => Some(argument),
        _ => None,
    }
}
