//! @ai:module:intent Decide whether a declaration is exposed and which behavioral flags it carries
//! @ai:module:layer domain
//! @ai:module:public_api Classification, classify, streaming_handler, STREAMING_HANDLER_TYPES
//! @ai:module:depends_on syntax, annotation, metadata
//! @ai:module:stateless true

use crate::annotation::DocTags;
use crate::metadata::OptionsRecord;
use crate::syntax::{FunctionDecl, ParamDecl, TypeNode};

/// Current and legacy names of the host streaming-handler type
pub const STREAMING_HANDLER_TYPES: [&str; 2] = [
    "CustomFunctions.StreamingHandler",
    "IStreamingCustomFunctionHandler",
];

/// @ai:intent How one declaration should be treated by the builder
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification<'a> {
    pub exposed: bool,
    pub volatile: bool,
    pub streaming: bool,
    pub cancelable: bool,
    /// Type of the trailing streaming-handler parameter, when the signature streams
    pub streaming_handler: Option<&'a TypeNode>,
}

/// @ai:intent Classify a declaration from its signature and its folded tags
/// @ai:post streaming is true when either the signature or a @streaming tag says so
/// @ai:effects pure
pub fn classify<'a>(func: &'a FunctionDecl, tags: &DocTags) -> Classification<'a> {
    let handler = streaming_handler(func.parameters.last());

    Classification {
        exposed: tags.custom_function,
        volatile: tags.volatile,
        streaming: handler.is_some() || tags.streaming,
        cancelable: tags.cancelable,
        streaming_handler: handler,
    }
}

/// @ai:intent Return the parameter's type if it names the streaming-handler type
/// @ai:example (handler: CustomFunctions.StreamingHandler<number>) -> Some
/// @ai:example (value: number) -> None
/// @ai:effects pure
pub fn streaming_handler(param: Option<&ParamDecl>) -> Option<&TypeNode> {
    let type_node = param?.type_node.as_ref()?;
    let name = type_node.reference_name()?;
    STREAMING_HANDLER_TYPES
        .iter()
        .any(|candidate| *candidate == name)
        .then_some(type_node)
}

impl<'a> Classification<'a> {
    /// @ai:intent Parameters that carry values, i.e. without the streaming channel
    pub fn value_parameters<'f>(&self, func: &'f FunctionDecl) -> &'f [ParamDecl] {
        let params = func.parameters.as_slice();
        match (self.streaming_handler, params.split_last()) {
            (Some(_), Some((_, rest))) => rest,
            _ => params,
        }
    }

    /// @ai:intent Options to attach, dropped unless volatile or streaming
    pub fn options(&self) -> Option<OptionsRecord> {
        OptionsRecord {
            volatile: self.volatile,
            cancelable: self.cancelable,
            stream: self.streaming,
        }
        .retain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::read_tags;

    fn handler_param(name: &str, arguments: Vec<TypeNode>) -> ParamDecl {
        ParamDecl::new("handler", Some(TypeNode::reference(name, arguments)))
    }

    fn decl(doc: &str, parameters: Vec<ParamDecl>) -> FunctionDecl {
        FunctionDecl {
            name: "f".to_string(),
            docs: vec![doc.to_string()],
            parameters,
            ..Default::default()
        }
    }

    #[test]
    fn test_unexposed_without_tag() {
        let func = decl("/** Just docs */", vec![]);
        let class = classify(&func, &read_tags(&func.docs));

        assert!(!class.exposed);
        assert_eq!(class.options(), None);
    }

    #[test]
    fn test_signature_streaming() {
        let func = decl(
            "/** @customfunction */",
            vec![
                ParamDecl::new("first", Some(TypeNode::keyword("number"))),
                handler_param(
                    "CustomFunctions.StreamingHandler",
                    vec![TypeNode::keyword("number")],
                ),
            ],
        );
        let class = classify(&func, &read_tags(&func.docs));

        assert!(class.exposed);
        assert!(class.streaming);
        assert!(class.streaming_handler.is_some());
        assert_eq!(class.value_parameters(&func).len(), 1);
        assert_eq!(class.value_parameters(&func)[0].name, "first");
    }

    #[test]
    fn test_legacy_handler_name() {
        let param = handler_param("IStreamingCustomFunctionHandler", vec![]);
        assert!(streaming_handler(Some(&param)).is_some());

        let other = handler_param("Promise", vec![TypeNode::keyword("number")]);
        assert!(streaming_handler(Some(&other)).is_none());
        assert!(streaming_handler(None).is_none());
    }

    #[test]
    fn test_tag_streaming_keeps_all_parameters() {
        let func = decl(
            "/** @customfunction\n * @streaming */",
            vec![ParamDecl::new("x", Some(TypeNode::keyword("number")))],
        );
        let class = classify(&func, &read_tags(&func.docs));

        assert!(class.streaming);
        assert!(class.streaming_handler.is_none());
        assert_eq!(class.value_parameters(&func).len(), 1);
    }

    #[test]
    fn test_volatile_and_cancelable_options() {
        let func = decl(
            "/** @customfunction\n * @volatile\n * @streaming CANCELABLE */",
            vec![],
        );
        let class = classify(&func, &read_tags(&func.docs));

        assert_eq!(
            class.options(),
            Some(OptionsRecord {
                volatile: true,
                cancelable: true,
                stream: true,
            })
        );
    }
}
