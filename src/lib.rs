//! @ai:module:intent Custom functions metadata library for JSDoc-annotated TypeScript and JavaScript
//! @ai:module:layer infrastructure
//! @ai:module:public_api annotation, builder, classifier, context, error, extractor, language, metadata, output, parser, syntax, types
//! @ai:module:stateless true
//!
//! # Custom Functions Metadata
//!
//! Reads a source file, finds top-level functions tagged `@customfunction` in
//! their JSDoc, and derives the JSON metadata that describes how each one is
//! called: parameters, result type, dimensionality and the volatile,
//! streaming and cancelable options.
//!
//! ## Example
//!
//! ```rust,no_run
//! use custom_functions_metadata::{extractor, output};
//! use std::path::Path;
//!
//! // Write functions.json, or collect errors without writing anything
//! let report = extractor::generate(Path::new("src/functions.ts"), Path::new("functions.json")).unwrap();
//! if !report.is_success() {
//!     println!("{}", output::format_report(&report, output::OutputFormat::Text));
//! }
//! ```

pub mod annotation;
pub mod builder;
pub mod classifier;
pub mod context;
pub mod error;
pub mod extractor;
pub mod language;
pub mod metadata;
pub mod output;
pub mod parser;
pub mod syntax;
pub mod types;

pub use annotation::{read_tags, DocTag, DocTags, ParamTag};
pub use classifier::{classify, Classification};
pub use context::{ExtractionContext, ExtractionReport};
pub use error::{Error, Result};
pub use extractor::{
    extract_file, extract_functions, extract_source, generate, generate_with_config,
    GenerateConfig,
};
pub use language::{detect_language, Language};
pub use metadata::{
    Dimensionality, FunctionRecord, MetadataDocument, OptionsRecord, ParameterRecord,
    ResultRecord, ValueType,
};
pub use output::{format_report, to_json_document, OutputFormat};
pub use parser::{parse_file, parse_source, ParsedSource, TreeSitterFrontend};
pub use syntax::{FunctionDecl, ParamDecl, SyntaxFrontend, TypeKind, TypeNode};
pub use types::{resolve_type, ResolvedType};
