//! @ai:module:intent Walk the declarations of a source file and generate the metadata document
//! @ai:module:layer application
//! @ai:module:public_api extract_functions, extract_source, extract_file, generate, generate_with_config, GenerateConfig
//! @ai:module:depends_on parser, annotation, classifier, builder, context, output, error
//! @ai:module:stateless true

use crate::annotation::read_tags;
use crate::builder::build_function;
use crate::classifier::classify;
use crate::context::{ExtractionContext, ExtractionReport};
use crate::error::{Error, Result};
use crate::language::Language;
use crate::output::to_json_document;
use crate::parser::{parse_file, parse_source};
use crate::syntax::FunctionDecl;
use std::path::Path;

const DEFAULT_INDENT: usize = 4;

/// @ai:intent Configuration for writing the metadata document
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// Spaces per indentation level in the written JSON
    pub indent: usize,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT,
        }
    }
}

/// @ai:intent Classify and build every declaration in order, accumulating into a fresh context
/// @ai:post never stops early; every error across the file is collected
/// @ai:effects pure
pub fn extract_functions(functions: &[FunctionDecl]) -> ExtractionReport {
    let mut ctx = ExtractionContext::new();

    for func in functions {
        let tags = read_tags(&func.docs);
        let class = classify(func, &tags);

        if class.exposed {
            let record = build_function(func, &tags, &class, &mut ctx);
            ctx.emit(record);
        } else {
            ctx.skip(&func.name);
        }
    }

    ctx.finish()
}

/// @ai:intent Extract metadata from source text without writing anything
/// @ai:effects pure
pub fn extract_source(content: &str, language: Language) -> Result<ExtractionReport> {
    let parsed = parse_source(content, language)?;
    Ok(extract_functions(&parsed.functions))
}

/// @ai:intent Extract metadata from a source file without writing anything
/// @ai:pre path exists and is readable
/// @ai:effects fs:read
pub fn extract_file(path: &Path) -> Result<ExtractionReport> {
    let parsed = parse_file(path)?;
    Ok(extract_functions(&parsed.functions))
}

/// @ai:intent Generate the metadata document for `input` and write it to `output`
/// @ai:post output is written only when the report has no errors
/// @ai:effects fs:read, fs:write
pub fn generate(input: &Path, output: &Path) -> Result<ExtractionReport> {
    generate_with_config(input, output, &GenerateConfig::default())
}

/// @ai:intent Generate the metadata document with explicit output settings
/// @ai:post an unreadable input propagates as Error::FileRead and nothing is written
/// @ai:effects fs:read, fs:write
pub fn generate_with_config(
    input: &Path,
    output: &Path,
    config: &GenerateConfig,
) -> Result<ExtractionReport> {
    let report = extract_file(input)?;

    let Some(document) = report.document() else {
        tracing::error!(
            "There was one or more errors. We couldn't parse your file: {}",
            input.display()
        );
        for error in &report.errors {
            tracing::error!("{}", error);
        }
        return Ok(report);
    };

    let json = to_json_document(&document, config.indent)?;
    std::fs::write(output, json).map_err(|e| Error::FileWrite {
        path: output.to_path_buf(),
        source: e,
    })?;

    tracing::info!(
        "{} created for file: {}",
        output.display(),
        input.display()
    );
    if !report.skipped.is_empty() {
        tracing::info!("The following functions were skipped.");
        for name in &report.skipped {
            tracing::info!("{}", name);
        }
    }

    Ok(report)
}
