//! @ai:module:intent Format extraction results as JSON documents or human-readable text
//! @ai:module:layer infrastructure
//! @ai:module:public_api OutputFormat, format_report, to_json_document
//! @ai:module:depends_on context, metadata
//! @ai:module:stateless true

use crate::context::ExtractionReport;
use crate::error::Result;
use crate::metadata::{Dimensionality, FunctionRecord, MetadataDocument, ParameterRecord};
use colored::Colorize;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

/// @ai:intent Output format options
#[derive(Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    JsonPretty,
}

/// @ai:intent Serialize the document with the given number of spaces per level
/// @ai:effects pure
pub fn to_json_document(document: &MetadataDocument, indent: usize) -> Result<String> {
    let indent = " ".repeat(indent);
    let mut buf = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent.as_bytes()));
    document.serialize(&mut serializer)?;
    Ok(String::from_utf8(buf)?)
}

/// @ai:intent Format an extraction report as a string
/// @ai:effects pure
pub fn format_report(report: &ExtractionReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => serde_json::to_string(report).unwrap_or_default(),
        OutputFormat::JsonPretty => serde_json::to_string_pretty(report).unwrap_or_default(),
        OutputFormat::Text => format_report_text(report),
    }
}

fn format_report_text(report: &ExtractionReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("Functions ({}):\n", report.functions.len()));
    for func in &report.functions {
        output.push_str(&format_function_text(func));
    }

    if !report.skipped.is_empty() {
        output.push_str(&format!(
            "\n{} {}\n",
            "skipped:".dimmed(),
            report.skipped.join(", ")
        ));
    }

    for error in &report.errors {
        output.push_str(&format!("{} {}\n", "ERROR".red().bold(), error));
    }

    output.push('\n');
    if report.is_success() {
        output.push_str(&format!("{} No issues found\n", "OK".green().bold()));
    } else {
        output.push_str(&format!(
            "{} errors, no metadata generated\n",
            report.errors.len().to_string().red().bold()
        ));
    }

    output
}

fn format_function_text(func: &FunctionRecord) -> String {
    let mut output = format!("  {} ({})\n", func.name.cyan(), func.id);

    if !func.description.is_empty() {
        output.push_str(&format!("    description: {}\n", func.description));
    }
    if !func.help_url.is_empty() {
        output.push_str(&format!("    helpUrl: {}\n", func.help_url));
    }

    let params: Vec<String> = func.parameters.iter().map(format_parameter).collect();
    output.push_str(&format!("    parameters: ({})\n", params.join(", ")));
    output.push_str(&format!(
        "    result: {}{}\n",
        func.result.value_type,
        matrix_suffix(func.result.dimensionality)
    ));

    if let Some(options) = &func.options {
        let mut flags = Vec::new();
        if options.volatile {
            flags.push("volatile");
        }
        if options.stream {
            flags.push("stream");
        }
        if options.cancelable {
            flags.push("cancelable");
        }
        output.push_str(&format!("    options: {}\n", flags.join(", ").yellow()));
    }

    output
}

fn format_parameter(param: &ParameterRecord) -> String {
    format!(
        "{}{}: {}{}",
        param.name,
        if param.optional { "?" } else { "" },
        param.value_type,
        matrix_suffix(param.dimensionality)
    )
}

fn matrix_suffix(dimensionality: Dimensionality) -> &'static str {
    match dimensionality {
        Dimensionality::Matrix => "[][]",
        Dimensionality::Scalar => "",
    }
}
