//! @ai:module:intent CLI entry point for the custom functions metadata generator
//! @ai:module:layer presentation
//! @ai:module:public_api main
//! @ai:module:depends_on extractor, output

use clap::{Parser, Subcommand, ValueEnum};
use custom_functions_metadata::{extractor, output, GenerateConfig, OutputFormat};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "custom-functions-metadata")]
#[command(author, version, about = "Generate custom functions metadata from JSDoc annotations")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the metadata JSON file for a source file
    Generate {
        /// TypeScript or JavaScript file containing the custom functions
        input: PathBuf,

        /// Path of the JSON file to create (e.g. functions.json)
        output: PathBuf,

        /// Spaces per indentation level in the written JSON
        #[arg(long, default_value = "4")]
        indent: usize,
    },

    /// Extract metadata and print it without writing a file
    Extract {
        /// TypeScript or JavaScript file containing the custom functions
        input: PathBuf,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: Format,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
    JsonPretty,
}

impl From<Format> for OutputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
            Format::JsonPretty => OutputFormat::JsonPretty,
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("custom_functions_metadata=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            input,
            output,
            indent,
        } => {
            let config = GenerateConfig { indent };
            match extractor::generate_with_config(&input, &output, &config) {
                Ok(report) if report.is_success() => ExitCode::SUCCESS,
                Ok(_) => ExitCode::from(1),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    ExitCode::from(2)
                }
            }
        }

        Commands::Extract { input, format } => match extractor::extract_file(&input) {
            Ok(report) => {
                println!("{}", output::format_report(&report, format.into()));
                if report.is_success() {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::from(1)
                }
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::from(2)
            }
        },
    }
}
