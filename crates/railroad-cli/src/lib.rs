//! CLI logic for the railroad diagram tool.
//!
//! Reads a JSON diagram description, builds it with the configured layout
//! constants and writes SVG or text.

pub mod source;

mod args;
mod config;
mod error;

pub use args::{Args, OutputFormat};
pub use error::{CliError, ConfigError};

use std::fs;

use log::{debug, info};

use railroad::DiagramBuilder;

use source::DiagramSource;

/// Run the railroad CLI application
///
/// Reads the description named by `args.input`, renders it in the requested
/// format and writes the result to `args.output`.
///
/// # Errors
///
/// Returns `CliError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed diagram descriptions
/// - Node construction errors (bad arity, default out of range)
pub fn run(args: &Args) -> Result<(), CliError> {
    info!(
        input_path = args.input,
        output_path = args.output,
        format:? = args.format;
        "Processing diagram"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let content = fs::read_to_string(&args.input)?;
    let source: DiagramSource = serde_json::from_str(&content)?;
    debug!(kind:% = source.kind(); "Parsed diagram description");

    let builder = DiagramBuilder::new(app_config);
    let mut diagram = source.build(&builder)?;

    let output = match args.format {
        OutputFormat::Svg => diagram.to_svg(),
        OutputFormat::Standalone => diagram.to_standalone(None),
        OutputFormat::Text => diagram.to_text()?,
    };

    fs::write(&args.output, output)?;

    info!(output_file = args.output; "Diagram exported successfully");

    Ok(())
}
