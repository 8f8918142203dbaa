//! Command-line argument definitions for the railroad CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, the output format,
//! configuration file selection, and logging verbosity.

use clap::{Parser, ValueEnum};

/// What to write to the output file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// An `<svg>` element without a stylesheet, for embedding in HTML.
    #[default]
    Svg,
    /// A self-contained SVG document carrying the default stylesheet.
    Standalone,
    /// Box-drawing text.
    Text,
}

/// Command-line arguments for the railroad diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input JSON diagram description
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Svg)]
    pub format: OutputFormat,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
