//! Command-line argument definitions for the isogrid CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, report layout, and logging verbosity.

use clap::{Parser, ValueEnum};
use log::LevelFilter;

use isogrid::report::ReportFormat;

/// Command-line arguments for the isogrid scene tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input scene file
    #[arg(help = "Path to the input scene (TOML)")]
    pub input: String,

    /// Path to the output report; `-` writes to stdout
    #[arg(short, long, default_value = "-")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Report layout
    #[arg(short, long, value_enum, default_value_t = Format::Table)]
    pub format: Format,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: LevelFilter,
}

/// Report layouts selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Entities in paint order
    Table,
    /// Cell map with root depths
    Grid,
}

impl From<Format> for ReportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Table => ReportFormat::Table,
            Format::Grid => ReportFormat::Grid,
        }
    }
}
