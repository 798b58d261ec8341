use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::logging::LogFormat;
use crate::types::OutputFormat;

/// Clean rental-listing tables and report the values that were rejected
#[derive(Parser, Debug)]
#[command(name = "listing-scrub")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty, global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Clean a listings file
    Clean {
        /// Input file path (CSV, TSV or Excel)
        #[arg(short, long)]
        input: PathBuf,

        /// Cleaned table output path (stdout if not specified)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Reject report JSON path (summary on stderr if not specified)
        #[arg(short, long)]
        rejects: Option<PathBuf>,

        /// Cleaned table format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,

        /// Field delimiter for CSV input
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Worksheet to read from Excel input
        #[arg(long)]
        sheet: Option<String>,

        /// Record unrecognised pets_allowed values as rejections
        #[arg(long, default_value_t = false)]
        audit_pets: bool,

        /// Skip the SHA-256 fingerprint of the input file
        #[arg(long, default_value_t = false)]
        no_hash: bool,
    },

    /// Validate a single value for one column
    Check {
        /// Column name, e.g. cityname
        #[arg(short, long)]
        field: String,

        /// Raw value to validate
        value: String,
    },
}
