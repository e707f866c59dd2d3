//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// smsprep: validate and clean contact lists for bulk SMS
#[derive(Parser)]
#[command(name = "smsprep")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check a contact list and report the first kind of problem found
    Validate {
        /// Path to the contact list (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output the outcome as JSON
        #[arg(long)]
        json: bool,

        /// Field delimiter (default: auto-detect; accepts "tab")
        #[arg(short, long)]
        delimiter: Option<String>,
    },

    /// Show how the first rows will look after cleaning
    Preview {
        /// Path to the contact list (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Number of rows to show
        #[arg(short = 'n', long, default_value = "20")]
        rows: usize,

        /// Field delimiter (default: auto-detect; accepts "tab")
        #[arg(short, long)]
        delimiter: Option<String>,
    },

    /// Validate, clean, and write an SMS-ready copy
    Format {
        /// Path to the contact list (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Directory for the cleaned file (default: saved setting)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// File name prefix for the cleaned file (default: saved setting)
        #[arg(short, long)]
        prefix: Option<String>,

        /// Field delimiter (default: auto-detect; accepts "tab")
        #[arg(short, long)]
        delimiter: Option<String>,
    },

    /// Show or update the saved export settings
    Config {
        /// Set the default output directory
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Set the default file name prefix
        #[arg(short, long)]
        prefix: Option<String>,
    },
}
