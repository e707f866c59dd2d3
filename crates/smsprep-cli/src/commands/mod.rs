//! CLI command implementations.

pub mod config;
pub mod format;
pub mod preview;
pub mod validate;

use std::fmt;
use std::path::Path;

use colored::Colorize;
use smsprep::input::ParserConfig;
use smsprep::{CheckStage, RegionalFormat, SessionConfig, ValidationReport};

/// Findings listed before the rest are summarized.
const MAX_LISTED: usize = 50;

/// Returned by a command whose file failed validation; the report has
/// already been printed.
#[derive(Debug)]
pub struct ValidationFailed(pub CheckStage);

impl fmt::Display for ValidationFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed at {}", self.0)
    }
}

impl std::error::Error for ValidationFailed {}

/// Session configuration from the common command flags.
pub fn session_config(
    delimiter: Option<String>,
) -> Result<SessionConfig, Box<dyn std::error::Error>> {
    let mut parser = ParserConfig::default();
    if let Some(d) = delimiter {
        parser = parser.with_delimiter_str(&d)?;
    }
    Ok(SessionConfig {
        parser,
        ..SessionConfig::default()
    })
}

pub fn ensure_exists(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }
    Ok(())
}

/// Print a failed validation in human-readable form.
pub fn print_report(report: &ValidationReport, format: &RegionalFormat) {
    println!(
        "{} {}",
        format!("{} check failed:", report.stage.label()).red().bold(),
        report.summary()
    );
    println!();

    match report.stage {
        CheckStage::Duplicates => {
            for (canonical, rows) in report.duplicate_groups().iter().take(MAX_LISTED) {
                let numbers: Vec<String> = rows.iter().map(|f| f.display_row.to_string()).collect();
                println!(
                    "  {} appears in rows {}",
                    canonical.white().bold(),
                    numbers.join(", ")
                );
            }
        }
        _ => {
            for finding in report.findings.iter().take(MAX_LISTED) {
                println!("  {}", finding);
            }
        }
    }

    let listed = match report.stage {
        CheckStage::Duplicates => report.duplicate_groups().len(),
        _ => report.findings.len(),
    };
    if listed > MAX_LISTED {
        println!("  ... and {} more", listed - MAX_LISTED);
    }
    println!();

    match report.stage {
        CheckStage::EmptyPhone => {
            println!("Every row needs a phone number in the first column.")
        }
        CheckStage::Letters => println!("Phone numbers may only contain digits and separators."),
        CheckStage::Format => println!("Expected {}.", format.describe()),
        CheckStage::RequiredFields => {
            let required: Vec<String> = report
                .roles
                .required()
                .map(|(role, col)| format!("{} ({})", col.header, role.label()))
                .collect();
            println!("Required columns: {}", required.join(", "));
        }
        CheckStage::Duplicates => println!("Each phone number may appear only once."),
    }
    println!(
        "{}",
        "Fix these rows in the source file and run again.".yellow()
    );
}
