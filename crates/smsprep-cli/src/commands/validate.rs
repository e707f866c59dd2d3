//! Validate command - check a contact list and report problems.

use std::path::PathBuf;

use colored::Colorize;
use smsprep::{Session, ValidationOutcome, ValidationPass};

use super::{ValidationFailed, ensure_exists, print_report, session_config};

pub fn run(
    file: PathBuf,
    json_output: bool,
    delimiter: Option<String>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    ensure_exists(&file)?;

    let config = session_config(delimiter)?;
    let format = config.format.clone();
    let mut session = Session::with_config(&file, config)?;

    if !json_output {
        println!(
            "{} {}",
            "Validating".cyan().bold(),
            file.display().to_string().white()
        );
        println!();
    }

    let outcome = session.validate()?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(outcome)?);
    } else {
        match outcome {
            ValidationOutcome::Passed(pass) => print_pass(pass, verbose),
            ValidationOutcome::Failed(report) => print_report(report, &format),
        }
    }

    match outcome {
        ValidationOutcome::Passed(_) => Ok(()),
        ValidationOutcome::Failed(report) => Err(ValidationFailed(report.stage).into()),
    }
}

fn print_pass(pass: &ValidationPass, verbose: bool) {
    let stats = &pass.statistics;

    println!("{}", "All checks passed".green().bold());
    println!(
        "  {} rows, {} columns",
        stats.row_count.to_string().white().bold(),
        stats.column_count
    );
    println!();

    println!("{}", "Columns:".yellow().bold());
    for (role, col) in [("Name", &pass.roles.name), ("Date", &pass.roles.date)] {
        match col {
            Some(col) => println!(
                "  {:6} {} ({})",
                role,
                col.header.white(),
                if col.required { "required" } else { "optional" }
            ),
            None => println!("  {:6} {}", role, "not found".dimmed()),
        }
    }
    if !stats.empty_columns.is_empty() {
        println!("  Empty: {}", stats.empty_columns.join(", ").dimmed());
    }
    if verbose {
        for col in &stats.columns {
            println!(
                "    {:20} {:8} {:>6} values ({:.0}% empty)",
                col.name,
                col.kind.label(),
                col.non_empty_count,
                col.null_percentage()
            );
        }
    }
    println!();

    if !stats.non_ascii.is_empty() {
        println!("{}", "Special characters to replace:".yellow().bold());
        for (column, chars) in &stats.non_ascii {
            let shown: String = chars.iter().collect();
            println!("  {:20} {}", column, shown);
        }
        println!();
    }

    println!("{}", "Phone numbers:".yellow().bold());
    for preview in &stats.phone_preview {
        if preview.changed() {
            println!("  {} -> {}", preview.raw, preview.canonical.green());
        } else {
            println!("  {}", preview.canonical);
        }
    }
    println!(
        "  {} of {} will be reformatted",
        pass.phones_to_change.to_string().white().bold(),
        stats.row_count
    );
}
