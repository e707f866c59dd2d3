//! Format command - validate, clean, and export a contact list.

use std::path::PathBuf;

use colored::Colorize;
use smsprep::{ExportSettings, Session, TransformOutput, ValidationOutcome};

use super::{ValidationFailed, ensure_exists, print_report, session_config};

pub fn run(
    file: PathBuf,
    output_dir: Option<PathBuf>,
    prefix: Option<String>,
    delimiter: Option<String>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    ensure_exists(&file)?;

    let mut settings = ExportSettings::load();
    if let Some(dir) = output_dir {
        settings = settings.with_output_dir(dir);
    }
    if let Some(prefix) = prefix {
        settings = settings.with_prefix(prefix);
    }

    let config = session_config(delimiter)?;
    let format = config.format.clone();
    let mut session = Session::with_config(&file, config)?;

    println!(
        "{} {}",
        "Formatting".cyan().bold(),
        file.display().to_string().white()
    );
    println!();

    if let ValidationOutcome::Failed(report) = session.validate()? {
        print_report(report, &format);
        return Err(ValidationFailed(report.stage).into());
    }

    let output = session.transform(&settings)?;
    print_output(&output, verbose);

    Ok(())
}

fn print_output(output: &TransformOutput, verbose: bool) {
    println!(
        "Formatted {} phone numbers ({} changed)",
        output.phones_formatted.to_string().white().bold(),
        output.phones_changed
    );

    let stats = &output.replacements;
    if stats.is_empty() {
        println!("No special characters found");
    } else {
        println!(
            "Replaced {} special characters in {} column(s)",
            stats.total_replacements().to_string().white().bold(),
            stats.affected_columns()
        );
        for (column, count) in &stats.by_column {
            println!("  {:20} {}", column, count);
        }
        println!();

        println!("{}", "Character replacements:".yellow().bold());
        for (source, rep) in stats.sorted_by_count() {
            println!("  {} -> {:4} {}x", source, rep.replacement, rep.count);
        }
    }
    println!();

    println!("{}", "Columns:".yellow().bold());
    for column in &output.columns {
        let records = if column.records == 0 {
            "NO RECORDS".red().to_string()
        } else {
            format!("{} records", column.records)
        };
        println!("  {:20} {}", column.name, records);
    }
    if verbose {
        println!("  {} rows written", output.row_count);
    }
    println!();

    println!(
        "{} {}",
        "Saved to".green().bold(),
        output.path.display().to_string().white()
    );
}
