//! Preview command - show rows before and after cleaning.

use std::path::PathBuf;

use colored::Colorize;
use smsprep::{Session, ValidationOutcome};

use super::{ValidationFailed, ensure_exists, print_report, session_config};

/// Characters shown per cell.
const CELL_WIDTH: usize = 20;

pub fn run(
    file: PathBuf,
    rows: usize,
    delimiter: Option<String>,
    _verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    ensure_exists(&file)?;

    let config = session_config(delimiter)?;
    let format = config.format.clone();
    let mut session = Session::with_config(&file, config)?;

    if let ValidationOutcome::Failed(report) = session.validate()? {
        print_report(report, &format);
        return Err(ValidationFailed(report.stage).into());
    }

    let preview = session.preview(rows)?;

    println!(
        "{} {}",
        "Preview of".cyan().bold(),
        file.display().to_string().white()
    );
    println!();

    let header: Vec<String> = preview.headers.iter().map(|h| cell(h)).collect();
    println!("       {}", header.join(" ").bold());

    for row in &preview.rows {
        let before: Vec<String> = row.before.iter().map(|v| cell(v)).collect();
        let after: Vec<String> = row
            .before
            .iter()
            .zip(&row.after)
            .map(|(b, a)| {
                let shown = cell(a);
                if a != b { shown.green().to_string() } else { shown }
            })
            .collect();

        println!("{:>5}  {}", row.display_row, before.join(" ").dimmed());
        println!("       {}", after.join(" "));
    }

    if preview.remaining() > 0 {
        println!();
        println!("... and {} more rows", preview.remaining());
    }

    Ok(())
}

/// Fit a value into a fixed-width column.
fn cell(value: &str) -> String {
    let count = value.chars().count();
    if count > CELL_WIDTH {
        let cut: String = value.chars().take(CELL_WIDTH - 3).collect();
        format!("{}...", cut)
    } else {
        format!("{}{}", value, " ".repeat(CELL_WIDTH - count))
    }
}
