//! Config command - show or update the saved export settings.

use std::path::PathBuf;

use colored::Colorize;
use smsprep::ExportSettings;
use smsprep::transform::sanitize_prefix;

pub fn run(
    output_dir: Option<PathBuf>,
    prefix: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let path = ExportSettings::default_path()?;
    let mut settings = ExportSettings::load_from(&path);

    let changed = output_dir.is_some() || prefix.is_some();
    if let Some(dir) = output_dir {
        if !dir.is_dir() {
            return Err(format!("Not a directory: {}", dir.display()).into());
        }
        settings = settings.with_output_dir(dir);
    }
    if let Some(prefix) = prefix {
        settings = settings.with_prefix(prefix);
    }

    if changed {
        settings.save_to(&path)?;
        println!("{} {}", "Saved".green().bold(), path.display());
        println!();
    }

    println!("{}", "Export settings:".yellow().bold());
    println!("  Output directory: {}", settings.output_dir.display());
    println!("  File name prefix: {}", settings.filename_prefix);
    println!(
        "  Next file:        {}.csv",
        sanitize_prefix(&settings.filename_prefix)
    );

    Ok(())
}
