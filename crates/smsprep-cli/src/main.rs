//! smsprep CLI - contact list validation and cleanup for bulk SMS.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use commands::ValidationFailed;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Validate {
            file,
            json,
            delimiter,
        } => commands::validate::run(file, json, delimiter, cli.verbose),

        Commands::Preview {
            file,
            rows,
            delimiter,
        } => commands::preview::run(file, rows, delimiter, cli.verbose),

        Commands::Format {
            file,
            output_dir,
            prefix,
            delimiter,
        } => commands::format::run(file, output_dir, prefix, delimiter, cli.verbose),

        Commands::Config { output_dir, prefix } => commands::config::run(output_dir, prefix),
    };

    if let Err(e) = result {
        if e.downcast_ref::<ValidationFailed>().is_some() {
            std::process::exit(2);
        }
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
