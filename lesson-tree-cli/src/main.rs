//! lesson-tree CLI
//!
//! Command-line driver for repairing, counting, and compacting a scraped
//! lesson index.

mod commands;
mod error;
mod spinner;

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::{Level, LevelFilter};

pub(crate) use error::CliError;

#[derive(Parser)]
#[command(name = "lesson-tree")]
#[command(about = "Repair, count, and compact a scraped lesson index", long_about = None)]
struct Cli {
    /// Show debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only show warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline on a site snapshot
    Run {
        /// Site JSON produced by the scraper
        input: PathBuf,

        /// Where to write the resolved site (default: resolved.json next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write a snapshot after every stage into this directory
        #[arg(long)]
        snapshots: Option<PathBuf>,

        /// Convert sections that only wrap lessons into lessons first
        #[arg(long)]
        convert_lessons: bool,

        /// Never touch the network; nothing can be confirmed
        #[arg(long)]
        offline: bool,
    },

    /// List broken and empty references and their guesses without changing anything
    Check {
        input: PathBuf,

        #[arg(long)]
        offline: bool,
    },

    /// Report dangling references and empty nodes (no network)
    Audit { input: PathBuf },

    /// Inspect settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show effective settings and the settings file location
    Show,

    /// Print the settings file path
    Path,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Run {
            input,
            output,
            snapshots,
            convert_lessons,
            offline,
        } => commands::run::run_pipeline(
            input,
            output,
            snapshots,
            convert_lessons,
            offline,
            cli.quiet,
        ),
        Commands::Check { input, offline } => commands::check::run_check(input, offline),
        Commands::Audit { input } => commands::audit::run_audit(input),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(),
            ConfigAction::Path => {
                commands::config::run_config_path();
                Ok(())
            }
        },
    };

    if let Err(e) = result {
        log::error!("{e}");
        std::process::exit(1);
    }
}

/// Plain messages at info level, prefixed with the level otherwise.
/// `RUST_LOG` overrides the flags.
fn init_logging(verbose: bool, quiet: bool) {
    let level = if quiet {
        LevelFilter::Warn
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stdout)
        .format(|buf, record| match record.level() {
            Level::Info => writeln!(buf, "{}", record.args()),
            level => writeln!(buf, "{}: {}", level.as_str().to_lowercase(), record.args()),
        })
        .init();
}

pub(crate) fn log_blank() {
    log::info!("");
}

#[cfg(test)]
#[path = "tests/cli_tests.rs"]
mod tests;
