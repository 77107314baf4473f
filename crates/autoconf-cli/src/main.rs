//! autoconf CLI
//!
//! Command-line front end for resolving auto-configuration modules from
//! catalog roots and a session file.

mod cli;
mod commands;
mod error;
mod session;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .map_err(|e| CliError::user(format!("Failed to set tracing subscriber: {e}")))?;
        tracing::debug!("Verbose mode enabled");
    }

    match cli.command {
        Some(cmd) => execute_command(cmd),
        None => {
            println!("{} auto-configuration resolver", "autoconf".green().bold());
            println!();
            println!("Run {} for available commands.", "autoconf --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Resolve {
            session,
            roots,
            json,
            report,
        } => commands::run_resolve(&session, &roots, json, report),
        Commands::Candidates {
            roots,
            extension_point,
        } => {
            let roots = if roots.is_empty() {
                vec![std::env::current_dir()?]
            } else {
                roots
            };
            commands::run_candidates(&roots, &extension_point)
        }
    }
}
