//! CLI argument parsing using clap derive

use std::path::PathBuf;

use autoconf_meta::AUTO_CONFIGURATION_KEY;
use clap::{Parser, Subcommand};

/// autoconf - Resolve which auto-configuration modules a bootstrap activates
#[derive(Parser, Debug)]
#[command(name = "autoconf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Resolve every site of a session into ordered modules
    ///
    /// Loads the catalog from each root, processes every [[sites]] entry of
    /// the session file through one deferred group and prints the result.
    ///
    /// Examples:
    ///   autoconf resolve --session app.toml
    ///   autoconf resolve -s app.toml -r libs/web -r libs/data --json
    Resolve {
        /// Session file describing the runtime and the sites
        #[arg(short, long, env = "AUTOCONF_SESSION")]
        session: PathBuf,

        /// Catalog roots (defaults to the session file's directory)
        #[arg(short = 'r', long = "root")]
        roots: Vec<PathBuf>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,

        /// Also print every recorded import event
        #[arg(long)]
        report: bool,
    },

    /// List the candidates registered for an extension point
    Candidates {
        /// Catalog roots (defaults to the current directory)
        #[arg(short = 'r', long = "root")]
        roots: Vec<PathBuf>,

        /// Extension point key
        #[arg(short, long, default_value = AUTO_CONFIGURATION_KEY)]
        extension_point: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_no_args() {
        let cli = Cli::parse_from(["autoconf"]);
        assert!(!cli.verbose);
        assert!(cli.command.is_none());
    }

    #[test]
    fn parse_resolve_with_roots() {
        let cli = Cli::parse_from([
            "autoconf", "-v", "resolve", "--session", "app.toml", "-r", "a", "--root", "b",
            "--json",
        ]);
        assert!(cli.verbose);
        assert_eq!(
            cli.command,
            Some(Commands::Resolve {
                session: PathBuf::from("app.toml"),
                roots: vec![PathBuf::from("a"), PathBuf::from("b")],
                json: true,
                report: false,
            })
        );
    }

    #[test]
    fn parse_candidates_default_extension_point() {
        let cli = Cli::parse_from(["autoconf", "candidates"]);
        match cli.command {
            Some(Commands::Candidates {
                roots,
                extension_point,
            }) => {
                assert!(roots.is_empty());
                assert_eq!(extension_point, AUTO_CONFIGURATION_KEY);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
