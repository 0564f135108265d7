//! Command-line interface for the `badge-kiosk` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::logging::Verbosity;

/// badge-kiosk - register event participants and print their badges
#[derive(Debug, Parser)]
#[command(name = "badge-kiosk")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute; defaults to the interactive kiosk
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the interactive kiosk (default)
    Kiosk,

    /// Write the whole roster to a CSV file
    ExportCsv(ExportCsvCommand),

    /// Print roster statistics
    Stats(StatsCommand),
}

#[derive(Debug, Args)]
pub struct ExportCsvCommand {
    /// Output directory (defaults to the configured export directory)
    #[arg(short, long, value_name = "DIR")]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct StatsCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

impl Cli {
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }

    /// The requested command, with the kiosk as the default.
    #[must_use]
    pub fn resolved_command(&self) -> &Command {
        self.command.as_ref().unwrap_or(&Command::Kiosk)
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "badge-kiosk");
    }

    #[test]
    fn test_default_command_is_kiosk() {
        let cli = Cli::parse_from(["badge-kiosk"]);
        assert!(matches!(cli.resolved_command(), Command::Kiosk));
        assert_eq!(cli.verbosity(), Verbosity::Normal);
    }

    #[test]
    fn test_export_csv_with_out_dir() {
        let cli = Cli::parse_from(["badge-kiosk", "-v", "export-csv", "--out", "/tmp/badges"]);
        assert_eq!(cli.verbosity(), Verbosity::Verbose);
        match cli.resolved_command() {
            Command::ExportCsv(cmd) => assert_eq!(cmd.out, Some(PathBuf::from("/tmp/badges"))),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_stats_json_and_quiet() {
        let cli = Cli::parse_from(["badge-kiosk", "stats", "--json", "-q"]);
        assert_eq!(cli.verbosity(), Verbosity::Quiet);
        assert!(matches!(cli.resolved_command(), Command::Stats(StatsCommand { json: true })));
    }

    #[test]
    fn test_verify_cli() {
        Cli::command().debug_assert();
    }
}
