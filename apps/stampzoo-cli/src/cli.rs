//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::logging::Verbosity;

/// stampzoo - zoo stamp rally
///
/// Scan QR codes at animal enclosures to fill a 3x3 bingo board.
#[derive(Debug, Parser)]
#[command(name = "stampzoo")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scan a code and collect the stamp if it is an animal code
    Scan(ScanArgs),

    /// Parse a code without touching the collection
    Parse {
        /// Raw scanned text
        raw: String,
    },

    /// Show the bingo board
    Board,

    /// Show every catalog animal and whether it has been collected
    Guide,

    /// List collected stamps, newest first
    Stamps(StampsArgs),

    /// Show database, catalog and collection status
    Status,

    /// Delete every collected stamp
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },

    /// View or create the configuration file
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Raw scanned text, e.g. stamp_zoo://animal/giraffe
    pub raw: String,

    /// Latitude at scan time
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude at scan time
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,
}

#[derive(Debug, Args)]
pub struct StampsArgs {
    /// Only stamps collected from test codes
    #[arg(long, conflicts_with = "real")]
    pub test: bool,

    /// Only stamps collected from real codes
    #[arg(long)]
    pub real: bool,
}

impl StampsArgs {
    /// `Some(true)` for test only, `Some(false)` for real only.
    pub fn test_filter(&self) -> Option<bool> {
        match (self.test, self.real) {
            (true, _) => Some(true),
            (false, true) => Some(false),
            (false, false) => None,
        }
    }
}

/// Configuration subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show,

    /// Write a default configuration file
    Init,

    /// Print the configuration file path
    Path,
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_scan_with_location() {
        let cli = Cli::try_parse_from([
            "stampzoo",
            "scan",
            "stamp_zoo://animal/giraffe",
            "--lat",
            "35.7",
            "--lon",
            "-139.7",
        ])
        .unwrap();

        let Command::Scan(args) = cli.command else {
            panic!("expected scan");
        };
        assert_eq!(args.raw, "stamp_zoo://animal/giraffe");
        assert_eq!(args.lat, Some(35.7));
        assert_eq!(args.lon, Some(-139.7));
    }

    #[test]
    fn test_scan_lat_requires_lon() {
        assert!(Cli::try_parse_from(["stampzoo", "scan", "x", "--lat", "1.0"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["stampzoo", "board", "--json", "-vv"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_verbosity_quiet_wins() {
        let cli = Cli::try_parse_from(["stampzoo", "-q", "-v", "status"]).unwrap();
        assert_eq!(cli.verbosity(), Verbosity::Quiet);
    }

    #[test]
    fn test_stamps_filter() {
        let cli = Cli::try_parse_from(["stampzoo", "stamps", "--test"]).unwrap();
        let Command::Stamps(args) = cli.command else {
            panic!("expected stamps");
        };
        assert_eq!(args.test_filter(), Some(true));

        assert!(Cli::try_parse_from(["stampzoo", "stamps", "--test", "--real"]).is_err());
    }

    #[test]
    fn test_reset_and_config() {
        let cli = Cli::try_parse_from(["stampzoo", "reset", "--yes"]).unwrap();
        assert!(matches!(cli.command, Command::Reset { yes: true }));

        let cli = Cli::try_parse_from(["stampzoo", "config", "path"]).unwrap();
        assert!(matches!(cli.command, Command::Config(ConfigCommand::Path)));
    }
}
