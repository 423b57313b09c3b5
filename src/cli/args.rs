//! Command-line argument definitions
//!
//! Defines the CLI interface using the clap derive API. Both subcommands
//! take the registry file path positionally; the format is always sniffed,
//! never declared.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the plant registry inspector
///
/// Decodes hydroelectric plant registry files in either the fixed-record
/// binary layout or the multi-block text layout, and reports on the plants
/// and their cascade topology.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "hidro_registry",
    version,
    about = "Inspect hydroelectric plant registry files (binary or text layout)"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Decode a registry file and summarize its contents
    Summary(SummaryArgs),
    /// Report the cascade topology of a registry file
    Cascade(CascadeArgs),
}

/// Arguments for the summary command
#[derive(Debug, Clone, Parser)]
pub struct SummaryArgs {
    /// Registry file to decode (binary or text layout, auto-detected)
    #[arg(value_name = "FILE")]
    pub registry_file: PathBuf,

    /// Output format for the report
    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for the report"
    )]
    pub output_format: OutputFormat,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,
}

/// Arguments for the cascade command
#[derive(Debug, Clone, Parser)]
pub struct CascadeArgs {
    /// Registry file to decode (binary or text layout, auto-detected)
    #[arg(value_name = "FILE")]
    pub registry_file: PathBuf,

    /// Report only the downstream chain of this plant, with aggregated
    /// storage, instead of the whole topology
    #[arg(
        short = 'p',
        long = "plant",
        value_name = "NUM",
        help = "Plant number to trace downstream"
    )]
    pub plant: Option<i32>,

    /// Output format for the report
    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for the report"
    )]
    pub output_format: OutputFormat,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

impl Commands {
    /// Verbosity flag of whichever subcommand was given
    pub fn verbose(&self) -> u8 {
        match self {
            Commands::Summary(args) => args.verbose,
            Commands::Cascade(args) => args.verbose,
        }
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn log_level(&self) -> &'static str {
        match self.verbose() {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_mapping() {
        let mut args = SummaryArgs {
            registry_file: PathBuf::from("hidr.dat"),
            output_format: OutputFormat::Human,
            verbose: 0,
        };

        assert_eq!(Commands::Summary(args.clone()).log_level(), "warn");

        args.verbose = 1;
        assert_eq!(Commands::Summary(args.clone()).log_level(), "info");

        args.verbose = 2;
        assert_eq!(Commands::Summary(args.clone()).log_level(), "debug");

        args.verbose = 5;
        assert_eq!(Commands::Summary(args).log_level(), "trace");
    }

    #[test]
    fn test_parse_summary_command() {
        let args = Args::parse_from(["hidro_registry", "summary", "hidr.dat", "--format", "json"]);
        match args.command {
            Some(Commands::Summary(summary)) => {
                assert_eq!(summary.registry_file, PathBuf::from("hidr.dat"));
                assert_eq!(summary.output_format, OutputFormat::Json);
            }
            other => panic!("Expected summary command, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_cascade_command_with_plant() {
        let args = Args::parse_from(["hidro_registry", "cascade", "hidr.dat", "-p", "66", "-vv"]);
        match args.command {
            Some(Commands::Cascade(cascade)) => {
                assert_eq!(cascade.plant, Some(66));
                assert_eq!(cascade.verbose, 2);
            }
            other => panic!("Expected cascade command, got {other:?}"),
        }
    }
}
