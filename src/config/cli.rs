//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// netconsole: interactive network console
///
/// Lists and reconfigures the interfaces in the ifupdown interfaces file,
/// probes hosts with ICMP echo and checks a remote endpoint over HTTP.
#[derive(Debug, Parser)]
#[command(name = "netconsole")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Path to the interfaces file
    #[arg(long, short = 'i', value_name = "FILE")]
    pub interfaces: Option<PathBuf>,

    /// Interface name prefix that may be reconfigured (can be specified multiple times)
    #[arg(long = "allow-prefix", value_name = "PREFIX")]
    pub allow_prefixes: Vec<String>,

    /// URL queried by the health check
    #[arg(long = "health-url", value_name = "URL")]
    pub health_url: Option<String>,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

/// Subcommands for netconsole
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "netconsole.toml")]
        output: PathBuf,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }
}
