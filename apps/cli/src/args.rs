//! Command-line interface of the `novis` binary.

use clap::{Parser, Subcommand, ValueEnum};
use novis_kernel::config::DEFAULT_CONFIG_PATH;
use novis_kernel::domain::config::LogLevel;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "novis")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Resolve, inspect and validate the NOVIS executive dashboard configuration")]
pub struct Cli {
    /// Primary configuration file; the extension may be omitted
    #[arg(short, long, global = true, env = "NOVIS_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Override `logging.level` for this run
    #[arg(long, global = true)]
    pub log_level: Option<LogLevel>,

    /// Also write daily rotated log files into this directory
    #[arg(long, global = true, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Write the log files as JSON lines
    #[arg(long, global = true, requires = "log_dir")]
    pub log_json: bool,

    /// `tracing` filter directives, e.g. `novis_kernel=debug` (replaces `RUST_LOG`)
    #[arg(long, global = true, value_name = "DIRECTIVES")]
    pub log_filter: Option<String>,

    /// The subcommand to execute (defaults to `show`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the effective configuration with the API key masked
    Show {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Validate the configuration and exit non-zero on failure
    Check {
        /// Also fail when no primary file was found and the defaults were used
        #[arg(long)]
        strict: bool,
    },
    /// Print the webhook URL and how requests authenticate
    Endpoint,
    /// Print the built-in fallback record as TOML
    Fallback,
}

impl Default for Command {
    fn default() -> Self {
        Self::Show { format: OutputFormat::Json }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Toml,
}
