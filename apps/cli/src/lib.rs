//! # NOVIS CLI
//!
//! Resolves the executive dashboard configuration the same way the dashboard
//! does at startup, then inspects or validates it.
//!
//! ## Example
//! ```no_run
//! use clap::Parser;
//! use novis_cli::{Cli, run};
//!
//! fn main() -> anyhow::Result<()> {
//!     run(&Cli::parse())
//! }
//! ```

pub mod args;
pub mod commands;

pub use crate::args::{Cli, Command, OutputFormat};
pub use crate::commands::execute;

use anyhow::{Context, Result};
use novis_kernel::config::{ConfigSource, Resolved, resolve};
use novis_kernel::domain::config::{DashboardConfig, LoggingConfig};
use novis_logger::Logger;
use std::io::{self, Write};
use tracing::info_span;

/// Logging handles that must outlive the command.
#[derive(Debug, Default)]
pub struct LoggingGuard {
    logger: Option<Logger>,
    #[cfg(feature = "remote")]
    otel: Option<novis_logger::OpenTelemetryGuard>,
}

impl LoggingGuard {
    /// Whether a global subscriber was installed.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.logger.is_some()
    }

    /// Whether log files are being written.
    #[must_use]
    pub fn writes_to_file(&self) -> bool {
        self.logger.as_ref().is_some_and(Logger::writes_to_file)
    }
}

/// Installs the global subscriber described by the `logging` section.
///
/// When no sink would be attached (console off, no `--log-dir`, and remote off or
/// not built in) nothing is installed.
///
/// # Errors
/// Returns an error if the subscriber or the remote exporter cannot be initialized.
pub fn init_logging(config: &DashboardConfig, cli: &Cli) -> Result<LoggingGuard> {
    let mut logging: LoggingConfig = config.logging.clone();
    if let Some(level) = cli.log_level {
        logging.level = level;
    }

    let remote = logging.enable_remote && cfg!(feature = "remote");
    if !logging.enable_console && !remote && cli.log_dir.is_none() {
        return Ok(LoggingGuard::default());
    }

    #[cfg(feature = "remote")]
    let otel = if remote {
        Some(
            novis_logger::init_otlp_tracer(env!("CARGO_PKG_NAME"), config.client.id.as_str())
                .context("Failed to initialize remote logging")?,
        )
    } else {
        None
    };

    let builder = Logger::builder().name(env!("CARGO_PKG_NAME")).from_config(&logging);
    let builder = match &cli.log_filter {
        Some(filter) => builder.env_filter(filter),
        None => builder,
    };
    let logger = match &cli.log_dir {
        Some(dir) => {
            let builder = builder.path(dir);
            if cli.log_json { builder.json().init() } else { builder.init() }
        },
        None => builder.init(),
    }
    .context("Failed to initialize logging")?;

    Ok(LoggingGuard {
        logger: Some(logger),
        #[cfg(feature = "remote")]
        otel,
    })
}

/// Resolves the configuration, sets up logging and runs the requested command.
///
/// # Errors
/// Returns an error if the primary file is malformed or invalid, or if the
/// command itself fails.
pub fn run(cli: &Cli) -> Result<()> {
    let command = cli.command.clone().unwrap_or_default();
    let mut stdout = io::stdout().lock();

    if matches!(command, Command::Fallback) {
        commands::execute(&command, &fallback_only(cli), &mut stdout)?;
        stdout.flush()?;
        return Ok(());
    }

    let resolved =
        resolve(Some(&cli.config)).context("Critical: Configuration is malformed or invalid")?;

    let _logging = init_logging(&resolved.config, cli)?;
    let span = info_span!("novis", client = %resolved.config.client.id);
    let _span = span.enter();
    resolved.announce();

    commands::execute(&command, &resolved, &mut stdout)?;
    stdout.flush()?;
    Ok(())
}

fn fallback_only(cli: &Cli) -> Resolved {
    Resolved {
        config: DashboardConfig::fallback(),
        source: ConfigSource::Fallback { searched: cli.config.clone() },
    }
}
