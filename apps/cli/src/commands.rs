use crate::args::{Command, OutputFormat};
use anyhow::{Context, Result, bail};
use novis_kernel::config::{Resolved, endpoint_url};
use novis_kernel::domain::config::{AuthMethod, DashboardConfig};
use serde::Serialize;
use std::io::Write;

/// JSON shape printed by `novis show`.
#[derive(Debug, Serialize)]
struct ShowReport<'a> {
    source: String,
    fallback: bool,
    features: Vec<&'static str>,
    endpoint: String,
    config: &'a DashboardConfig,
}

/// Runs `command` against an already resolved configuration, writing to `out`.
///
/// # Errors
/// Returns an error if output cannot be written or serialized, or when
/// `check --strict` finds that the fallback record is in use.
pub fn execute(command: &Command, resolved: &Resolved, out: &mut impl Write) -> Result<()> {
    match command {
        Command::Show { format } => show(resolved, *format, out),
        Command::Check { strict } => check(resolved, *strict, out),
        Command::Endpoint => endpoint(&resolved.config, out),
        Command::Fallback => fallback(out),
    }
}

fn show(resolved: &Resolved, format: OutputFormat, out: &mut impl Write) -> Result<()> {
    let config = resolved.config.redacted();

    match format {
        OutputFormat::Json => {
            let report = ShowReport {
                source: resolved.source.to_string(),
                fallback: resolved.source.is_fallback(),
                features: config.features.flags().names(),
                endpoint: config.api.endpoint_url(),
                config: &config,
            };
            serde_json::to_writer_pretty(&mut *out, &report).context("Failed to encode JSON")?;
            writeln!(out)?;
        },
        OutputFormat::Toml => {
            writeln!(out, "# source: {}", resolved.source)?;
            out.write_all(toml::to_string_pretty(&config).context("Failed to encode TOML")?.as_bytes())?;
        },
    }
    Ok(())
}

fn check(resolved: &Resolved, strict: bool, out: &mut impl Write) -> Result<()> {
    if strict && resolved.source.is_fallback() {
        bail!("No primary configuration: {}", resolved.source);
    }
    writeln!(out, "ok: {}", resolved.source)?;
    Ok(())
}

fn endpoint(config: &DashboardConfig, out: &mut impl Write) -> Result<()> {
    let url = endpoint_url(&config.api)?;
    let api = &config.api;
    let auth = &config.auth;

    writeln!(out, "url:      {url}")?;
    match auth.method {
        AuthMethod::Header => {
            writeln!(out, "auth:     header {}: {}", auth.header_name, auth.api_key.redacted())?;
        },
    }
    writeln!(out, "version:  {}", api.version)?;
    writeln!(out, "timeout:  {} ms", api.timeout_ms)?;
    writeln!(out, "retries:  {} (every {} ms)", api.retry_attempts, api.retry_delay_ms)?;
    Ok(())
}

fn fallback(out: &mut impl Write) -> Result<()> {
    let body = toml::to_string_pretty(&DashboardConfig::fallback())
        .context("Failed to encode fallback record")?;
    out.write_all(body.as_bytes())?;
    Ok(())
}
