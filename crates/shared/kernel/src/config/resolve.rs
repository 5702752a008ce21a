use super::loader::ConfigLoader;
use super::validate::validate;
use super::{ConfigError, ConfigErrorExt};
use novis_domain::config::DashboardConfig;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Where the resolved record came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// A primary file (plus environment overrides).
    File(PathBuf),
    /// No primary file was found at `searched`; the fallback record is in use.
    Fallback { searched: PathBuf },
}

impl ConfigSource {
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Fallback { searched } => {
                write!(f, "built-in defaults (nothing found at {})", searched.display())
            },
        }
    }
}

/// The configuration record chosen at startup, together with its origin.
#[derive(Debug, Clone)]
pub struct Resolved {
    pub config: DashboardConfig,
    pub source: ConfigSource,
}

impl Resolved {
    /// Reports the outcome of resolution to the installed `tracing` subscriber.
    ///
    /// Call this after logging has been initialized from [`Resolved::config`] so the
    /// fallback warning reaches the configured sink.
    pub fn announce(&self) {
        match &self.source {
            ConfigSource::Fallback { searched } => {
                warn!(searched = %searched.display(), "[Dashboard] Config not loaded, using defaults");
            },
            ConfigSource::File(path) => {
                info!(
                    path = %path.display(),
                    client = %self.config.client.id,
                    environment = %self.config.client.environment,
                    "Dashboard config loaded"
                );
            },
        }

        if self.config.client.is_production() && self.config.auth.api_key.is_demo() {
            warn!(client = %self.config.client.id, "Production client is using the demo API key");
        }
    }
}

impl ConfigLoader {
    /// Resolves the primary file, or the fallback record when none exists.
    ///
    /// A primary file that exists but fails to parse or validate is an error; only
    /// absence triggers the fallback. Environment overrides apply to the primary
    /// file only. Nothing is logged; see [`Resolved::announce`].
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the located file is malformed or invalid.
    pub fn resolve(&self) -> Result<Resolved, ConfigError> {
        let Some(path) = self.locate() else {
            return Ok(Resolved {
                config: DashboardConfig::fallback(),
                source: ConfigSource::Fallback { searched: self.effective_path() },
            });
        };

        let config: DashboardConfig = self.load_from(&path)?;
        validate(&config).context(format!("Validating {}", path.display()))?;

        Ok(Resolved { config, source: ConfigSource::File(path) })
    }
}

/// Resolves the dashboard configuration without logging.
///
/// # Errors
/// See [`ConfigLoader::resolve`].
pub fn resolve(path: Option<impl AsRef<Path>>) -> Result<Resolved, ConfigError> {
    let loader = ConfigLoader::new();
    match path {
        Some(p) => loader.path(p.as_ref()).resolve(),
        None => loader.resolve(),
    }
}

/// Resolves the dashboard configuration and announces the outcome.
///
/// # Errors
/// See [`ConfigLoader::resolve`].
pub fn resolve_config(path: Option<impl AsRef<Path>>) -> Result<Resolved, ConfigError> {
    let resolved = resolve(path)?;
    resolved.announce();
    Ok(resolved)
}
