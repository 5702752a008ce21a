use super::{ConfigError, ConfigErrorExt};
use ::config::{Config, Environment, File, Map};
use serde::de::DeserializeOwned;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File looked up when no path is given (extension resolved by [`locate_config`]).
pub const DEFAULT_CONFIG_PATH: &str = "dashboard";
/// Prefix of environment overrides, e.g. `NOVIS__API__BASE_URL`.
pub const ENV_PREFIX: &str = "NOVIS";
/// Separator between prefix, section and field in environment overrides.
pub const ENV_SEPARATOR: &str = "__";
/// Extensions tried, in order, when the configured path does not name an existing file.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["toml", "json", "yaml", "yml", "ini", "ron", "json5"];

/// Layered configuration loader: a required base file plus environment overrides.
///
/// The process environment is used unless [`ConfigLoader::env_source`] replaces it,
/// which keeps tests free of global state.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    path: Option<PathBuf>,
    env: Option<Map<String, String>>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the primary file. The extension may be omitted.
    #[must_use]
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Reads overrides from `vars` instead of the process environment.
    #[must_use]
    pub fn env_source<K, V>(mut self, vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.env = Some(vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect());
        self
    }

    /// The configured path, or [`DEFAULT_CONFIG_PATH`].
    #[must_use]
    pub fn effective_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    /// Finds the primary file on disk, if any.
    #[must_use]
    pub fn locate(&self) -> Option<PathBuf> {
        locate_config(self.effective_path())
    }

    /// Loads and deserializes the primary file plus environment overrides.
    ///
    /// # Errors
    /// Returns [`ConfigError::Config`] if the file is missing, cannot be parsed,
    /// or does not match the structure of `T`.
    pub fn load<T>(&self) -> Result<T, ConfigError>
    where
        T: DeserializeOwned,
    {
        let path = self.locate().unwrap_or_else(|| self.effective_path());
        self.load_from(&path)
    }

    pub(crate) fn load_from<T>(&self, path: &Path) -> Result<T, ConfigError>
    where
        T: DeserializeOwned,
    {
        info!("Loading config from {}", path.display());

        let builder = Config::builder()
            .add_source(File::from(path).required(true))
            .add_source(self.environment());

        let config = builder
            .build()
            .context("Failed to build config")?
            .try_deserialize::<T>()
            .context(format!("Failed to deserialize {}", path.display()))?;

        Ok(config)
    }

    fn environment(&self) -> Environment {
        let env = Environment::with_prefix(ENV_PREFIX)
            .prefix_separator(ENV_SEPARATOR)
            .separator(ENV_SEPARATOR);
        match &self.env {
            Some(vars) => {
                debug!(overrides = vars.len(), "Using injected environment overrides");
                env.source(Some(vars.clone()))
            },
            None => env,
        }
    }
}

/// Loads `T` from `path` (default [`DEFAULT_CONFIG_PATH`]) with `NOVIS__` environment overrides.
///
/// Nested fields are addressed with double underscores, e.g. `NOVIS__LOGGING__LEVEL=debug`
/// maps to `logging.level`.
///
/// # Errors
/// Returns an error if the file cannot be found, parsed, or deserialized into `T`.
///
/// # Example
/// ```rust,no_run
/// use novis_kernel::config::load_config;
/// use novis_kernel::domain::config::DashboardConfig;
///
/// let cfg: DashboardConfig = load_config(Some("config/dashboard")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let loader = ConfigLoader::new();
    let loader = match path {
        Some(p) => loader.path(p.as_ref()),
        None => loader,
    };
    loader.load()
}

/// Returns `path` if it is a file, else the first `path.<ext>` that exists for
/// the [`SUPPORTED_EXTENSIONS`].
///
/// The extension is appended rather than replaced, so `dashboard.prod` finds
/// `dashboard.prod.toml`.
pub fn locate_config(path: impl AsRef<Path>) -> Option<PathBuf> {
    let path = path.as_ref();
    if path.is_file() {
        return Some(path.to_path_buf());
    }

    SUPPORTED_EXTENSIONS.iter().map(|ext| with_appended_extension(path, ext)).find(|p| p.is_file())
}

fn with_appended_extension(path: &Path, ext: &str) -> PathBuf {
    let mut raw = OsString::from(path.as_os_str());
    raw.push(".");
    raw.push(ext);
    PathBuf::from(raw)
}
