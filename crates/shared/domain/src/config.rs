use crate::features::FeatureSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

/// API key shipped with the fallback record. Only valid against local demo backends.
pub const DEMO_API_KEY: &str = "demo_key_12345";

/// Base URL of the local development backend used by the fallback record.
pub const LOCAL_BASE_URL: &str = "http://localhost:5678";

/// The full dashboard configuration record.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfigInner {
    pub api: ApiConfig,
    pub auth: AuthConfig,
    pub client: ClientConfig,
    pub features: FeaturesConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

/// Thin Arc-wrapped record for inexpensive cloning into consumers.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DashboardConfig {
    inner: Arc<DashboardConfigInner>,
}

impl DashboardConfig {
    pub fn new(inner: DashboardConfigInner) -> Self {
        Self { inner: Arc::new(inner) }
    }

    /// The reduced record used when no primary configuration can be found.
    ///
    /// Points at a local backend with the demo key and demo/offline modes enabled.
    #[must_use]
    pub fn fallback() -> Self {
        Self::default()
    }

    /// Returns a copy that is safe to print: the API key is masked.
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        copy.auth.api_key = ApiKey::new(self.auth.api_key.redacted());
        copy
    }
}

impl From<DashboardConfigInner> for DashboardConfig {
    fn from(inner: DashboardConfigInner) -> Self {
        Self::new(inner)
    }
}

impl Deref for DashboardConfig {
    type Target = DashboardConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for DashboardConfig {
    fn deref_mut(&mut self) -> &mut DashboardConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Connection parameters of the metrics webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    pub base_url: String,
    pub endpoint: String,
    pub version: String,
    #[serde(alias = "timeout")]
    pub timeout_ms: u64,
    pub retry_attempts: u32,
    pub retry_delay_ms: u64,
}

impl ApiConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    #[must_use]
    pub const fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    /// `base_url` and `endpoint` joined by exactly one slash.
    #[must_use]
    pub fn endpoint_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = self.endpoint.trim_start_matches('/');
        if path.is_empty() { base.to_owned() } else { format!("{base}/{path}") }
    }
}

/// How the API key is presented to the backend.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMethod {
    /// Sent as a request header named by [`AuthConfig::header_name`].
    #[default]
    Header,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthConfig {
    pub api_key: ApiKey,
    pub method: AuthMethod,
    pub header_name: String,
}

/// Secret API key. Never printed through `Debug`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    /// Shortest key whose redacted form keeps a visible prefix.
    pub const MIN_PREFIXED_LEN: usize = 12;

    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The raw key, for building the auth header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    #[must_use]
    pub fn is_demo(&self) -> bool {
        self.0 == DEMO_API_KEY
    }

    /// First four characters followed by `***`. Keys shorter than
    /// [`ApiKey::MIN_PREFIXED_LEN`] are fully masked.
    #[must_use]
    pub fn redacted(&self) -> String {
        if self.0.chars().count() < Self::MIN_PREFIXED_LEN {
            return "***".to_owned();
        }
        let prefix: String = self.0.chars().take(4).collect();
        format!("{prefix}***")
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Tenant identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    pub id: String,
    pub name: String,
    pub environment: String,
}

impl ClientConfig {
    #[must_use]
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FeaturesConfig {
    pub demo_mode: bool,
    pub offline_mode: bool,
    pub health_check_enabled: bool,
    pub health_check_interval_ms: u64,
}

impl FeaturesConfig {
    #[must_use]
    pub const fn health_check_interval(&self) -> Duration {
        Duration::from_millis(self.health_check_interval_ms)
    }

    /// The boolean toggles as a flag set.
    #[must_use]
    pub fn flags(&self) -> FeatureSet {
        let mut set = FeatureSet::empty();
        set.set(FeatureSet::DEMO, self.demo_mode);
        set.set(FeatureSet::OFFLINE, self.offline_mode);
        set.set(FeatureSet::HEALTH_CHECK, self.health_check_enabled);
        set
    }
}

/// Dashboard presentation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UiConfig {
    pub refresh_interval_ms: u64,
    pub chart_history_days: u32,
    /// BCP 47 locale tag used for dates and numbers.
    pub time_format: String,
}

impl UiConfig {
    #[must_use]
    pub const fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: LogLevel,
    pub enable_console: bool,
    pub enable_remote: bool,
}

/// Minimum severity written by the dashboard logger.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    #[serde(alias = "warning")]
    Warn,
    Error,
}

impl LogLevel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of `debug`, `info`, `warn`, `error`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLogLevelError(String);

impl fmt::Display for ParseLogLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown log level '{}' (expected debug, info, warn or error)", self.0)
    }
}

impl std::error::Error for ParseLogLevelError {}

impl FromStr for LogLevel {
    type Err = ParseLogLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(ParseLogLevelError(s.to_owned())),
        }
    }
}

// --- Default (the fallback record) ---

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: LOCAL_BASE_URL.to_owned(),
            endpoint: "/webhook/executive-metrics".to_owned(),
            version: "1.0".to_owned(),
            timeout_ms: 10_000,
            retry_attempts: 3,
            retry_delay_ms: 2_000,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            api_key: ApiKey::new(DEMO_API_KEY),
            method: AuthMethod::Header,
            header_name: "x-api-key".to_owned(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            id: "local".to_owned(),
            name: "Local Development".to_owned(),
            environment: "development".to_owned(),
        }
    }
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            demo_mode: true,
            offline_mode: true,
            health_check_enabled: true,
            health_check_interval_ms: 60_000,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { refresh_interval_ms: 300_000, chart_history_days: 7, time_format: "es-CL".to_owned() }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: LogLevel::Info, enable_console: true, enable_remote: false }
    }
}
