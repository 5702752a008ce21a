use super::{ConfigError, ConfigErrorExt};
use novis_domain::config::{ApiConfig, DashboardConfig};
use url::Url;

/// Checks the rules the type system cannot express.
///
/// Stops at the first violated rule.
///
/// # Errors
/// Returns [`ConfigError::Invalid`] naming the offending field, or
/// [`ConfigError::Url`] if `api.base_url` does not parse.
pub fn validate(config: &DashboardConfig) -> Result<(), ConfigError> {
    validate_api(&config.api)?;

    let auth = &config.auth;
    if auth.api_key.is_empty() {
        return Err(ConfigError::invalid("auth.api_key", "must not be empty"));
    }
    if auth.header_name.is_empty() {
        return Err(ConfigError::invalid("auth.header_name", "must not be empty"));
    }
    if let Some(c) = auth.header_name.chars().find(|c| !is_header_token_char(*c)) {
        return Err(ConfigError::invalid(
            "auth.header_name",
            format!("'{c}' is not allowed in an HTTP header name"),
        ));
    }

    if config.client.id.trim().is_empty() {
        return Err(ConfigError::invalid("client.id", "must not be empty"));
    }

    let features = &config.features;
    if features.health_check_enabled && features.health_check_interval_ms == 0 {
        return Err(ConfigError::invalid(
            "features.health_check_interval_ms",
            "must be greater than zero when health checks are enabled",
        ));
    }

    let ui = &config.ui;
    if ui.refresh_interval_ms == 0 {
        return Err(ConfigError::invalid("ui.refresh_interval_ms", "must be greater than zero"));
    }
    if ui.chart_history_days == 0 {
        return Err(ConfigError::invalid("ui.chart_history_days", "must be at least one day"));
    }
    if ui.time_format.trim().is_empty() {
        return Err(ConfigError::invalid("ui.time_format", "must be a locale tag such as es-CL"));
    }

    Ok(())
}

fn validate_api(api: &ApiConfig) -> Result<(), ConfigError> {
    let base = Url::parse(&api.base_url).context("api.base_url")?;
    if !matches!(base.scheme(), "http" | "https") {
        return Err(ConfigError::invalid(
            "api.base_url",
            format!("unsupported scheme '{}', expected http or https", base.scheme()),
        ));
    }
    if !base.has_host() {
        return Err(ConfigError::invalid("api.base_url", "must include a host"));
    }
    if !api.endpoint.starts_with('/') {
        return Err(ConfigError::invalid("api.endpoint", "must start with '/'"));
    }
    if api.timeout_ms == 0 {
        return Err(ConfigError::invalid("api.timeout_ms", "must be greater than zero"));
    }
    Ok(())
}

/// RFC 9110 `tchar`.
const fn is_header_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(c, '!' | '#' | '$' | '%' | '&' | '\'' | '*' | '+' | '-' | '.' | '^' | '_' | '`' | '|' | '~')
}

/// The full webhook URL (`api.base_url` + `api.endpoint`) as a parsed [`Url`].
///
/// # Errors
/// Returns [`ConfigError::Url`] if the joined URL does not parse.
pub fn endpoint_url(api: &ApiConfig) -> Result<Url, ConfigError> {
    Url::parse(&api.endpoint_url()).context("api.base_url + api.endpoint")
}
