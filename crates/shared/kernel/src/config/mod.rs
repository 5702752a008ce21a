//! Dashboard configuration loading.
//!
//! The primary source is a file (TOML, JSON, YAML, ... as supported by the
//! `config` crate) overlaid with `NOVIS__SECTION__FIELD` environment variables.
//! When no primary file exists, [`resolve`] substitutes the fallback record
//! instead of failing.

mod loader;
mod resolve;
mod validate;

pub use loader::{
    ConfigLoader, DEFAULT_CONFIG_PATH, ENV_PREFIX, ENV_SEPARATOR, SUPPORTED_EXTENSIONS,
    load_config, locate_config,
};
pub use resolve::{ConfigSource, Resolved, resolve, resolve_config};
pub use validate::{endpoint_url, validate};

use std::borrow::Cow;

/// Errors raised while loading or validating the dashboard configuration.
#[novis_derive::novis_error]
pub enum ConfigError {
    /// The file could not be read, parsed or deserialized into the record.
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: ::config::ConfigError, context: Option<Cow<'static, str>> },

    /// A URL-valued field does not parse.
    #[error("Invalid URL{}: {source}", format_context(.context))]
    Url { source: url::ParseError, context: Option<Cow<'static, str>> },

    /// A field parsed but violates a validation rule.
    #[error("Invalid value for `{field}`{}: {message}", format_context(.context))]
    Invalid { field: &'static str, message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, message: impl Into<Cow<'static, str>>) -> Self {
        Self::Invalid { field, message: message.into(), context: None }
    }
}
