//! Kernel utilities for the dashboard client.
//! Keep this crate lightweight: it turns files and environment variables into a
//! validated [`DashboardConfig`](novis_domain::config::DashboardConfig).
//!
//! ## Resolving the configuration
//! ```rust,no_run
//! use novis_kernel::config::resolve_config;
//!
//! let resolved = resolve_config(Some("config/dashboard"))?;
//! if resolved.source.is_fallback() {
//!     // running against the local demo backend
//! }
//! println!("{}", resolved.config.api.endpoint_url());
//! # Ok::<(), novis_kernel::config::ConfigError>(())
//! ```
pub mod config;

pub use novis_domain as domain;
