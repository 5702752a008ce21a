//! # Domain Models
//!
//! Pure data for the NOVIS executive dashboard client: the configuration
//! record, its six sections and the fallback record used when no primary
//! configuration is available.
//! Keep it lean: no I/O and no loading logic, just data and simple helpers.

pub mod config;
pub mod features;
