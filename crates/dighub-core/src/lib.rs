//! Dighub Core - Foundation crate for the dighub code-search scanner.
//!
//! This crate provides shared types, error handling, and configuration
//! management that the other dighub crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths and env overrides
//! - [`types`] - Shared newtypes and enums (`Severity`, `Target`, `Credential`)
//!
//! # Example
//!
//! ```rust
//! use dighub_core::{AppConfig, Target, TargetKind};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::default();
//! config.validate()?;
//!
//! let target = Target::new(TargetKind::Organization, "acme-corp")?;
//! assert_eq!(target.qualifier(), "org:acme-corp");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, FilterConfig, GithubConfig, OutputConfig, ScanConfig};
pub use error::{ConfigError, ConfigResult, DighubError, Result};
pub use types::{Credential, OutputFormat, Severity, SeverityFilter, Target, TargetKind};
