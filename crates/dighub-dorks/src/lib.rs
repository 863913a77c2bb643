//! Dighub Dorks - Search pattern catalog for dighub.
//!
//! This crate provides the static pattern catalog the scanner draws from,
//! TOML pattern packs that extend or replace it, and the severity / include /
//! exclude filters applied before a scan.
//!
//! # Architecture
//!
//! - **Definition** ([`definition`]): the immutable `Pattern` type
//! - **Catalog** ([`catalog`]): ordered pattern collection, built-in data
//! - **Loader** ([`loader`]): TOML pattern packs
//! - **Filter** ([`filter`]): severity → include → exclude selection
//! - **Errors** ([`error`]): pattern-specific error types
//!
//! # Example
//!
//! ```rust
//! use dighub_core::{Severity, SeverityFilter};
//! use dighub_dorks::{PatternCatalog, PatternFilter};
//!
//! let catalog = PatternCatalog::builtin();
//! let filter = PatternFilter {
//!     severity: SeverityFilter::Only(Severity::High),
//!     include: vec!["aws".to_string()],
//!     exclude: Vec::new(),
//! };
//!
//! let selected = filter.apply(&catalog.list());
//! assert!(selected.iter().all(|p| p.severity == Severity::High));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

mod builtin;
pub mod catalog;
pub mod definition;
pub mod error;
pub mod filter;
pub mod loader;

// Re-export commonly used types
pub use catalog::PatternCatalog;
pub use definition::Pattern;
pub use error::{PatternError, Result};
pub use filter::{filter_by_exclude, filter_by_include, filter_by_severity, PatternFilter};
pub use loader::PatternLoader;
