//! Dighub Scanner - GitHub code-search scanning engine.
//!
//! This crate runs a list of search patterns against one organization or
//! user through the GitHub code-search API, using a bounded pool of workers,
//! and aggregates the hits.
//!
//! # Features
//!
//! - Bounded worker pool pulling patterns from a FIFO queue
//! - Linear backoff for transient failures, bounded per pattern
//! - Unbounded rate-limit retries that sleep until the window resets
//! - Optional pool-wide cooldown when any worker is rate limited
//! - Totals, unique files, and per-severity counts
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use dighub_core::{AppConfig, Credential, Target, TargetKind};
//! use dighub_dorks::PatternCatalog;
//! use dighub_scanner::{ScanOptions, ScanScheduler, TracingObserver};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::default();
//! let target = Target::new(TargetKind::Organization, "acme-corp")?;
//! let credential = Credential::new("ghp_example")?;
//!
//! let scheduler = ScanScheduler::from_config(&config, credential, target, Arc::new(TracingObserver))?;
//! let result = scheduler
//!     .run(PatternCatalog::builtin().list(), ScanOptions::from_config(&config.scan))
//!     .await?;
//!
//! println!("{} matches in {} files", result.total_matches, result.unique_files);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod aggregator;
pub mod client;
pub mod error;
pub mod events;
pub mod executor;
pub mod model;
pub mod rate_limit;
pub mod scheduler;
pub mod sleeper;

// Re-export commonly used types
pub use aggregator::summarize;
pub use client::{GitHubClient, SearchBackend, SearchItem, SearchResponse};
pub use error::{Result, ScanError, SearchError};
pub use events::{NoopObserver, ScanObserver, TracingObserver};
pub use executor::{build_query, QueryExecutor};
pub use model::{Match, ScanResult, SeverityCounts};
pub use rate_limit::{CooldownMode, CooldownPolicy, RateLimitCoordinator};
pub use scheduler::{ScanOptions, ScanScheduler, ScanState};
pub use sleeper::{RecordingSleeper, Sleeper, TokioSleeper};
