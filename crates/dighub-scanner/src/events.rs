//! Scan progress notifications.
//!
//! The engine reports what it is doing through a [`ScanObserver`] instead of
//! printing. [`TracingObserver`] turns events into log lines; front ends wrap
//! it to drive progress displays.

use crate::error::SearchError;
use crate::model::Match;
use chrono::{DateTime, Utc};
use dighub_dorks::Pattern;
use std::time::Duration;
use tracing::{debug, info, warn, Level};

/// Number of URLs shown per matching pattern outside debug logging.
pub const URL_PREVIEW: usize = 3;

/// Receives scan events. Every method defaults to doing nothing.
///
/// Calls arrive concurrently from worker tasks.
pub trait ScanObserver: Send + Sync {
    /// A query is about to be issued for `pattern`.
    fn on_query(&self, _pattern: &Pattern, _query: &str) {}

    /// `pattern` produced hits.
    fn on_match(&self, _pattern: &Pattern, _matches: &[Match]) {}

    /// `pattern` produced no hits.
    fn on_no_match(&self, _pattern: &Pattern) {}

    /// A non-rate-limit failure; `attempt` counts from 1.
    fn on_attempt_failed(
        &self,
        _pattern: &Pattern,
        _attempt: u32,
        _max_attempts: u32,
        _error: &SearchError,
    ) {
    }

    /// Attempts for `pattern` are exhausted; it contributes nothing.
    fn on_pattern_abandoned(&self, _pattern: &Pattern, _error: &SearchError) {}

    /// A cooldown is starting; requests resume at `resume_at`.
    fn on_rate_limit_wait(&self, _resume_at: DateTime<Utc>, _wait: Duration) {}

    /// `completed` of `total` patterns are done.
    fn on_progress(&self, _completed: usize, _total: usize) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ScanObserver for NoopObserver {}

/// Observer that logs events through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ScanObserver for TracingObserver {
    fn on_query(&self, pattern: &Pattern, query: &str) {
        debug!(pattern = %pattern.text, query, "searching");
    }

    fn on_match(&self, pattern: &Pattern, matches: &[Match]) {
        info!(
            severity = %pattern.severity.label(),
            pattern = %pattern.text,
            count = matches.len(),
            "pattern matched"
        );

        let shown = if tracing::enabled!(Level::DEBUG) {
            matches.len()
        } else {
            URL_PREVIEW
        };

        for m in matches.iter().take(shown) {
            info!("  {}", m.url);
        }
        if matches.len() > shown {
            info!("  ... and {} more", matches.len() - shown);
        }
    }

    fn on_no_match(&self, pattern: &Pattern) {
        debug!(pattern = %pattern.text, "no matches");
    }

    fn on_attempt_failed(
        &self,
        pattern: &Pattern,
        attempt: u32,
        max_attempts: u32,
        error: &SearchError,
    ) {
        debug!(
            pattern = %pattern.text,
            attempt,
            max_attempts,
            error = %error,
            "search attempt failed"
        );
    }

    fn on_pattern_abandoned(&self, pattern: &Pattern, error: &SearchError) {
        warn!(pattern = %pattern.text, error = %error, "giving up on pattern");
    }

    fn on_rate_limit_wait(&self, resume_at: DateTime<Utc>, wait: Duration) {
        warn!(
            resume_at = %resume_at.format("%H:%M:%S"),
            wait_secs = wait.as_secs(),
            "rate limit hit, waiting for reset"
        );
    }
}
