//! Per-pattern query execution with retries.

use crate::client::{SearchBackend, SearchResponse};
use crate::error::SearchError;
use crate::events::ScanObserver;
use crate::model::Match;
use crate::rate_limit::RateLimitCoordinator;
use crate::sleeper::Sleeper;
use chrono::Utc;
use dighub_core::Target;
use dighub_dorks::Pattern;
use std::sync::Arc;
use std::time::Duration;

/// Default bound on non-rate-limit failures per pattern.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Base unit of the linear retry backoff.
const RETRY_DELAY: Duration = Duration::from_secs(1);

/// Compose the search query for `pattern` scoped to `target`.
#[must_use]
pub fn build_query(target: &Target, pattern: &Pattern) -> String {
    format!("{} {}", target.qualifier(), pattern.text)
}

/// Runs one pattern's search to completion.
///
/// Rate-limit rejections wait for the window to reset and retry without
/// consuming an attempt. Any other failure backs off linearly and counts
/// against `max_attempts`; once exhausted the pattern yields no matches.
pub struct QueryExecutor {
    backend: Arc<dyn SearchBackend>,
    coordinator: Arc<RateLimitCoordinator>,
    sleeper: Arc<dyn Sleeper>,
    observer: Arc<dyn ScanObserver>,
    target: Target,
    max_attempts: u32,
}

impl QueryExecutor {
    /// Create an executor for `target`.
    #[must_use]
    pub fn new(
        backend: Arc<dyn SearchBackend>,
        coordinator: Arc<RateLimitCoordinator>,
        sleeper: Arc<dyn Sleeper>,
        observer: Arc<dyn ScanObserver>,
        target: Target,
    ) -> Self {
        Self {
            backend,
            coordinator,
            sleeper,
            observer,
            target,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Override the attempt bound. Zero is treated as one.
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// The scanned target.
    #[must_use]
    pub fn target(&self) -> &Target {
        &self.target
    }

    /// The observer events are reported to.
    #[must_use]
    pub fn observer(&self) -> &Arc<dyn ScanObserver> {
        &self.observer
    }

    /// Search for `pattern` and return its hits. Never fails: a pattern that
    /// cannot be searched contributes an empty list.
    pub async fn execute(&self, pattern: &Arc<Pattern>) -> Vec<Match> {
        let query = build_query(&self.target, pattern);
        self.observer.on_query(pattern, &query);

        let mut failures = 0u32;
        loop {
            self.coordinator.wait_ready().await;

            match self.backend.search_code(&query).await {
                Ok(response) => return self.collect(pattern, response),
                Err(SearchError::RateLimited) => {
                    self.coordinator.await_reset().await;
                }
                Err(e) => {
                    failures += 1;
                    self.observer
                        .on_attempt_failed(pattern, failures, self.max_attempts, &e);
                    self.sleeper.sleep(RETRY_DELAY * failures).await;

                    if failures >= self.max_attempts {
                        self.observer.on_pattern_abandoned(pattern, &e);
                        return Vec::new();
                    }
                }
            }
        }
    }

    fn collect(&self, pattern: &Arc<Pattern>, response: SearchResponse) -> Vec<Match> {
        if response.total_count == 0 || response.items.is_empty() {
            self.observer.on_no_match(pattern);
            return Vec::new();
        }

        let observed_at = Utc::now();
        let matches: Vec<Match> = response
            .items
            .into_iter()
            .map(|item| Match {
                pattern: Arc::clone(pattern),
                url: item.html_url,
                repository: item.repository.full_name,
                path: item.path,
                score: item.score,
                observed_at,
            })
            .collect();

        self.observer.on_match(pattern, &matches);
        matches
    }
}
