//! Scan scheduling over a bounded worker pool.
//!
//! Patterns are queued in order; `workers` tasks pull from the queue until
//! it is empty, appending each pattern's matches to a shared collector and
//! pausing `delay` after every pattern. The scan returns once every worker
//! has exited.

use crate::aggregator::summarize;
use crate::client::{GitHubClient, SearchBackend};
use crate::error::{Result, ScanError};
use crate::events::ScanObserver;
use crate::executor::QueryExecutor;
use crate::model::{Match, ScanResult};
use crate::rate_limit::{CooldownPolicy, RateLimitCoordinator};
use crate::sleeper::{Sleeper, TokioSleeper};
use chrono::Utc;
use dighub_core::{AppConfig, Credential, ScanConfig, Target};
use dighub_dorks::Pattern;
use futures::stream::{FuturesUnordered, StreamExt};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

/// Worker pool settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    /// Concurrent workers; zero is treated as one
    pub workers: usize,
    /// Pause after each pattern, per worker
    pub delay: Duration,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            workers: 5,
            delay: Duration::from_secs(2),
        }
    }
}

impl ScanOptions {
    /// Build from the `[scan]` configuration section.
    #[must_use]
    pub fn from_config(config: &ScanConfig) -> Self {
        Self {
            workers: config.workers,
            delay: Duration::from_secs(config.delay_secs),
        }
    }
}

/// Lifecycle of a scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// No scan started yet
    Idle,
    /// Workers are running
    Running,
    /// All workers have exited
    Completed,
}

/// FIFO of patterns awaiting dispatch. Nothing is added after a scan starts.
struct WorkQueue {
    pending: Mutex<VecDeque<Arc<Pattern>>>,
}

impl WorkQueue {
    fn new(patterns: Vec<Arc<Pattern>>) -> Self {
        Self {
            pending: Mutex::new(patterns.into()),
        }
    }

    fn next(&self) -> Option<Arc<Pattern>> {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
    }
}

/// Shared destination for matches. Workers only ever append.
#[derive(Clone, Default)]
struct MatchSink {
    matches: Arc<Mutex<Vec<Match>>>,
}

impl MatchSink {
    fn append(&self, batch: Vec<Match>) {
        if batch.is_empty() {
            return;
        }
        self.matches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(batch);
    }

    fn drain(&self) -> Vec<Match> {
        std::mem::take(&mut *self.matches.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

/// Runs a scan over a pattern list.
pub struct ScanScheduler {
    executor: Arc<QueryExecutor>,
    sleeper: Arc<dyn Sleeper>,
    state: Mutex<ScanState>,
}

impl ScanScheduler {
    /// Create an idle scheduler.
    #[must_use]
    pub fn new(executor: Arc<QueryExecutor>, sleeper: Arc<dyn Sleeper>) -> Self {
        Self {
            executor,
            sleeper,
            state: Mutex::new(ScanState::Idle),
        }
    }

    /// Wire a scheduler against the real GitHub API.
    pub fn from_config(
        config: &AppConfig,
        credential: Credential,
        target: Target,
        observer: Arc<dyn ScanObserver>,
    ) -> Result<Self> {
        config.validate()?;
        let backend: Arc<dyn SearchBackend> = Arc::new(GitHubClient::new(credential, &config.github)?);
        Ok(Self::with_backend(config, backend, Arc::new(TokioSleeper), target, observer))
    }

    /// Wire a scheduler against any search backend and sleeper.
    #[must_use]
    pub fn with_backend(
        config: &AppConfig,
        backend: Arc<dyn SearchBackend>,
        sleeper: Arc<dyn Sleeper>,
        target: Target,
        observer: Arc<dyn ScanObserver>,
    ) -> Self {
        let coordinator = Arc::new(RateLimitCoordinator::new(
            Arc::clone(&backend),
            Arc::clone(&sleeper),
            Arc::clone(&observer),
            CooldownPolicy::from_config(&config.scan),
        ));
        let executor = QueryExecutor::new(backend, coordinator, Arc::clone(&sleeper), observer, target)
            .with_max_attempts(config.scan.max_attempts);

        Self::new(Arc::new(executor), sleeper)
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> ScanState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_state(&self, state: ScanState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = state;
    }

    /// Scan every pattern and aggregate the results.
    ///
    /// # Errors
    /// Returns [`ScanError::NoPatternsSelected`] without issuing any request
    /// when `patterns` is empty. Individual pattern failures never fail the
    /// scan.
    pub async fn run(&self, patterns: Vec<Arc<Pattern>>, options: ScanOptions) -> Result<ScanResult> {
        if patterns.is_empty() {
            return Err(ScanError::NoPatternsSelected);
        }

        let total = patterns.len();
        let workers = options.workers.max(1);
        let started_at = Utc::now();
        let clock = Instant::now();

        self.set_state(ScanState::Running);
        info!(
            login = %self.executor.target(),
            patterns = total,
            workers,
            delay_secs = options.delay.as_secs(),
            "starting scan"
        );

        let queue = Arc::new(WorkQueue::new(patterns));
        let sink = MatchSink::default();
        let completed = Arc::new(AtomicUsize::new(0));

        let mut handles: FuturesUnordered<_> = (0..workers)
            .map(|worker_id| {
                let worker = Worker {
                    id: worker_id,
                    executor: Arc::clone(&self.executor),
                    sleeper: Arc::clone(&self.sleeper),
                    queue: Arc::clone(&queue),
                    sink: sink.clone(),
                    completed: Arc::clone(&completed),
                    total,
                    delay: options.delay,
                };
                tokio::spawn(worker.run())
            })
            .collect();

        while let Some(joined) = handles.next().await {
            if let Err(e) = joined {
                error!("Scan worker failed: {}", e);
            }
        }

        let result = summarize(
            sink.drain(),
            total,
            clock.elapsed(),
            self.executor.target().name(),
            started_at,
        );
        self.set_state(ScanState::Completed);

        info!(
            matches = result.total_matches,
            unique_files = result.unique_files,
            duration_secs = result.duration.as_secs(),
            "scan complete"
        );

        Ok(result)
    }
}

struct Worker {
    id: usize,
    executor: Arc<QueryExecutor>,
    sleeper: Arc<dyn Sleeper>,
    queue: Arc<WorkQueue>,
    sink: MatchSink,
    completed: Arc<AtomicUsize>,
    total: usize,
    delay: Duration,
}

impl Worker {
    async fn run(self) {
        debug!(worker = self.id, "worker started");

        while let Some(pattern) = self.queue.next() {
            let matches = self.executor.execute(&pattern).await;
            self.sink.append(matches);

            let done = self.completed.fetch_add(1, Ordering::SeqCst) + 1;
            self.executor.observer().on_progress(done, self.total);

            self.sleeper.sleep(self.delay).await;
        }

        debug!(worker = self.id, "worker finished");
    }
}
