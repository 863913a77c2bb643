//! Rate-limit cooldowns.
//!
//! When a search is rejected for rate limiting, the worker asks the status
//! endpoint when the search window resets and sleeps until then plus a
//! margin. If the status is unavailable it sleeps a fixed fallback.
//!
//! In [`CooldownMode::Shared`] the resume time is published to every worker,
//! so one status lookup pauses the whole pool.

use crate::client::SearchBackend;
use crate::events::ScanObserver;
use crate::sleeper::Sleeper;
use chrono::{DateTime, Utc};
use dighub_core::ScanConfig;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tracing::{debug, warn};

/// Whether a cooldown pauses one worker or all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CooldownMode {
    /// Only the worker that hit the limit waits.
    #[default]
    PerWorker,
    /// Every worker waits until the published resume time.
    Shared,
}

/// Cooldown tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CooldownPolicy {
    /// Wait used when the reset time is unknown
    pub fallback: Duration,
    /// Added to the reported reset time
    pub margin: Duration,
    /// Scope of the cooldown
    pub mode: CooldownMode,
}

impl Default for CooldownPolicy {
    fn default() -> Self {
        Self {
            fallback: Duration::from_secs(60),
            margin: Duration::from_secs(5),
            mode: CooldownMode::PerWorker,
        }
    }
}

impl CooldownPolicy {
    /// Build from the `[scan]` configuration section.
    #[must_use]
    pub fn from_config(config: &ScanConfig) -> Self {
        Self {
            fallback: Duration::from_secs(config.rate_limit_fallback_secs),
            margin: Duration::from_secs(config.reset_margin_secs),
            mode: if config.shared_cooldown {
                CooldownMode::Shared
            } else {
                CooldownMode::PerWorker
            },
        }
    }
}

/// How long to wait for a window resetting at `reset`, seen at `now`.
///
/// Never negative: a reset already far enough in the past yields zero.
/// A reset at the end of the representable range ignores the margin.
#[must_use]
pub fn cooldown_duration(reset: DateTime<Utc>, now: DateTime<Utc>, margin: Duration) -> Duration {
    let resume_at = chrono::Duration::from_std(margin)
        .ok()
        .and_then(|margin| reset.checked_add_signed(margin))
        .unwrap_or(reset);
    (resume_at - now).to_std().unwrap_or(Duration::ZERO)
}

/// The instant `wait` after `now`, saturating at the latest representable time.
fn resume_time(now: DateTime<Utc>, wait: Duration) -> DateTime<Utc> {
    chrono::Duration::from_std(wait)
        .ok()
        .and_then(|wait| now.checked_add_signed(wait))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Performs rate-limit waits for the worker pool.
pub struct RateLimitCoordinator {
    backend: Arc<dyn SearchBackend>,
    sleeper: Arc<dyn Sleeper>,
    observer: Arc<dyn ScanObserver>,
    policy: CooldownPolicy,
    /// Published resume time in shared mode. Never held across an await.
    resume_at: Mutex<Option<DateTime<Utc>>>,
}

impl RateLimitCoordinator {
    /// Create a coordinator.
    #[must_use]
    pub fn new(
        backend: Arc<dyn SearchBackend>,
        sleeper: Arc<dyn Sleeper>,
        observer: Arc<dyn ScanObserver>,
        policy: CooldownPolicy,
    ) -> Self {
        Self {
            backend,
            sleeper,
            observer,
            policy,
            resume_at: Mutex::new(None),
        }
    }

    /// The active policy.
    #[must_use]
    pub fn policy(&self) -> CooldownPolicy {
        self.policy
    }

    /// Wait out a rate-limit rejection.
    pub async fn await_reset(&self) {
        if self.policy.mode == CooldownMode::Shared {
            let now = Utc::now();
            if let Some(resume_at) = self.pending_resume(now) {
                let wait = cooldown_duration(resume_at, now, Duration::ZERO);
                self.observer.on_rate_limit_wait(resume_at, wait);
                self.sleeper.sleep(wait).await;
                return;
            }
        }

        let wait = match self.backend.search_reset_at().await {
            Ok(reset) => cooldown_duration(reset, Utc::now(), self.policy.margin),
            Err(e) => {
                warn!(
                    error = %e,
                    fallback_secs = self.policy.fallback.as_secs(),
                    "could not read rate limit status, using fallback wait"
                );
                self.policy.fallback
            }
        };

        let resume_at = resume_time(Utc::now(), wait);
        if self.policy.mode == CooldownMode::Shared {
            self.publish(resume_at);
        }

        self.observer.on_rate_limit_wait(resume_at, wait);
        self.sleeper.sleep(wait).await;
    }

    /// Wait for a shared cooldown, if one is active. No-op per worker.
    pub async fn wait_ready(&self) {
        if self.policy.mode != CooldownMode::Shared {
            return;
        }

        let now = Utc::now();
        if let Some(resume_at) = self.pending_resume(now) {
            let wait = cooldown_duration(resume_at, now, Duration::ZERO);
            debug!(wait_secs = wait.as_secs(), "waiting for shared cooldown");
            self.sleeper.sleep(wait).await;
        }
    }

    fn pending_resume(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let guard = self.resume_at.lock().unwrap_or_else(PoisonError::into_inner);
        (*guard).filter(|resume_at| *resume_at > now)
    }

    fn publish(&self, resume_at: DateTime<Utc>) {
        let mut guard = self.resume_at.lock().unwrap_or_else(PoisonError::into_inner);
        if (*guard).map_or(true, |current| current < resume_at) {
            *guard = Some(resume_at);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::SearchResponse;
    use crate::error::SearchError;
    use crate::events::NoopObserver;
    use crate::sleeper::RecordingSleeper;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StatusBackend {
        reset: Option<DateTime<Utc>>,
        status_calls: AtomicUsize,
    }

    impl StatusBackend {
        fn new(reset: Option<DateTime<Utc>>) -> Self {
            Self {
                reset,
                status_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl SearchBackend for StatusBackend {
        async fn search_code(&self, _query: &str) -> Result<SearchResponse, SearchError> {
            Ok(SearchResponse::default())
        }

        async fn search_reset_at(&self) -> Result<DateTime<Utc>, SearchError> {
            self.status_calls.fetch_add(1, Ordering::SeqCst);
            self.reset.ok_or(SearchError::Api {
                status: 500,
                message: "unavailable".to_string(),
            })
        }
    }

    fn coordinator(
        backend: Arc<StatusBackend>,
        sleeper: Arc<RecordingSleeper>,
        mode: CooldownMode,
    ) -> RateLimitCoordinator {
        RateLimitCoordinator::new(
            backend,
            sleeper,
            Arc::new(NoopObserver),
            CooldownPolicy {
                mode,
                ..CooldownPolicy::default()
            },
        )
    }

    #[test]
    fn test_cooldown_duration() {
        let now = Utc::now();
        let margin = Duration::from_secs(5);

        assert_eq!(
            cooldown_duration(now + chrono::Duration::seconds(10), now, margin),
            Duration::from_secs(15)
        );
        assert_eq!(
            cooldown_duration(now - chrono::Duration::seconds(3), now, margin),
            Duration::from_secs(2)
        );
        assert_eq!(
            cooldown_duration(now - chrono::Duration::seconds(30), now, margin),
            Duration::ZERO
        );
    }

    #[test]
    fn test_cooldown_duration_at_end_of_time() {
        let now = Utc::now();
        let wait = cooldown_duration(DateTime::<Utc>::MAX_UTC, now, Duration::from_secs(5));
        assert!(wait > Duration::from_secs(86_400 * 365 * 1000));
    }

    #[test]
    fn test_resume_time_saturates() {
        let now = Utc::now();
        assert_eq!(resume_time(now, Duration::from_secs(10)), now + chrono::Duration::seconds(10));
        assert_eq!(resume_time(now, Duration::MAX), DateTime::<Utc>::MAX_UTC);
        assert_eq!(
            resume_time(now, Duration::from_secs(1_000_000_000_000_000)),
            DateTime::<Utc>::MAX_UTC
        );
    }

    #[test]
    fn test_policy_from_config() {
        let config = ScanConfig {
            shared_cooldown: true,
            rate_limit_fallback_secs: 90,
            ..ScanConfig::default()
        };
        let policy = CooldownPolicy::from_config(&config);
        assert_eq!(policy.mode, CooldownMode::Shared);
        assert_eq!(policy.fallback, Duration::from_secs(90));
        assert_eq!(policy.margin, Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_waits_until_reset_plus_margin() {
        let backend = Arc::new(StatusBackend::new(Some(Utc::now() + chrono::Duration::seconds(100))));
        let sleeper = Arc::new(RecordingSleeper::new());
        let coordinator = coordinator(backend.clone(), sleeper.clone(), CooldownMode::PerWorker);

        coordinator.await_reset().await;

        let sleeps = sleeper.sleeps();
        assert_eq!(sleeps.len(), 1);
        assert!(sleeps[0] > Duration::from_secs(103) && sleeps[0] <= Duration::from_secs(105));
        assert_eq!(backend.status_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_status_failure_uses_fallback() {
        let backend = Arc::new(StatusBackend::new(None));
        let sleeper = Arc::new(RecordingSleeper::new());
        let coordinator = coordinator(backend, sleeper.clone(), CooldownMode::PerWorker);

        coordinator.await_reset().await;

        assert_eq!(sleeper.sleeps(), vec![Duration::from_secs(60)]);
    }

    #[tokio::test]
    async fn test_huge_fallback_does_not_panic() {
        let backend = Arc::new(StatusBackend::new(None));
        let sleeper = Arc::new(RecordingSleeper::new());
        let fallback = Duration::from_secs(1_000_000_000_000_000);
        let coordinator = RateLimitCoordinator::new(
            backend,
            sleeper.clone(),
            Arc::new(NoopObserver),
            CooldownPolicy {
                fallback,
                mode: CooldownMode::Shared,
                ..CooldownPolicy::default()
            },
        );

        coordinator.await_reset().await;

        assert_eq!(sleeper.sleeps(), vec![fallback]);
        // the published resume time saturates and still gates other workers
        coordinator.wait_ready().await;
        assert_eq!(sleeper.sleeps().len(), 2);
    }

    #[tokio::test]
    async fn test_past_reset_does_not_wait() {
        let backend = Arc::new(StatusBackend::new(Some(Utc::now() - chrono::Duration::seconds(60))));
        let sleeper = Arc::new(RecordingSleeper::new());
        let coordinator = coordinator(backend, sleeper.clone(), CooldownMode::PerWorker);

        coordinator.await_reset().await;

        assert_eq!(sleeper.sleeps(), vec![Duration::ZERO]);
    }

    #[tokio::test]
    async fn test_per_worker_mode_never_gates() {
        let backend = Arc::new(StatusBackend::new(Some(Utc::now() + chrono::Duration::seconds(100))));
        let sleeper = Arc::new(RecordingSleeper::new());
        let coordinator = coordinator(backend.clone(), sleeper.clone(), CooldownMode::PerWorker);

        coordinator.await_reset().await;
        coordinator.await_reset().await;
        coordinator.wait_ready().await;

        // each rejection looks up the reset itself
        assert_eq!(backend.status_calls.load(Ordering::SeqCst), 2);
        assert_eq!(sleeper.sleeps().len(), 2);
    }

    #[tokio::test]
    async fn test_shared_mode_reuses_published_reset() {
        let backend = Arc::new(StatusBackend::new(Some(Utc::now() + chrono::Duration::seconds(100))));
        let sleeper = Arc::new(RecordingSleeper::new());
        let coordinator = coordinator(backend.clone(), sleeper.clone(), CooldownMode::Shared);

        coordinator.wait_ready().await;
        assert!(sleeper.sleeps().is_empty());

        coordinator.await_reset().await;
        coordinator.await_reset().await;
        coordinator.wait_ready().await;

        assert_eq!(backend.status_calls.load(Ordering::SeqCst), 1);
        let sleeps = sleeper.sleeps();
        assert_eq!(sleeps.len(), 3);
        assert!(sleeps.iter().all(|d| *d > Duration::from_secs(100)));
    }
}
