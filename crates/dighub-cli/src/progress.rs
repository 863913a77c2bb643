//! Progress bar driven by scan events.

use chrono::{DateTime, Utc};
use dighub_dorks::Pattern;
use dighub_scanner::{Match, ScanObserver, SearchError, TracingObserver};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

/// Observer that advances a progress bar and logs through [`TracingObserver`].
pub struct ProgressObserver {
    bar: ProgressBar,
    log: TracingObserver,
}

impl ProgressObserver {
    /// Create an observer for `total` patterns. A hidden bar draws nothing.
    #[must_use]
    pub fn new(total: usize, visible: bool) -> Self {
        let bar = if visible {
            create_progress_bar(total)
        } else {
            ProgressBar::with_draw_target(Some(total as u64), ProgressDrawTarget::hidden())
        };

        Self {
            bar,
            log: TracingObserver,
        }
    }

    /// Finish and clear the bar.
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    /// Run `f` with the bar suspended so log lines are not torn.
    fn suspend(&self, f: impl FnOnce()) {
        self.bar.suspend(f);
    }
}

fn create_progress_bar(total: usize) -> ProgressBar {
    let bar = ProgressBar::new(total as u64);
    let style = ProgressStyle::with_template(
        "Scanning dorks {bar:40.cyan/blue} {pos:>4}/{len:4} ({percent:>3}%) [{elapsed_precise}]",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("=> ");
    bar.set_style(style);
    bar
}

impl ScanObserver for ProgressObserver {
    fn on_query(&self, pattern: &Pattern, query: &str) {
        self.log.on_query(pattern, query);
    }

    fn on_match(&self, pattern: &Pattern, matches: &[Match]) {
        self.suspend(|| self.log.on_match(pattern, matches));
    }

    fn on_no_match(&self, pattern: &Pattern) {
        self.log.on_no_match(pattern);
    }

    fn on_attempt_failed(&self, pattern: &Pattern, attempt: u32, max_attempts: u32, error: &SearchError) {
        self.suspend(|| self.log.on_attempt_failed(pattern, attempt, max_attempts, error));
    }

    fn on_pattern_abandoned(&self, pattern: &Pattern, error: &SearchError) {
        self.suspend(|| self.log.on_pattern_abandoned(pattern, error));
    }

    fn on_rate_limit_wait(&self, resume_at: DateTime<Utc>, wait: Duration) {
        self.suspend(|| self.log.on_rate_limit_wait(resume_at, wait));
    }

    fn on_progress(&self, _completed: usize, _total: usize) {
        self.bar.inc(1);
    }
}
