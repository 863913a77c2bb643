//! Scan output types.

use chrono::{DateTime, Utc};
use dighub_core::Severity;
use dighub_dorks::Pattern;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// One search hit: a file that matched a pattern.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Match {
    /// The pattern that produced this hit
    pub pattern: Arc<Pattern>,
    /// Browser URL of the file
    pub url: String,
    /// Full repository name, `owner/name`
    pub repository: String,
    /// File path within the repository
    pub path: String,
    /// Relevance score reported by the search API
    pub score: f64,
    /// When the hit was recorded
    pub observed_at: DateTime<Utc>,
}

impl Match {
    /// Severity of the producing pattern.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.pattern.severity
    }
}

/// Matches per severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeverityCounts {
    /// HIGH matches
    pub high: usize,
    /// MEDIUM matches
    pub medium: usize,
    /// LOW matches
    pub low: usize,
}

impl SeverityCounts {
    /// Count for one severity.
    #[must_use]
    pub fn get(&self, severity: Severity) -> usize {
        match severity {
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
        }
    }

    pub(crate) fn record(&mut self, severity: Severity) {
        match severity {
            Severity::High => self.high += 1,
            Severity::Medium => self.medium += 1,
            Severity::Low => self.low += 1,
        }
    }

    /// Sum across severities.
    #[must_use]
    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }
}

/// Aggregated outcome of one scan.
///
/// `total_matches` always equals `matches.len()` and the severity counts
/// sum to it.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanResult {
    /// Target login that was scanned
    pub target: String,
    /// Every hit, in collection order
    pub matches: Vec<Match>,
    /// Patterns dispatched, including ones that produced nothing
    pub total_patterns_scanned: usize,
    /// Number of hits
    pub total_matches: usize,
    /// Distinct (repository, path) pairs
    pub unique_files: usize,
    /// Hits per severity
    pub severity_counts: SeverityCounts,
    /// Wall time of the scan
    pub duration: Duration,
    /// When the scan started
    pub scan_started_at: DateTime<Utc>,
    /// Where a rendered report was written, if anywhere
    pub output_file: Option<PathBuf>,
}

impl ScanResult {
    /// Matches of one severity, in collection order.
    pub fn matches_with(&self, severity: Severity) -> impl Iterator<Item = &Match> {
        self.matches.iter().filter(move |m| m.severity() == severity)
    }
}
