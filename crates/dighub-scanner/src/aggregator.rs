//! Result aggregation.

use crate::model::{Match, ScanResult, SeverityCounts};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::time::Duration;

/// Summarize collected matches into a [`ScanResult`].
#[must_use]
pub fn summarize(
    matches: Vec<Match>,
    patterns_scanned: usize,
    duration: Duration,
    target: &str,
    scan_started_at: DateTime<Utc>,
) -> ScanResult {
    let mut severity_counts = SeverityCounts::default();
    let mut files = HashSet::new();

    for m in &matches {
        severity_counts.record(m.severity());
        files.insert((m.repository.as_str(), m.path.as_str()));
    }
    let unique_files = files.len();

    ScanResult {
        target: target.to_string(),
        total_patterns_scanned: patterns_scanned,
        total_matches: matches.len(),
        unique_files,
        severity_counts,
        duration,
        scan_started_at,
        output_file: None,
        matches,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dighub_core::Severity;
    use dighub_dorks::Pattern;
    use std::sync::Arc;

    fn hit(pattern: &Arc<Pattern>, repo: &str, path: &str) -> Match {
        Match {
            pattern: Arc::clone(pattern),
            url: format!("https://github.com/{repo}/blob/main/{path}"),
            repository: repo.to_string(),
            path: path.to_string(),
            score: 1.0,
            observed_at: Utc::now(),
        }
    }

    #[test]
    fn test_summarize_counts() {
        let high = Arc::new(Pattern::new("A", Severity::High, "", ""));
        let low = Arc::new(Pattern::new("B", Severity::Low, "", ""));

        let matches = vec![
            hit(&high, "acme/x", "f1"),
            hit(&high, "acme/y", "f2"),
            hit(&low, "acme/x", "f1"),
        ];

        let result = summarize(matches, 2, Duration::from_secs(4), "acme", Utc::now());

        assert_eq!(result.total_patterns_scanned, 2);
        assert_eq!(result.total_matches, 3);
        assert_eq!(result.unique_files, 2);
        assert_eq!(result.severity_counts, SeverityCounts { high: 2, medium: 0, low: 1 });
        assert_eq!(result.severity_counts.total(), result.total_matches);
        assert_eq!(result.matches_with(Severity::High).count(), 2);
        assert_eq!(result.target, "acme");
    }

    #[test]
    fn test_same_path_in_different_repos_is_distinct() {
        let p = Arc::new(Pattern::new("A", Severity::Medium, "", ""));
        let matches = vec![hit(&p, "acme/x", ".env"), hit(&p, "acme/y", ".env")];

        let result = summarize(matches, 1, Duration::ZERO, "acme", Utc::now());
        assert_eq!(result.unique_files, 2);
    }

    #[test]
    fn test_summarize_is_deterministic() {
        let p = Arc::new(Pattern::new("A", Severity::High, "", ""));
        let matches = vec![hit(&p, "acme/x", "f1"), hit(&p, "acme/x", "f1")];
        let started_at = Utc::now();

        let first = summarize(matches.clone(), 1, Duration::from_secs(1), "acme", started_at);
        let second = summarize(matches, 1, Duration::from_secs(1), "acme", started_at);
        assert_eq!(first, second);
        assert_eq!(first.unique_files, 1);
    }

    #[test]
    fn test_summarize_empty() {
        let result = summarize(Vec::new(), 5, Duration::ZERO, "acme", Utc::now());
        assert_eq!(result.total_patterns_scanned, 5);
        assert_eq!(result.total_matches, 0);
        assert_eq!(result.unique_files, 0);
        assert_eq!(result.severity_counts.total(), 0);
    }
}
