//! Pattern selection: severity, then include, then exclude.
//!
//! Every stage preserves catalog order. Substring matching is
//! case-insensitive over a pattern's text, category, and description.
//! Substrings are used as given, surrounding whitespace included. Empty
//! substrings are ignored.

use crate::definition::Pattern;
use dighub_core::SeverityFilter;
use std::sync::Arc;

/// Keep patterns accepted by `severity`.
#[must_use]
pub fn filter_by_severity(patterns: &[Arc<Pattern>], severity: SeverityFilter) -> Vec<Arc<Pattern>> {
    patterns
        .iter()
        .filter(|p| severity.accepts(p.severity))
        .cloned()
        .collect()
}

/// Keep patterns that mention ANY of `substrings`. An empty list keeps everything.
#[must_use]
pub fn filter_by_include(patterns: &[Arc<Pattern>], substrings: &[String]) -> Vec<Arc<Pattern>> {
    let needles = normalize(substrings);
    if needles.is_empty() {
        return patterns.to_vec();
    }

    patterns
        .iter()
        .filter(|p| needles.iter().any(|n| p.mentions(n)))
        .cloned()
        .collect()
}

/// Drop patterns that mention ANY of `substrings`. An empty list drops nothing.
#[must_use]
pub fn filter_by_exclude(patterns: &[Arc<Pattern>], substrings: &[String]) -> Vec<Arc<Pattern>> {
    let needles = normalize(substrings);
    if needles.is_empty() {
        return patterns.to_vec();
    }

    patterns
        .iter()
        .filter(|p| !needles.iter().any(|n| p.mentions(n)))
        .cloned()
        .collect()
}

fn normalize(substrings: &[String]) -> Vec<String> {
    substrings
        .iter()
        .map(|s| s.to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// The composed filter applied before a scan.
#[derive(Debug, Clone, Default)]
pub struct PatternFilter {
    /// Severity selection
    pub severity: SeverityFilter,
    /// Include substrings
    pub include: Vec<String>,
    /// Exclude substrings
    pub exclude: Vec<String>,
}

impl PatternFilter {
    /// Apply severity, include, and exclude in that order.
    #[must_use]
    pub fn apply(&self, patterns: &[Arc<Pattern>]) -> Vec<Arc<Pattern>> {
        let selected = filter_by_severity(patterns, self.severity);
        let selected = filter_by_include(&selected, &self.include);
        filter_by_exclude(&selected, &self.exclude)
    }
}
