//! Ordered, immutable pattern catalog.

use crate::builtin::BUILTIN_PATTERNS;
use crate::definition::Pattern;
use crate::error::{PatternError, Result};
use dighub_core::Severity;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;

/// Ordered collection of patterns with unique texts.
///
/// Patterns are handed out as `Arc<Pattern>` so matches can share them
/// without copying.
#[derive(Debug, Clone, Default)]
pub struct PatternCatalog {
    patterns: Vec<Arc<Pattern>>,
}

impl PatternCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in catalog.
    #[must_use]
    pub fn builtin() -> Self {
        let patterns = BUILTIN_PATTERNS
            .iter()
            .map(|(text, severity, category, description)| {
                Arc::new(Pattern::new(*text, *severity, *category, *description))
            })
            .collect();
        Self { patterns }
    }

    /// Build a catalog from patterns, validating each one.
    ///
    /// # Errors
    /// Returns error if a pattern is invalid or its text appears twice.
    pub fn from_patterns(patterns: Vec<Pattern>) -> Result<Self> {
        let mut catalog = Self::new();
        catalog.extend(patterns)?;
        Ok(catalog)
    }

    /// Append patterns after the existing ones.
    ///
    /// # Errors
    /// Returns error if a pattern is invalid or its text is already present.
    pub fn extend(&mut self, patterns: Vec<Pattern>) -> Result<()> {
        let mut seen: HashSet<String> = self.patterns.iter().map(|p| p.text.clone()).collect();

        for pattern in &patterns {
            pattern.validate()?;
            if !seen.insert(pattern.text.clone()) {
                return Err(PatternError::ValidationError {
                    text: pattern.text.clone(),
                    reason: "duplicate pattern text".to_string(),
                });
            }
        }

        let added = patterns.len();
        self.patterns.extend(patterns.into_iter().map(Arc::new));
        debug!(added, total = self.patterns.len(), "extended pattern catalog");
        Ok(())
    }

    /// All patterns in catalog order.
    #[must_use]
    pub fn list(&self) -> Vec<Arc<Pattern>> {
        self.patterns.clone()
    }

    /// Number of patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the catalog has no patterns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Pattern count by severity.
    #[must_use]
    pub fn count_by_severity(&self) -> HashMap<Severity, usize> {
        let mut counts: HashMap<Severity, usize> = HashMap::new();
        for pattern in &self.patterns {
            *counts.entry(pattern.severity).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let catalog = PatternCatalog::builtin();
        assert_eq!(catalog.len(), 106);

        let counts = catalog.count_by_severity();
        assert_eq!(counts[&Severity::High], 28);
        assert_eq!(counts[&Severity::Medium], 42);
        assert_eq!(counts[&Severity::Low], 36);

        let first = &catalog.list()[0];
        assert_eq!(first.text, "AWS_ACCESS_KEY_ID");
        assert_eq!(first.category, "AWS");
    }

    #[test]
    fn test_builtin_texts_unique_and_valid() {
        let catalog = PatternCatalog::builtin();
        let patterns: Vec<Pattern> = catalog.list().iter().map(|p| (**p).clone()).collect();
        let rebuilt = PatternCatalog::from_patterns(patterns).expect("builtin catalog is valid");
        assert_eq!(rebuilt.len(), catalog.len());
    }

    #[test]
    fn test_extend_rejects_duplicates() {
        let mut catalog = PatternCatalog::builtin();
        let result = catalog.extend(vec![Pattern::new("ghp_", Severity::High, "GitHub", "dup")]);
        assert!(matches!(result, Err(PatternError::ValidationError { .. })));
        assert_eq!(catalog.len(), 106);
    }

    #[test]
    fn test_extend_appends_in_order() {
        let mut catalog = PatternCatalog::new();
        catalog
            .extend(vec![
                Pattern::new("A", Severity::High, "", ""),
                Pattern::new("B", Severity::Low, "", ""),
            ])
            .expect("extend catalog");

        let texts: Vec<_> = catalog.list().iter().map(|p| p.text.clone()).collect();
        assert_eq!(texts, vec!["A", "B"]);
    }
}
