//! Search pattern type.
//!
//! A pattern ("dork") is a code-search query fragment that surfaces one class
//! of exposed secret or sensitive file. Patterns are immutable and identified
//! by their `text`.

use crate::error::{PatternError, Result};
use dighub_core::Severity;
use serde::{Deserialize, Serialize};

/// A single search pattern with its classification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pattern {
    /// Raw query fragment, appended verbatim after the target qualifier
    pub text: String,
    /// Risk classification
    pub severity: Severity,
    /// Human-readable description
    #[serde(default)]
    pub description: String,
    /// Grouping label, e.g. `AWS` or `Webhooks`
    #[serde(default)]
    pub category: String,
}

impl Pattern {
    /// Create a new pattern.
    pub fn new(
        text: impl Into<String>,
        severity: Severity,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            severity,
            description: description.into(),
            category: category.into(),
        }
    }

    /// Whether `needle` occurs, case-insensitively, in the text, category,
    /// or description. `needle` must already be lowercase.
    pub(crate) fn mentions(&self, needle: &str) -> bool {
        self.text.to_lowercase().contains(needle)
            || self.category.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }

    /// Validate the pattern for use in a search query.
    pub fn validate(&self) -> Result<()> {
        if self.text.trim().is_empty() {
            return Err(PatternError::ValidationError {
                text: self.text.clone(),
                reason: "pattern text cannot be empty".to_string(),
            });
        }

        if self.text.contains('\n') {
            return Err(PatternError::ValidationError {
                text: self.text.clone(),
                reason: "pattern text must be a single line".to_string(),
            });
        }

        Ok(())
    }
}
