//! Pattern pack loading from TOML files.
//!
//! A pack is a list of `[[pattern]]` tables:
//!
//! ```toml
//! [[pattern]]
//! text = "filename:.env INTERNAL_API_TOKEN"
//! severity = "high"
//! category = "Internal"
//! description = "Internal API token in .env"
//! ```

use crate::{
    definition::Pattern,
    error::{PatternError, Result},
};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

#[derive(Debug, Deserialize)]
struct PatternPack {
    #[serde(default, rename = "pattern")]
    patterns: Vec<Pattern>,
}

/// Loader for TOML pattern packs.
pub struct PatternLoader;

impl PatternLoader {
    /// Load every pattern from a pack file, validating each.
    ///
    /// # Errors
    /// Returns error if the file is missing, unreadable, not valid TOML,
    /// or contains an invalid pattern.
    pub fn load_file(path: &Path) -> Result<Vec<Pattern>> {
        if !path.is_file() {
            return Err(PatternError::NotFound {
                path: path.display().to_string(),
            });
        }

        let contents = std::fs::read_to_string(path)?;
        let patterns = Self::parse(&contents, &path.display().to_string())?;

        info!(
            count = patterns.len(),
            path = %path.display(),
            "loaded pattern pack"
        );

        Ok(patterns)
    }

    /// Parse pack contents. `origin` names the source in errors.
    pub fn parse(contents: &str, origin: &str) -> Result<Vec<Pattern>> {
        let pack: PatternPack = toml::from_str(contents).map_err(|source| PatternError::ParseError {
            path: origin.to_string(),
            source,
        })?;

        for pattern in &pack.patterns {
            pattern.validate()?;
        }

        Ok(pack.patterns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dighub_core::Severity;
    use tempfile::TempDir;

    const PACK: &str = r#"
[[pattern]]
text = "filename:.env INTERNAL_TOKEN"
severity = "high"
category = "Internal"
description = "Internal token"

[[pattern]]
text = "extension:cfg passwd"
severity = "low"
"#;

    #[test]
    fn test_parse_pack() {
        let patterns = PatternLoader::parse(PACK, "inline").expect("parse pack");
        assert_eq!(patterns.len(), 2);
        assert_eq!(patterns[0].severity, Severity::High);
        assert_eq!(patterns[0].category, "Internal");
        assert_eq!(patterns[1].description, "");
    }

    #[test]
    fn test_load_file() {
        let tmp = TempDir::new().expect("create temp dir");
        let path = tmp.path().join("pack.toml");
        std::fs::write(&path, PACK).expect("write pack");

        let patterns = PatternLoader::load_file(&path).expect("load pack");
        assert_eq!(patterns.len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let tmp = TempDir::new().expect("create temp dir");
        let result = PatternLoader::load_file(&tmp.path().join("missing.toml"));
        assert!(matches!(result, Err(PatternError::NotFound { .. })));
    }

    #[test]
    fn test_parse_invalid_severity() {
        let bad = "[[pattern]]\ntext = \"x\"\nseverity = \"urgent\"\n";
        let result = PatternLoader::parse(bad, "inline");
        assert!(matches!(result, Err(PatternError::ParseError { .. })));
    }

    #[test]
    fn test_parse_empty_text() {
        let bad = "[[pattern]]\ntext = \"\"\nseverity = \"low\"\n";
        let result = PatternLoader::parse(bad, "inline");
        assert!(matches!(result, Err(PatternError::ValidationError { .. })));
    }
}
