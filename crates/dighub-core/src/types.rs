//! Shared types used across dighub.
//!
//! This module defines common newtypes and enums that provide type safety
//! and clear domain modeling.

use crate::error::DighubError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use zeroize::Zeroizing;

/// Risk classification of a search pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Credentials and private keys
    High,
    /// Webhooks and sensitive configuration
    Medium,
    /// General configuration files
    Low,
}

impl Severity {
    /// All severities, most severe first.
    pub const ALL: [Severity; 3] = [Severity::High, Severity::Medium, Severity::Low];

    /// Lowercase identifier as used in config files and CLI flags.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Uppercase label for reports.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = DighubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            other => Err(DighubError::Validation(format!(
                "invalid severity '{other}' (valid: high, medium, low)"
            ))),
        }
    }
}

/// Severity selection applied to the pattern catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SeverityFilter {
    /// Keep every pattern
    #[default]
    All,
    /// Keep only patterns of one severity
    Only(Severity),
}

impl SeverityFilter {
    /// Whether a pattern with `severity` passes this filter.
    #[must_use]
    pub fn accepts(&self, severity: Severity) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == severity,
        }
    }
}

impl FromStr for SeverityFilter {
    type Err = DighubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse::<Severity>().map(Self::Only).map_err(|_| {
            DighubError::Validation(format!(
                "invalid priority '{s}' (valid: all, high, medium, low)"
            ))
        })
    }
}

impl fmt::Display for SeverityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(severity) => write!(f, "{severity}"),
        }
    }
}

/// Whether the scan target is an organization or a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    /// GitHub organization (`org:` qualifier)
    Organization,
    /// GitHub user (`user:` qualifier)
    User,
}

impl TargetKind {
    /// The search qualifier keyword for this kind.
    #[must_use]
    pub fn qualifier(&self) -> &'static str {
        match self {
            Self::Organization => "org",
            Self::User => "user",
        }
    }
}

/// The account whose repositories are scanned.
///
/// Names must be valid GitHub logins: alphanumeric with hyphens,
/// starting with an alphanumeric character, at most 39 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Target {
    kind: TargetKind,
    name: String,
}

impl Target {
    /// Create a new `Target`.
    ///
    /// # Errors
    /// Returns error if the name is not a valid GitHub login.
    pub fn new(kind: TargetKind, name: impl Into<String>) -> Result<Self, DighubError> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(Self { kind, name })
    }

    /// Target kind.
    #[must_use]
    pub fn kind(&self) -> TargetKind {
        self.kind
    }

    /// Account name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Search scope qualifier, e.g. `org:acme`.
    #[must_use]
    pub fn qualifier(&self) -> String {
        format!("{}:{}", self.kind.qualifier(), self.name)
    }

    fn validate(name: &str) -> Result<(), DighubError> {
        static LOGIN_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = LOGIN_REGEX.get_or_init(|| {
            Regex::new(r"^[A-Za-z0-9][A-Za-z0-9-]{0,38}$").expect("valid regex")
        });

        if name.is_empty() {
            return Err(DighubError::Validation(
                "invalid target: name must not be empty".to_string(),
            ));
        }

        if regex.is_match(name) {
            Ok(())
        } else {
            Err(DighubError::Validation(format!(
                "invalid target: '{name}' is not a valid GitHub login"
            )))
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// GitHub API token.
///
/// The secret is zeroed on drop and never printed by `Debug`.
#[derive(Clone)]
pub struct Credential(Zeroizing<String>);

impl Credential {
    /// Create a new `Credential` from a GitHub token.
    ///
    /// # Errors
    /// Returns error unless the token starts with `ghp_`, `gho_`, `ghu_`, or `ghs_`.
    pub fn new(token: impl Into<String>) -> Result<Self, DighubError> {
        let token = Zeroizing::new(token.into());
        Self::validate(&token)?;
        Ok(Self(token))
    }

    /// Expose the raw token for building request headers.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    fn validate(token: &str) -> Result<(), DighubError> {
        static TOKEN_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = TOKEN_REGEX.get_or_init(|| Regex::new(r"^gh[pous]_\S+$").expect("valid regex"));

        if regex.is_match(token) {
            Ok(())
        } else {
            Err(DighubError::Validation(
                "invalid GitHub token format (must start with ghp_, gho_, ghu_, or ghs_)"
                    .to_string(),
            ))
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Output renderer selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable terminal listing
    #[default]
    Terminal,
    /// JSON report file
    Json,
    /// CSV report file
    Csv,
    /// Standalone HTML report file
    Html,
}

impl OutputFormat {
    /// File extension for file-based formats, `None` for the terminal.
    #[must_use]
    pub fn extension(&self) -> Option<&'static str> {
        match self {
            Self::Terminal => None,
            Self::Json => Some("json"),
            Self::Csv => Some("csv"),
            Self::Html => Some("html"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = DighubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "terminal" => Ok(Self::Terminal),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "html" => Ok(Self::Html),
            other => Err(DighubError::Validation(format!(
                "invalid output format: {other} (valid: terminal, json, csv, html)"
            ))),
        }
    }
}
