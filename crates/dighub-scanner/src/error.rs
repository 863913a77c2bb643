//! Error types for the scanner.

use dighub_core::ConfigError;
use thiserror::Error;

/// Failure of a single search or rate-limit status request.
///
/// Every variant except [`SearchError::RateLimited`] is transient from the
/// scanner's point of view: it is retried a bounded number of times and
/// never aborts a scan.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The API rejected the search for rate limiting
    #[error("search rate limit exceeded")]
    RateLimited,

    /// Any other non-success API response
    #[error("GitHub API error {status}: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },

    /// Transport failure
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Unparseable response body
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// HTTP client construction failed
    #[error("HTTP client error: {0}")]
    Client(String),
}

impl SearchError {
    /// Whether this is the remote API's rate-limit rejection.
    #[must_use]
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, Self::RateLimited)
    }
}

/// Errors that prevent a scan from starting.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Filters left nothing to scan
    #[error("no patterns match the specified filters")]
    NoPatternsSelected,

    /// Invalid configuration
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The search client could not be built
    #[error("search client error: {0}")]
    Client(#[from] SearchError),
}

/// Result type for scan operations
pub type Result<T> = std::result::Result<T, ScanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SearchError::Api {
            status: 422,
            message: "Validation Failed".to_string(),
        };
        assert_eq!(err.to_string(), "GitHub API error 422: Validation Failed");
        assert!(!err.is_rate_limit());
        assert!(SearchError::RateLimited.is_rate_limit());

        assert_eq!(
            ScanError::NoPatternsSelected.to_string(),
            "no patterns match the specified filters"
        );
    }
}
