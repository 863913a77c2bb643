//! GitHub code-search client.
//!
//! [`SearchBackend`] is the seam between the scanning engine and the remote
//! API. [`GitHubClient`] is the real implementation; tests substitute stubs.

use crate::error::SearchError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dighub_core::{Credential, GithubConfig};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Media type requested from the API.
const ACCEPT: &str = "application/vnd.github+json";

/// Code-search response body. Only the fields the scanner reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    /// Total hits reported by the API
    #[serde(default)]
    pub total_count: u64,
    /// Hits on this page
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

/// One code-search hit.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchItem {
    /// File name
    #[serde(default)]
    pub name: String,
    /// Path within the repository
    pub path: String,
    /// Browser URL of the file
    pub html_url: String,
    /// Owning repository
    pub repository: RepositoryRef,
    /// Relevance score
    #[serde(default)]
    pub score: f64,
}

/// Repository reference inside a search hit.
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryRef {
    /// `owner/name`
    pub full_name: String,
}

#[derive(Debug, Deserialize)]
struct RateLimitStatus {
    resources: RateLimitResources,
}

#[derive(Debug, Deserialize)]
struct RateLimitResources {
    search: RateLimitWindow,
}

#[derive(Debug, Deserialize)]
struct RateLimitWindow {
    reset: i64,
}

/// Remote code-search capability.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Run one code search, first page only.
    async fn search_code(&self, query: &str) -> Result<SearchResponse, SearchError>;

    /// When the search rate-limit window resets.
    async fn search_reset_at(&self) -> Result<DateTime<Utc>, SearchError>;
}

/// Authenticated GitHub REST client.
pub struct GitHubClient {
    client: Client,
    credential: Credential,
    base_url: String,
    api_version: String,
    per_page: u32,
}

impl GitHubClient {
    /// Create a client from the `[github]` configuration section.
    pub fn new(credential: Credential, config: &GithubConfig) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| SearchError::Client(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            credential,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            api_version: config.api_version.clone(),
            per_page: config.per_page,
        })
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.client
            .get(format!("{}{path}", self.base_url))
            .header("Authorization", format!("token {}", self.credential.expose()))
            .header("Accept", ACCEPT)
            .header("X-GitHub-Api-Version", &self.api_version)
    }
}

#[async_trait]
impl SearchBackend for GitHubClient {
    async fn search_code(&self, query: &str) -> Result<SearchResponse, SearchError> {
        debug!(query, "GET /search/code");

        let per_page = self.per_page.to_string();
        let response = self
            .get("/search/code")
            .query(&[("q", query), ("per_page", per_page.as_str())])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        classify_search_response(status, &body)
    }

    async fn search_reset_at(&self) -> Result<DateTime<Utc>, SearchError> {
        let response = self.get("/rate_limit").send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SearchError::Api {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let body = response.text().await?;
        parse_reset_at(&body)
    }
}

/// Map a search status and body to a response or error.
///
/// A 403 whose body mentions "rate limit" is the rate-limit signal; every
/// other non-200 is a generic API failure.
pub fn classify_search_response(status: StatusCode, body: &str) -> Result<SearchResponse, SearchError> {
    if status == StatusCode::OK {
        return serde_json::from_str(body).map_err(|e| SearchError::Decode(e.to_string()));
    }

    if status == StatusCode::FORBIDDEN && body.contains("rate limit") {
        return Err(SearchError::RateLimited);
    }

    Err(SearchError::Api {
        status: status.as_u16(),
        message: body.to_string(),
    })
}

fn parse_reset_at(body: &str) -> Result<DateTime<Utc>, SearchError> {
    let status: RateLimitStatus =
        serde_json::from_str(body).map_err(|e| SearchError::Decode(e.to_string()))?;

    DateTime::from_timestamp(status.resources.search.reset, 0)
        .ok_or_else(|| SearchError::Decode(format!("reset out of range: {}", status.resources.search.reset)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_ok() {
        let body = r#"{
            "total_count": 1,
            "items": [{
                "name": "config.yml",
                "path": "deploy/config.yml",
                "html_url": "https://github.com/acme/app/blob/main/deploy/config.yml",
                "repository": { "full_name": "acme/app" },
                "score": 1.5
            }]
        }"#;

        let response = classify_search_response(StatusCode::OK, body).expect("valid response");
        assert_eq!(response.total_count, 1);
        assert_eq!(response.items[0].repository.full_name, "acme/app");
        assert!((response.items[0].score - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_classify_rate_limited() {
        let body = r#"{"message":"API rate limit exceeded for user ID 1."}"#;
        let err = classify_search_response(StatusCode::FORBIDDEN, body).expect_err("rate limited");
        assert!(err.is_rate_limit());
    }

    #[test]
    fn test_rate_limit_match_is_case_sensitive() {
        let err = classify_search_response(StatusCode::FORBIDDEN, "Rate Limit").expect_err("forbidden");
        assert!(!err.is_rate_limit());
    }

    #[test]
    fn test_classify_other_forbidden_is_generic() {
        let err = classify_search_response(StatusCode::FORBIDDEN, "Resource not accessible")
            .expect_err("forbidden");
        assert!(matches!(err, SearchError::Api { status: 403, .. }));
    }

    #[test]
    fn test_classify_server_error() {
        let err = classify_search_response(StatusCode::BAD_GATEWAY, "upstream").expect_err("502");
        assert!(matches!(err, SearchError::Api { status: 502, .. }));
    }

    #[test]
    fn test_classify_malformed_body() {
        let err = classify_search_response(StatusCode::OK, "not json").expect_err("decode");
        assert!(matches!(err, SearchError::Decode(_)));
    }

    #[test]
    fn test_parse_reset_at() {
        let body = r#"{"resources":{"core":{"reset":1},"search":{"limit":30,"remaining":0,"reset":1700000000}}}"#;
        let reset = parse_reset_at(body).expect("parse reset");
        assert_eq!(reset.timestamp(), 1_700_000_000);

        assert!(matches!(parse_reset_at(r#"{"resources":{}}"#), Err(SearchError::Decode(_))));
    }
}
