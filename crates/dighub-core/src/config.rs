//! Configuration management for dighub.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides. Command-line flags are applied on top by
//! the binary.

use crate::error::{ConfigError, ConfigResult};
use crate::types::{OutputFormat, SeverityFilter};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Inclusive bounds for `scan.workers`.
pub const WORKERS_RANGE: (usize, usize) = (1, 20);
/// Inclusive bounds for `scan.delay_secs`.
pub const DELAY_RANGE: (u64, u64) = (0, 10);
/// Inclusive bounds for `scan.requests_per_minute`.
pub const REQUESTS_PER_MINUTE_RANGE: (u32, u32) = (1, 60);
/// Inclusive bounds for `scan.rate_limit_fallback_secs`.
pub const RATE_LIMIT_FALLBACK_RANGE: (u64, u64) = (1, 3600);
/// Inclusive bounds for `scan.reset_margin_secs`.
pub const RESET_MARGIN_RANGE: (u64, u64) = (0, 300);

/// Main application configuration.
///
/// This is loaded from `~/.config/dighub/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// GitHub API settings
    pub github: GithubConfig,
    /// Scan scheduling settings
    pub scan: ScanConfig,
    /// Pattern selection
    pub filter: FilterConfig,
    /// Report output
    pub output: OutputConfig,
}

impl AppConfig {
    /// Load configuration from the default path, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit path. The file must exist.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }

        tracing::debug!("Loading config from {}", path.display());
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Reads `explicit` when given, otherwise the default path.
    ///
    /// Supports the following environment variables:
    /// - `DIGHUB_WORKERS`: Override worker count
    /// - `DIGHUB_DELAY_SECS`: Override per-request delay
    /// - `DIGHUB_API_URL`: Override the GitHub API base URL
    /// - `DIGHUB_SHARED_COOLDOWN`: Override cooldown coordination (true/false)
    pub fn load_with_env(explicit: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match explicit {
            Some(path) => Self::load_from(path)?,
            None => Self::load()?,
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply overrides from an environment lookup function.
    ///
    /// Values that fail to parse are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(workers) = lookup("DIGHUB_WORKERS").and_then(|v| v.parse().ok()) {
            self.scan.workers = workers;
            tracing::debug!("Override scan.workers from env: {}", workers);
        }

        if let Some(delay) = lookup("DIGHUB_DELAY_SECS").and_then(|v| v.parse().ok()) {
            self.scan.delay_secs = delay;
            tracing::debug!("Override scan.delay_secs from env: {}", delay);
        }

        if let Some(url) = lookup("DIGHUB_API_URL") {
            tracing::debug!("Override github.api_url from env: {}", url);
            self.github.api_url = url;
        }

        if let Some(shared) = lookup("DIGHUB_SHARED_COOLDOWN").and_then(|v| v.parse().ok()) {
            self.scan.shared_cooldown = shared;
            tracing::debug!("Override scan.shared_cooldown from env: {}", shared);
        }
    }

    /// Save configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        let config_dir = path.parent().ok_or_else(|| {
            ConfigError::invalid("config_path", "no parent directory")
        })?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/dighub/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs = ProjectDirs::from("com", "dighub", "dighub").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Check every value against its allowed range.
    pub fn validate(&self) -> ConfigResult<()> {
        let (min, max) = WORKERS_RANGE;
        if !(min..=max).contains(&self.scan.workers) {
            return Err(ConfigError::invalid(
                "scan.workers",
                format!("workers must be between {min} and {max}"),
            ));
        }

        let (min, max) = REQUESTS_PER_MINUTE_RANGE;
        if !(min..=max).contains(&self.scan.requests_per_minute) {
            return Err(ConfigError::invalid(
                "scan.requests_per_minute",
                format!("rate-limit must be between {min} and {max}"),
            ));
        }

        let (min, max) = DELAY_RANGE;
        if !(min..=max).contains(&self.scan.delay_secs) {
            return Err(ConfigError::invalid(
                "scan.delay_secs",
                format!("delay must be between {min} and {max} seconds"),
            ));
        }

        let (min, max) = RATE_LIMIT_FALLBACK_RANGE;
        if !(min..=max).contains(&self.scan.rate_limit_fallback_secs) {
            return Err(ConfigError::invalid(
                "scan.rate_limit_fallback_secs",
                format!("fallback wait must be between {min} and {max} seconds"),
            ));
        }

        let (min, max) = RESET_MARGIN_RANGE;
        if !(min..=max).contains(&self.scan.reset_margin_secs) {
            return Err(ConfigError::invalid(
                "scan.reset_margin_secs",
                format!("reset margin must be between {min} and {max} seconds"),
            ));
        }

        if self.scan.max_attempts == 0 {
            return Err(ConfigError::invalid(
                "scan.max_attempts",
                "at least one attempt is required",
            ));
        }

        if self.github.api_url.trim().is_empty() {
            return Err(ConfigError::invalid("github.api_url", "must not be empty"));
        }

        if self.github.per_page == 0 || self.github.per_page > 100 {
            return Err(ConfigError::invalid(
                "github.per_page",
                "must be between 1 and 100",
            ));
        }

        self.filter.severity_filter()?;
        Ok(())
    }

    /// Output file to write, defaulting to `./dighub-results.<ext>` for file formats.
    #[must_use]
    pub fn output_file(&self) -> Option<PathBuf> {
        if let Some(file) = &self.output.file {
            return Some(file.clone());
        }
        self.output
            .format
            .extension()
            .map(|ext| PathBuf::from(format!("./dighub-results.{ext}")))
    }
}

/// GitHub API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubConfig {
    /// API base URL
    pub api_url: String,
    /// Value of the `X-GitHub-Api-Version` header
    pub api_version: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Results requested per search page (max 100)
    pub per_page: u32,
    /// User agent string
    pub user_agent: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            api_version: "2022-11-28".to_string(),
            timeout_secs: 30,
            per_page: 100,
            user_agent: format!("dighub/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Scan scheduling settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Number of concurrent workers (1-20)
    pub workers: usize,
    /// Delay each worker waits after every pattern, in seconds (0-10)
    pub delay_secs: u64,
    /// Advisory request budget (1-60). Validated, not used for pacing.
    pub requests_per_minute: u32,
    /// Attempts per pattern for non-rate-limit failures
    pub max_attempts: u32,
    /// Cooldown used when the rate-limit status endpoint cannot be read
    pub rate_limit_fallback_secs: u64,
    /// Margin added to the reported reset instant
    pub reset_margin_secs: u64,
    /// Share one cooldown window between all workers
    pub shared_cooldown: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            workers: 5,
            delay_secs: 2,
            requests_per_minute: 30,
            max_attempts: 3,
            rate_limit_fallback_secs: 60,
            reset_margin_secs: 5,
            shared_cooldown: false,
        }
    }
}

/// Pattern selection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// `all`, `high`, `medium`, or `low`
    pub severity: String,
    /// Keep patterns matching any of these substrings
    pub include: Vec<String>,
    /// Drop patterns matching any of these substrings
    pub exclude: Vec<String>,
    /// Extra TOML pattern pack
    pub patterns_file: Option<PathBuf>,
    /// Use only the pattern pack, not the built-in catalog
    pub patterns_only: bool,
}

impl FilterConfig {
    /// Parse the configured severity selection.
    pub fn severity_filter(&self) -> ConfigResult<SeverityFilter> {
        self.severity
            .parse()
            .map_err(|e: crate::DighubError| ConfigError::invalid("filter.severity", e.to_string()))
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            severity: "all".to_string(),
            include: Vec::new(),
            exclude: Vec::new(),
            patterns_file: None,
            patterns_only: false,
        }
    }
}

/// Report output settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Renderer to use
    pub format: OutputFormat,
    /// Destination file for file-based formats
    pub file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Severity;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.github.api_url, "https://api.github.com");
        assert_eq!(config.github.timeout_secs, 30);
        assert_eq!(config.scan.workers, 5);
        assert_eq!(config.scan.delay_secs, 2);
        assert_eq!(config.scan.requests_per_minute, 30);
        assert_eq!(config.scan.max_attempts, 3);
        assert!(!config.scan.shared_cooldown);
        assert_eq!(config.output.format, OutputFormat::Terminal);
        config.validate().expect("defaults are valid");
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("[github]"));
        assert!(toml_str.contains("[scan]"));
        assert!(toml_str.contains("[filter]"));

        let parsed: AppConfig = toml::from_str(&toml_str).expect("parse serialized config");
        assert_eq!(parsed.scan.workers, config.scan.workers);
    }

    #[test]
    fn test_config_save_load() {
        let tmp = TempDir::new().expect("create temp dir");
        let config_path = tmp.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.scan.workers = 12;
        config.filter.exclude = vec!["backup".to_string()];

        config.save_to(&config_path).expect("save config");
        let loaded = AppConfig::load_from(&config_path).expect("load config");

        assert_eq!(loaded.scan.workers, 12);
        assert_eq!(loaded.filter.exclude, vec!["backup".to_string()]);
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let tmp = TempDir::new().expect("create temp dir");
        let result = AppConfig::load_from(&tmp.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound { .. })));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("DIGHUB_WORKERS", "8"),
            ("DIGHUB_DELAY_SECS", "not-a-number"),
            ("DIGHUB_API_URL", "http://127.0.0.1:9999"),
            ("DIGHUB_SHARED_COOLDOWN", "true"),
        ]);

        let mut config = AppConfig::default();
        config.apply_env_overrides(|key| env.get(key).map(|v| (*v).to_string()));

        assert_eq!(config.scan.workers, 8);
        assert_eq!(config.scan.delay_secs, 2);
        assert_eq!(config.github.api_url, "http://127.0.0.1:9999");
        assert!(config.scan.shared_cooldown);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[scan]
workers = 10

[filter]
severity = "high"
include = ["aws"]
"#;

        let config: AppConfig = toml::from_str(toml_str).expect("parse partial config");
        assert_eq!(config.scan.workers, 10);
        assert_eq!(config.scan.delay_secs, 2);
        assert_eq!(
            config.filter.severity_filter().expect("valid severity"),
            SeverityFilter::Only(Severity::High)
        );
        assert_eq!(config.github.per_page, 100);
    }

    #[test]
    fn test_validate_ranges() {
        let mut config = AppConfig::default();
        config.scan.workers = 0;
        assert!(config.validate().is_err());
        config.scan.workers = 21;
        assert!(config.validate().is_err());
        config.scan.workers = 20;
        config.validate().expect("20 workers is valid");

        config.scan.delay_secs = 11;
        assert!(config.validate().is_err());
        config.scan.delay_secs = 0;

        config.scan.requests_per_minute = 61;
        assert!(config.validate().is_err());
        config.scan.requests_per_minute = 1;

        config.scan.rate_limit_fallback_secs = 1_000_000_000_000_000;
        let err = config.validate().expect_err("huge fallback");
        assert!(err.to_string().contains("scan.rate_limit_fallback_secs"));
        config.scan.rate_limit_fallback_secs = 0;
        assert!(config.validate().is_err());
        config.scan.rate_limit_fallback_secs = 3600;
        config.validate().expect("one hour fallback is valid");

        config.scan.reset_margin_secs = 301;
        assert!(config.validate().is_err());
        config.scan.reset_margin_secs = 0;
        config.validate().expect("zero margin is valid");

        config.filter.severity = "critical".to_string();
        let err = config.validate().expect_err("bad severity");
        assert!(err.to_string().contains("filter.severity"));
    }

    #[test]
    fn test_default_output_file() {
        let mut config = AppConfig::default();
        assert_eq!(config.output_file(), None);

        config.output.format = OutputFormat::Csv;
        assert_eq!(
            config.output_file(),
            Some(PathBuf::from("./dighub-results.csv"))
        );

        config.output.file = Some(PathBuf::from("/tmp/out.csv"));
        assert_eq!(config.output_file(), Some(PathBuf::from("/tmp/out.csv")));
    }
}
