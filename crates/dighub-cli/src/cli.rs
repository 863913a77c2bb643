//! Command-line arguments.

use anyhow::{bail, Context};
use clap::Parser;
use dighub_core::{AppConfig, Credential, OutputFormat, SeverityFilter, Target, TargetKind};
use std::path::PathBuf;

/// Scan a GitHub organization or user for exposed secrets with code-search dorks.
#[derive(Parser, Debug)]
#[command(
    name = "dighub",
    version,
    about = "Scan a GitHub organization or user for exposed secrets",
    long_about = "dighub runs a catalog of GitHub code-search patterns (dorks) against one organization or user and reports files that look like leaked credentials or sensitive configuration."
)]
pub struct Cli {
    /// Target GitHub organization
    #[arg(short = 'o', long, conflicts_with = "user")]
    pub org: Option<String>,

    /// Target GitHub user
    #[arg(short = 'u', long)]
    pub user: Option<String>,

    /// GitHub personal access token
    #[arg(short = 't', long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Output format: terminal, json, csv, html
    #[arg(short = 'f', long = "output")]
    pub output: Option<OutputFormat>,

    /// Output file for json, csv, and html formats
    #[arg(short = 'w', long = "out-file")]
    pub out_file: Option<PathBuf>,

    /// Only run patterns mentioning any of these substrings (comma-separated)
    #[arg(short = 'i', long, value_delimiter = ',')]
    pub include: Vec<String>,

    /// Skip patterns mentioning any of these substrings (comma-separated)
    #[arg(short = 'e', long, value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Severity to scan: high, medium, low, all
    #[arg(short = 'p', long)]
    pub priority: Option<SeverityFilter>,

    /// Number of concurrent workers (1-20)
    #[arg(short = 'W', long)]
    pub workers: Option<usize>,

    /// Requests per minute (1-60)
    #[arg(short = 'r', long = "rate-limit")]
    pub rate_limit: Option<u32>,

    /// Delay between requests in seconds (0-10)
    #[arg(short = 'd', long)]
    pub delay: Option<u64>,

    /// Pause every worker when any worker is rate limited
    #[arg(long)]
    pub shared_cooldown: bool,

    /// Configuration file (defaults to the user config directory)
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Additional TOML pattern pack
    #[arg(long)]
    pub patterns_file: Option<PathBuf>,

    /// Use only the patterns from --patterns-file
    #[arg(long, requires = "patterns_file")]
    pub patterns_only: bool,

    /// List the selected patterns and exit
    #[arg(long)]
    pub list_patterns: bool,

    /// Verbose output
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Quiet mode, only print matching URLs
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(short = 'n', long)]
    pub no_color: bool,
}

impl Cli {
    /// Layer command-line values over a loaded configuration.
    pub fn apply_to(&self, config: &mut AppConfig) {
        if let Some(format) = self.output {
            config.output.format = format;
        }
        if let Some(file) = &self.out_file {
            config.output.file = Some(file.clone());
        }
        if !self.include.is_empty() {
            config.filter.include.clone_from(&self.include);
        }
        if !self.exclude.is_empty() {
            config.filter.exclude.clone_from(&self.exclude);
        }
        if let Some(priority) = self.priority {
            config.filter.severity = priority.to_string();
        }
        if let Some(workers) = self.workers {
            config.scan.workers = workers;
        }
        if let Some(rate_limit) = self.rate_limit {
            config.scan.requests_per_minute = rate_limit;
        }
        if let Some(delay) = self.delay {
            config.scan.delay_secs = delay;
        }
        if self.shared_cooldown {
            config.scan.shared_cooldown = true;
        }
        if let Some(path) = &self.patterns_file {
            config.filter.patterns_file = Some(path.clone());
        }
        if self.patterns_only {
            config.filter.patterns_only = true;
        }
    }

    /// The organization or user to scan.
    pub fn target(&self) -> anyhow::Result<Target> {
        let target = match (&self.org, &self.user) {
            (Some(org), None) => Target::new(TargetKind::Organization, org.as_str())?,
            (None, Some(user)) => Target::new(TargetKind::User, user.as_str())?,
            (Some(_), Some(_)) => bail!("cannot specify both --org and --user"),
            (None, None) => bail!("either --org or --user must be specified"),
        };
        Ok(target)
    }

    /// The validated access token.
    pub fn credential(&self) -> anyhow::Result<Credential> {
        let token = self
            .token
            .as_deref()
            .context("GitHub token is required (use --token or GITHUB_TOKEN)")?;
        Ok(Credential::new(token)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use dighub_core::Severity;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("dighub").chain(args.iter().copied()))
            .expect("valid arguments")
    }

    #[test]
    fn test_cli_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_short_flags() {
        let cli = parse(&[
            "-o", "acme", "-t", "ghp_abc", "-f", "json", "-w", "out.json", "-i", "aws,slack",
            "-e", "test", "-p", "high", "-W", "8", "-r", "20", "-d", "0", "-v",
        ]);

        assert_eq!(cli.org.as_deref(), Some("acme"));
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert_eq!(cli.include, vec!["aws", "slack"]);
        assert_eq!(cli.exclude, vec!["test"]);
        assert_eq!(cli.priority, Some(SeverityFilter::Only(Severity::High)));
        assert_eq!(cli.workers, Some(8));
        assert_eq!(cli.rate_limit, Some(20));
        assert_eq!(cli.delay, Some(0));
        assert!(cli.verbose);
    }

    #[test]
    fn test_org_and_user_conflict() {
        let result = Cli::try_parse_from(["dighub", "--org", "a", "--user", "b"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        let result = Cli::try_parse_from(["dighub", "--org", "a", "-v", "-q"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_format_rejected() {
        let result = Cli::try_parse_from(["dighub", "--org", "a", "--output", "xml"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_patterns_only_requires_file() {
        let result = Cli::try_parse_from(["dighub", "--org", "a", "--patterns-only"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_target_selection() {
        let cli = parse(&["--user", "octocat"]);
        let target = cli.target().expect("valid target");
        assert_eq!(target.qualifier(), "user:octocat");

        let cli = parse(&[]);
        assert!(cli.target().is_err());

        let cli = parse(&["--org", "bad name"]);
        assert!(cli.target().is_err());
    }

    #[test]
    fn test_credential_prefix() {
        assert!(parse(&["--token", "ghs_server"]).credential().is_ok());
        assert!(parse(&["--token", "not-a-token"]).credential().is_err());
    }

    #[test]
    fn test_apply_to_overrides_config() {
        let cli = parse(&["-o", "acme", "-f", "csv", "-W", "12", "-d", "5", "-p", "low", "--shared-cooldown"]);
        let mut config = AppConfig::default();
        cli.apply_to(&mut config);

        assert_eq!(config.output.format, OutputFormat::Csv);
        assert_eq!(config.scan.workers, 12);
        assert_eq!(config.scan.delay_secs, 5);
        assert!(config.scan.shared_cooldown);
        assert_eq!(
            config.filter.severity_filter().expect("valid severity"),
            SeverityFilter::Only(Severity::Low)
        );
        // untouched values keep their defaults
        assert_eq!(config.scan.requests_per_minute, 30);
        assert!(config.validate().is_ok());
    }
}
