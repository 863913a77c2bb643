//! Scan flow from parsed arguments to rendered report.

use crate::cli::Cli;
use crate::output::{file_renderer, print_summary, write_report, Renderer, TerminalRenderer};
use crate::progress::ProgressObserver;
use anyhow::Context;
use colored::Colorize;
use dighub_core::{AppConfig, FilterConfig, Severity};
use dighub_dorks::{Pattern, PatternCatalog, PatternFilter, PatternLoader};
use dighub_scanner::{ScanOptions, ScanScheduler};
use std::io::{self, IsTerminal, Write};
use std::sync::Arc;
use tracing::info;

/// Run the command described by `cli`.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    if cli.no_color {
        colored::control::set_override(false);
    }

    let mut config =
        AppConfig::load_with_env(cli.config.as_deref()).context("failed to load configuration")?;
    cli.apply_to(&mut config);
    config.validate().context("invalid configuration")?;

    let catalog = build_catalog(&config.filter)?;
    let filter = PatternFilter {
        severity: config.filter.severity_filter()?,
        include: config.filter.include.clone(),
        exclude: config.filter.exclude.clone(),
    };
    let patterns = filter.apply(&catalog.list());

    if cli.list_patterns {
        list_patterns(&patterns, &mut io::stdout().lock())?;
        return Ok(());
    }

    let target = cli.target()?;
    let credential = cli.credential()?;

    if !cli.quiet {
        print_banner(&mut io::stdout().lock())?;
    }

    info!(
        login = %target,
        patterns = patterns.len(),
        workers = config.scan.workers,
        format = ?config.output.format,
        "Starting scan"
    );

    let show_progress = !cli.quiet && io::stderr().is_terminal();
    let observer = Arc::new(ProgressObserver::new(patterns.len(), show_progress));
    let scheduler = ScanScheduler::from_config(&config, credential, target, observer.clone())?;

    let outcome = scheduler
        .run(patterns, ScanOptions::from_config(&config.scan))
        .await;
    observer.finish();
    let mut result = outcome?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match file_renderer(config.output.format) {
        None => {
            let renderer = TerminalRenderer {
                verbose: cli.verbose,
                quiet: cli.quiet,
            };
            renderer.render(&result, &mut out)?;
        }
        Some(renderer) => {
            let path = config
                .output_file()
                .context("no output file for file-based format")?;
            write_report(renderer.as_ref(), &mut result, &path)
                .with_context(|| format!("failed to write report to {}", path.display()))?;
        }
    }

    if !cli.quiet {
        print_summary(&result, &mut out)?;
    }

    Ok(())
}

/// The catalog selected by the filter settings: built-in patterns, a pack
/// appended to them, or the pack alone.
pub fn build_catalog(filter: &FilterConfig) -> anyhow::Result<PatternCatalog> {
    let mut catalog = if filter.patterns_only {
        PatternCatalog::new()
    } else {
        PatternCatalog::builtin()
    };

    if let Some(path) = &filter.patterns_file {
        let pack = PatternLoader::load_file(path)
            .with_context(|| format!("failed to load patterns from {}", path.display()))?;
        catalog.extend(pack)?;
    }

    Ok(catalog)
}

fn list_patterns(patterns: &[Arc<Pattern>], out: &mut dyn Write) -> io::Result<()> {
    for pattern in patterns {
        let label = match pattern.severity {
            Severity::High => pattern.severity.label().red(),
            Severity::Medium => pattern.severity.label().yellow(),
            Severity::Low => pattern.severity.label().cyan(),
        };
        writeln!(
            out,
            "[{label}] {:<14} {}  {}",
            pattern.category,
            pattern.text,
            pattern.description.dimmed()
        )?;
    }
    writeln!(out)?;
    writeln!(out, "{} patterns selected", patterns.len())
}

fn print_banner(out: &mut dyn Write) -> io::Result<()> {
    const BANNER: &str = r"
    ____  _       __  __      __
   / __ \(_)___ _/ / / /_  __/ /_
  / / / / / __ `/ /_/ / / / / __ \
 / /_/ / / /_/ / __  / /_/ / /_/ /
/_____/_/\__, /_/ /_/\__,_/_.___/
        /____/";

    writeln!(out, "{}", BANNER.cyan())?;
    writeln!(out, "{} {}", "Version:".yellow(), env!("CARGO_PKG_VERSION"))?;
    writeln!(out, "{} GitHub code-search secret scanner", "=>".green())?;
    writeln!(out, "{}", "─".repeat(50))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const PACK: &str = r#"
[[pattern]]
text = "filename:.env INTERNAL_TOKEN"
severity = "high"
category = "Internal"
description = "Internal token"
"#;

    #[test]
    fn test_build_catalog_builtin() {
        let catalog = build_catalog(&FilterConfig::default()).expect("builtin catalog");
        assert_eq!(catalog.len(), 106);
    }

    #[test]
    fn test_build_catalog_with_pack() {
        let tmp = TempDir::new().expect("create temp dir");
        let path = tmp.path().join("pack.toml");
        std::fs::write(&path, PACK).expect("write pack");

        let mut filter = FilterConfig {
            patterns_file: Some(path),
            ..FilterConfig::default()
        };
        let catalog = build_catalog(&filter).expect("extended catalog");
        assert_eq!(catalog.len(), 107);
        assert_eq!(catalog.list()[106].text, "filename:.env INTERNAL_TOKEN");

        filter.patterns_only = true;
        let catalog = build_catalog(&filter).expect("pack-only catalog");
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_build_catalog_missing_pack() {
        let filter = FilterConfig {
            patterns_file: Some("/nonexistent/pack.toml".into()),
            ..FilterConfig::default()
        };
        assert!(build_catalog(&filter).is_err());
    }

    #[test]
    fn test_list_patterns() {
        colored::control::set_override(false);
        let catalog = PatternCatalog::builtin();
        let mut buf = Vec::new();
        list_patterns(&catalog.list()[..2], &mut buf).expect("list patterns");

        let text = String::from_utf8(buf).expect("utf-8");
        assert!(text.starts_with("[HIGH] AWS"));
        assert!(text.contains("2 patterns selected"));
    }
}
