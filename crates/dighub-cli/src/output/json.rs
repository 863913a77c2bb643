use super::Renderer;
use chrono::{DateTime, Utc};
use dighub_scanner::{Match, ScanResult};
use serde::Serialize;
use std::io::{self, Write};

/// Pretty-printed JSON report.
pub struct JsonRenderer;

#[derive(Serialize)]
struct Report<'a> {
    scan_info: ScanInfo<'a>,
    summary: Summary,
    findings: Vec<Finding<'a>>,
}

#[derive(Serialize)]
struct ScanInfo<'a> {
    target: &'a str,
    scan_date: DateTime<Utc>,
    duration_secs: f64,
    total_dorks: usize,
}

#[derive(Serialize)]
struct Summary {
    total_matches: usize,
    unique_files: usize,
    high_priority: usize,
    medium_priority: usize,
    low_priority: usize,
}

#[derive(Serialize)]
struct Finding<'a> {
    dork: Dork<'a>,
    url: &'a str,
    repository: &'a str,
    path: &'a str,
    score: f64,
    timestamp: DateTime<Utc>,
}

#[derive(Serialize)]
struct Dork<'a> {
    pattern: &'a str,
    description: &'a str,
    priority: &'a str,
    category: &'a str,
}

impl<'a> From<&'a Match> for Finding<'a> {
    fn from(m: &'a Match) -> Self {
        Self {
            dork: Dork {
                pattern: &m.pattern.text,
                description: &m.pattern.description,
                priority: m.pattern.severity.as_str(),
                category: &m.pattern.category,
            },
            url: &m.url,
            repository: &m.repository,
            path: &m.path,
            score: m.score,
            timestamp: m.observed_at,
        }
    }
}

impl Renderer for JsonRenderer {
    fn render(&self, result: &ScanResult, out: &mut dyn Write) -> io::Result<()> {
        let report = Report {
            scan_info: ScanInfo {
                target: &result.target,
                scan_date: result.scan_started_at,
                duration_secs: result.duration.as_secs_f64(),
                total_dorks: result.total_patterns_scanned,
            },
            summary: Summary {
                total_matches: result.total_matches,
                unique_files: result.unique_files,
                high_priority: result.severity_counts.high,
                medium_priority: result.severity_counts.medium,
                low_priority: result.severity_counts.low,
            },
            findings: result.matches.iter().map(Finding::from).collect(),
        };

        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)
    }
}
