use super::Renderer;
use colored::Colorize;
use dighub_core::Severity;
use dighub_scanner::{Match, ScanResult};
use std::io::{self, Write};

/// Human-readable listing grouped by severity.
///
/// LOW findings are listed only when `verbose`. In `quiet` mode only the
/// URLs are printed, one per line.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalRenderer {
    /// Include LOW findings
    pub verbose: bool,
    /// Print URLs only
    pub quiet: bool,
}

impl TerminalRenderer {
    fn heading(severity: Severity) -> String {
        let text = format!("═══ {} PRIORITY FINDINGS ═══", severity.label());
        match severity {
            Severity::High => text.red().to_string(),
            Severity::Medium => text.yellow().to_string(),
            Severity::Low => text.cyan().to_string(),
        }
    }

    fn write_match(out: &mut dyn Write, m: &Match) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "{} {}", "Dork:".blue(), m.pattern.text.white())?;
        writeln!(out, "{} {}", "Category:".blue(), m.pattern.category.cyan())?;
        writeln!(out, "{} {}", "Repository:".blue(), m.repository.green())?;
        writeln!(out, "{} {}", "File:".blue(), m.path.yellow())?;
        writeln!(out, "{} {}", "URL:".blue(), m.url)
    }
}

impl Renderer for TerminalRenderer {
    fn render(&self, result: &ScanResult, out: &mut dyn Write) -> io::Result<()> {
        if self.quiet {
            for m in &result.matches {
                writeln!(out, "{}", m.url)?;
            }
            return Ok(());
        }

        for severity in Severity::ALL {
            if severity == Severity::Low && !self.verbose {
                continue;
            }

            let mut group = result.matches_with(severity).peekable();
            if group.peek().is_none() {
                continue;
            }

            writeln!(out)?;
            writeln!(out, "{}", Self::heading(severity))?;
            for m in group {
                Self::write_match(out, m)?;
            }
        }

        Ok(())
    }
}
