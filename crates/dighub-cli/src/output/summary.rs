use super::format_duration;
use colored::Colorize;
use dighub_scanner::ScanResult;
use std::io::{self, Write};

const RULE_WIDTH: usize = 50;

/// Write the end-of-scan summary block.
pub fn print_summary(result: &ScanResult, out: &mut dyn Write) -> io::Result<()> {
    let rule = "═".repeat(RULE_WIDTH);

    writeln!(out)?;
    writeln!(out, "{rule}")?;
    writeln!(out, "{}", "SCAN SUMMARY".cyan())?;
    writeln!(out, "{rule}")?;
    writeln!(out, "{} {}", "Total Dorks Scanned:".blue(), result.total_patterns_scanned)?;
    writeln!(out, "{} {}", "Matches Found:".green(), result.total_matches)?;
    writeln!(out, "{} {}", "Unique Files:".yellow(), result.unique_files)?;
    writeln!(out, "{} {}", "High Priority:".red(), result.severity_counts.high)?;
    writeln!(out, "{} {}", "Medium Priority:".magenta(), result.severity_counts.medium)?;
    writeln!(out, "{} {}", "Low Priority:".cyan(), result.severity_counts.low)?;
    writeln!(out, "{} {}", "Duration:".blue(), format_duration(result.duration))?;
    writeln!(out, "{rule}")?;

    if result.total_matches > 0 {
        writeln!(out, "{}", "Scan completed successfully!".green())?;
        if let Some(path) = &result.output_file {
            writeln!(out, "{} {}", "Results saved to:".green(), path.display())?;
        }
    } else {
        writeln!(out, "No sensitive data found in the target.")?;
    }

    Ok(())
}
