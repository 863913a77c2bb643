//! Report rendering.
//!
//! Every renderer writes a [`ScanResult`] to a byte sink. File formats are
//! written through [`write_report`], which records the path on the result.

mod csv;
mod html;
mod json;
mod summary;
mod terminal;

pub use self::csv::CsvRenderer;
pub use self::html::HtmlRenderer;
pub use self::json::JsonRenderer;
pub use self::summary::print_summary;
pub use self::terminal::TerminalRenderer;

use dighub_core::OutputFormat;
use dighub_scanner::ScanResult;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Duration;

/// Timestamp layout used in reports.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Renders a scan result in one output format.
pub trait Renderer {
    /// Write `result` to `out`.
    fn render(&self, result: &ScanResult, out: &mut dyn Write) -> io::Result<()>;
}

/// The file renderer for `format`, or `None` for the terminal.
#[must_use]
pub fn file_renderer(format: OutputFormat) -> Option<Box<dyn Renderer>> {
    match format {
        OutputFormat::Terminal => None,
        OutputFormat::Json => Some(Box::new(JsonRenderer)),
        OutputFormat::Csv => Some(Box::new(CsvRenderer)),
        OutputFormat::Html => Some(Box::new(HtmlRenderer)),
    }
}

/// Render `result` into the file at `path` and record the absolute path.
pub fn write_report(renderer: &dyn Renderer, result: &mut ScanResult, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);
    renderer.render(result, &mut out)?;
    out.flush()?;

    result.output_file = Some(std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf()));
    tracing::debug!("Wrote report to {}", path.display());
    Ok(())
}

/// Short human form of a duration, e.g. `4.2s` or `3m 07s`.
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 60 {
        format!("{}m {:02}s", secs / 60, secs % 60)
    } else {
        format!("{:.1}s", duration.as_secs_f64())
    }
}
