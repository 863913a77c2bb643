use super::{format_duration, Renderer, TIMESTAMP_FORMAT};
use dighub_core::Severity;
use dighub_scanner::{Match, ScanResult};
use std::io::{self, Write};

/// Standalone HTML report.
pub struct HtmlRenderer;

const STYLE: &str = r"
* { margin: 0; padding: 0; box-sizing: border-box; }
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); min-height: 100vh; padding: 20px; }
.container { max-width: 1400px; margin: 0 auto; }
.card { background: white; border-radius: 12px; padding: 30px; margin-bottom: 20px; box-shadow: 0 10px 30px rgba(0,0,0,0.2); }
.header h1 { color: #667eea; margin-bottom: 10px; font-size: 2.5em; }
.subtitle { color: #6c757d; font-size: 1.1em; }
.stats { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 20px; margin-bottom: 20px; }
.stat-card { background: white; border-radius: 12px; padding: 20px; text-align: center; box-shadow: 0 10px 30px rgba(0,0,0,0.2); }
.stat-number { font-size: 2.5em; font-weight: bold; color: #667eea; }
.stat-label { color: #6c757d; margin-top: 5px; font-size: 0.9em; }
.finding { border: 1px solid #e9ecef; border-radius: 8px; padding: 20px; margin-bottom: 15px; }
.finding-header { display: flex; justify-content: space-between; align-items: center; }
.finding-dork { font-family: 'Courier New', monospace; font-weight: bold; color: #333; }
.badge { padding: 5px 15px; border-radius: 20px; color: white; font-weight: bold; font-size: 0.85em; }
.details { display: grid; grid-template-columns: auto 1fr; gap: 10px; margin-top: 15px; }
.label { font-weight: bold; color: #6c757d; }
.details a { color: #667eea; text-decoration: none; }
.tag { display: inline-block; background: #e9ecef; padding: 3px 10px; border-radius: 4px; font-size: 0.85em; color: #495057; }
.footer { text-align: center; color: white; margin-top: 30px; padding: 20px; }
";

/// Badge color for a severity.
fn severity_color(severity: Severity) -> &'static str {
    match severity {
        Severity::High => "#dc3545",
        Severity::Medium => "#ffc107",
        Severity::Low => "#17a2b8",
    }
}

/// Escape text for HTML element content and quoted attributes.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn stat_card(out: &mut dyn Write, value: usize, label: &str, color: Option<&str>) -> io::Result<()> {
    let style = color.map(|c| format!(" style=\"color: {c};\"")).unwrap_or_default();
    writeln!(
        out,
        "      <div class=\"stat-card\"><div class=\"stat-number\"{style}>{value}</div><div class=\"stat-label\">{label}</div></div>"
    )
}

fn finding(out: &mut dyn Write, m: &Match) -> io::Result<()> {
    let url = escape(&m.url);
    writeln!(out, "      <div class=\"finding\">")?;
    writeln!(
        out,
        "        <div class=\"finding-header\"><span class=\"finding-dork\">{}</span><span class=\"badge\" style=\"background-color: {};\">{}</span></div>",
        escape(&m.pattern.text),
        severity_color(m.severity()),
        m.severity().label()
    )?;
    writeln!(out, "        <div class=\"details\">")?;
    writeln!(
        out,
        "          <span class=\"label\">Category:</span><span><span class=\"tag\">{}</span></span>",
        escape(&m.pattern.category)
    )?;
    writeln!(
        out,
        "          <span class=\"label\">Description:</span><span>{}</span>",
        escape(&m.pattern.description)
    )?;
    writeln!(
        out,
        "          <span class=\"label\">Repository:</span><span>{}</span>",
        escape(&m.repository)
    )?;
    writeln!(
        out,
        "          <span class=\"label\">File Path:</span><span>{}</span>",
        escape(&m.path)
    )?;
    writeln!(
        out,
        "          <span class=\"label\">URL:</span><span><a href=\"{url}\" target=\"_blank\" rel=\"noopener\">{url}</a></span>"
    )?;
    writeln!(out, "        </div>")?;
    writeln!(out, "      </div>")
}

impl Renderer for HtmlRenderer {
    fn render(&self, result: &ScanResult, out: &mut dyn Write) -> io::Result<()> {
        let target = escape(&result.target);

        writeln!(out, "<!DOCTYPE html>")?;
        writeln!(out, "<html lang=\"en\">")?;
        writeln!(out, "<head>")?;
        writeln!(out, "  <meta charset=\"UTF-8\">")?;
        writeln!(out, "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">")?;
        writeln!(out, "  <title>Dighub Scan Report - {target}</title>")?;
        writeln!(out, "  <style>{STYLE}</style>")?;
        writeln!(out, "</head>")?;
        writeln!(out, "<body>")?;
        writeln!(out, "  <div class=\"container\">")?;

        writeln!(out, "    <div class=\"card header\">")?;
        writeln!(out, "      <h1>Dighub Scan Report</h1>")?;
        writeln!(
            out,
            "      <div class=\"subtitle\">Target: {target} &bull; Scan Date: {} &bull; Duration: {}</div>",
            result.scan_started_at.format(TIMESTAMP_FORMAT),
            format_duration(result.duration)
        )?;
        writeln!(out, "    </div>")?;

        writeln!(out, "    <div class=\"stats\">")?;
        stat_card(out, result.total_matches, "Total Findings", None)?;
        stat_card(out, result.unique_files, "Unique Files", None)?;
        for severity in Severity::ALL {
            let label = match severity {
                Severity::High => "High Priority",
                Severity::Medium => "Medium Priority",
                Severity::Low => "Low Priority",
            };
            stat_card(
                out,
                result.severity_counts.get(severity),
                label,
                Some(severity_color(severity)),
            )?;
        }
        stat_card(out, result.total_patterns_scanned, "Dorks Scanned", None)?;
        writeln!(out, "    </div>")?;

        writeln!(out, "    <div class=\"card findings\">")?;
        writeln!(out, "      <h2>Detailed Findings</h2>")?;
        for m in &result.matches {
            finding(out, m)?;
        }
        writeln!(out, "    </div>")?;

        writeln!(out, "    <div class=\"footer\">")?;
        writeln!(out, "      <p>Generated by Dighub</p>")?;
        writeln!(out, "      <p>For authorized security research only</p>")?;
        writeln!(out, "    </div>")?;
        writeln!(out, "  </div>")?;
        writeln!(out, "</body>")?;
        writeln!(out, "</html>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::fixtures::sample_result;

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn test_html_report() {
        let mut buf = Vec::new();
        HtmlRenderer.render(&sample_result(), &mut buf).expect("render html");
        let html = String::from_utf8(buf).expect("utf-8");

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Dighub Scan Report - acme</title>"));
        assert!(html.contains("Duration: 1m 15s"));
        assert!(html.contains("background-color: #dc3545;\">HIGH</span>"));
        assert!(html.contains("background-color: #17a2b8;\">LOW</span>"));
        assert_eq!(html.matches("class=\"finding\"").count(), 3);
        // pattern descriptions are escaped
        assert!(html.contains("PHP config &lt;file&gt;"));
        assert!(!html.contains("<file>"));
    }
}
