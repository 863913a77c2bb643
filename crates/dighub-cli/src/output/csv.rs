use super::{Renderer, TIMESTAMP_FORMAT};
use dighub_scanner::ScanResult;
use std::io::{self, Write};

/// CSV report, one row per match.
pub struct CsvRenderer;

const HEADER: [&str; 9] = [
    "Priority",
    "Category",
    "Dork Pattern",
    "Description",
    "Repository",
    "File Path",
    "URL",
    "Score",
    "Timestamp",
];

impl Renderer for CsvRenderer {
    fn render(&self, result: &ScanResult, out: &mut dyn Write) -> io::Result<()> {
        let mut writer = csv::Writer::from_writer(out);
        writer.write_record(HEADER)?;

        for m in &result.matches {
            let score = format!("{:.2}", m.score);
            let timestamp = m.observed_at.format(TIMESTAMP_FORMAT).to_string();
            writer.write_record([
                m.pattern.severity.as_str(),
                m.pattern.category.as_str(),
                m.pattern.text.as_str(),
                m.pattern.description.as_str(),
                m.repository.as_str(),
                m.path.as_str(),
                m.url.as_str(),
                score.as_str(),
                timestamp.as_str(),
            ])?;
        }

        writer.flush()
    }
}
