//! Output formatter trait

use super::report::PollReport;

/// Trait for formatting poll reports
pub trait OutputFormatter {
    /// Format the complete report
    fn format(&self, report: &PollReport) -> String;

    /// Format as JSON
    fn format_json(&self, report: &PollReport) -> String;

    /// Format result and tally only (concise output)
    fn format_brief(&self, report: &PollReport) -> String;

    /// Dispatch on the configured output format
    fn render(&self, report: &PollReport, format: poll_domain::OutputFormat) -> String {
        match format {
            poll_domain::OutputFormat::Text => self.format(report),
            poll_domain::OutputFormat::Brief => self.format_brief(report),
            poll_domain::OutputFormat::Json => self.format_json(report),
        }
    }
}
