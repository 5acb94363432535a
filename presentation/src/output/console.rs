//! Console output formatter for poll reports

use crate::output::formatter::OutputFormatter;
use crate::output::report::PollReport;
use colored::Colorize;

/// Formats poll reports for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete report
    pub fn format(report: &PollReport) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Poll Results"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Proposition:".cyan().bold(),
            report.proposition
        ));
        output.push_str(&format!("{} {}\n", "Group:".cyan().bold(), report.group));
        output.push_str(&format!("{} {}\n", "Rule:".cyan().bold(), report.rule));

        output.push_str(&Self::section_header("Responses"));
        output.push_str(&Self::respondents("Believed", &report.positive));
        output.push_str(&Self::respondents("Disbelieved", &report.negative));
        output.push_str(&Self::respondents("No answer", &report.silent));

        if let Some(contest) = &report.contest {
            output.push_str(&Self::section_header("Contest"));
            let winners = if contest.winners.is_empty() {
                "(none)".dimmed().to_string()
            } else {
                contest.winners.join(", ").yellow().bold().to_string()
            };
            output.push_str(&format!("  {} {}\n", "Winners:".bold(), winners));
            if !contest.prize.is_empty() {
                let prize: Vec<String> = contest.prize.iter().map(|p| p.to_string()).collect();
                output.push_str(&format!("  {} {}\n", "Prize:".bold(), prize.join(", ")));
            }
        }

        output.push_str(&Self::section_header("Conclusion"));
        output.push_str(&format!(
            "\n  {} ({})\n",
            Self::verdict(report.result),
            report.reason
        ));

        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(report: &PollReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format result and tally only (concise output)
    pub fn format_brief(report: &PollReport) -> String {
        let mut output = format!(
            "{} {} [{}, {}]",
            Self::verdict(report.result),
            report.proposition.bold(),
            report.reason,
            report.tally_summary().dimmed()
        );
        if let Some(contest) = &report.contest
            && !contest.winners.is_empty()
        {
            output.push_str(&format!(" winners: {}", contest.winners.join(", ")));
        }
        output.push('\n');
        output
    }

    fn verdict(result: Option<bool>) -> String {
        match result {
            Some(true) => "TRUE".green().bold().to_string(),
            Some(false) => "FALSE".red().bold().to_string(),
            None => "N/A".dimmed().to_string(),
        }
    }

    fn respondents(label: &str, names: &[String]) -> String {
        let list = if names.is_empty() {
            "-".dimmed().to_string()
        } else {
            names.join(", ")
        };
        format!("  {:<12} {:>2}  {}\n", label, names.len(), list)
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, report: &PollReport) -> String {
        Self::format(report)
    }

    fn format_json(&self, report: &PollReport) -> String {
        Self::format_json(report)
    }

    fn format_brief(&self, report: &PollReport) -> String {
        Self::format_brief(report)
    }
}
