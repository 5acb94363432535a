//! Live reporting of experiment events on the terminal

use colored::Colorize;
use poll_application::{ExperimentEvent, ExperimentLogger};
use poll_domain::ParticipantId;
use serde_json::Value;
use std::collections::HashMap;

/// Echoes experiment events to stderr as they happen
///
/// Respondent ids in the event payloads are replaced by the display names
/// the reporter was built with.
pub struct ConsoleEventReporter {
    names: HashMap<ParticipantId, String>,
}

impl ConsoleEventReporter {
    pub fn new(names: HashMap<ParticipantId, String>) -> Self {
        Self { names }
    }

    /// One-line description of an event, or `None` for events not shown
    pub fn describe(&self, event: &ExperimentEvent) -> Option<String> {
        let payload = &event.payload;
        let line = match event.event_type {
            "survey_sent" => format!(
                "{} asked {}",
                "->".cyan(),
                text(payload, "proposition").bold()
            ),
            "launched" => match payload["timeout_ms"].as_u64() {
                Some(ms) => format!("{} waiting up to {} ms", "..".dimmed(), ms),
                None => format!("{} waiting without a timeout", "..".dimmed()),
            },
            "response_accepted" => {
                let who = self.name(&payload["respondent"]);
                if payload["believed"].as_bool().unwrap_or(false) {
                    format!("  {} {} believes it", "v".green(), who)
                } else {
                    format!("  {} {} does not", "x".red(), who)
                }
            }
            "response_discarded" => format!(
                "  {} ignored answer from {}",
                "-".dimmed(),
                self.name(&payload["respondent"])
            ),
            "announcement" => {
                let winners: Vec<String> = payload["winners"]
                    .as_array()
                    .map(|ws| ws.iter().map(|w| self.name(w)).collect())
                    .unwrap_or_default();
                format!("{} winners: {}", "*".yellow(), winners.join(", "))
            }
            "concluded" => format!(
                "{} concluded ({})",
                "<-".cyan(),
                text(payload, "reason")
            ),
            _ => return None,
        };
        Some(line)
    }

    fn name(&self, id: &Value) -> String {
        let raw = id.as_str().unwrap_or_default();
        match raw.parse::<ParticipantId>() {
            Ok(id) => self.names.get(&id).cloned().unwrap_or_else(|| id.short()),
            Err(_) => raw.to_string(),
        }
    }
}

impl ExperimentLogger for ConsoleEventReporter {
    fn log(&self, event: ExperimentEvent) {
        if let Some(line) = self.describe(&event) {
            eprintln!("{}", line);
        }
    }
}

fn text<'a>(payload: &'a Value, key: &str) -> &'a str {
    payload[key].as_str().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reporter() -> (ConsoleEventReporter, ParticipantId) {
        colored::control::set_override(false);
        let alice = ParticipantId::random();
        let names = HashMap::from([(alice, "alice".to_string())]);
        (ConsoleEventReporter::new(names), alice)
    }

    #[test]
    fn test_describe_response() {
        let (reporter, alice) = reporter();
        let event = ExperimentEvent::new(
            "response_accepted",
            json!({"respondent": alice, "proposition": "raining", "believed": true}),
        );
        assert_eq!(
            reporter.describe(&event).as_deref(),
            Some("  v alice believes it")
        );
    }

    #[test]
    fn test_describe_unknown_respondent() {
        let (reporter, _) = reporter();
        let stranger = ParticipantId::random();
        let event = ExperimentEvent::new(
            "response_accepted",
            json!({"respondent": stranger, "believed": false}),
        );
        let line = reporter.describe(&event).unwrap();
        assert!(line.contains(&stranger.short()));
        assert!(line.ends_with("does not"));
    }

    #[test]
    fn test_describe_lifecycle() {
        let (reporter, alice) = reporter();
        let sent = ExperimentEvent::new("survey_sent", json!({"proposition": "raining"}));
        assert_eq!(reporter.describe(&sent).as_deref(), Some("-> asked raining"));

        let launched = ExperimentEvent::new("launched", json!({"timeout_ms": null}));
        assert!(reporter.describe(&launched).unwrap().contains("without a timeout"));

        let announced = ExperimentEvent::new("announcement", json!({"winners": [alice]}));
        assert_eq!(
            reporter.describe(&announced).as_deref(),
            Some("* winners: alice")
        );

        let concluded = ExperimentEvent::new("concluded", json!({"reason": "timeout"}));
        assert_eq!(
            reporter.describe(&concluded).as_deref(),
            Some("<- concluded (timeout)")
        );
    }

    #[test]
    fn test_unknown_event_is_not_shown() {
        let (reporter, _) = reporter();
        assert!(reporter
            .describe(&ExperimentEvent::new("custom", json!({})))
            .is_none());
    }
}
