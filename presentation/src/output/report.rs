//! Presentable summary of a concluded poll

use poll_domain::{
    ConclusionReason, ContestAnnouncement, ExperimentOutcome, GroupId, ParticipantId, PollRule,
    Proposition,
};
use serde::Serialize;
use serde_json::Value;
use std::collections::{HashMap, HashSet};

/// Everything the formatters print about one poll
///
/// Participant identities are resolved to display names up front; an id
/// with no known name is shown in its short form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PollReport {
    pub proposition: String,
    pub group: String,
    pub rule: PollRule,
    /// `None` for a contest nobody decided: only its winners are meaningful
    pub result: Option<bool>,
    pub reason: ConclusionReason,
    pub positive: Vec<String>,
    pub negative: Vec<String>,
    /// Participants that never answered
    pub silent: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contest: Option<ContestSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContestSummary {
    pub winners: Vec<String>,
    pub prize: Vec<Value>,
}

impl PollReport {
    pub fn new(
        proposition: &Proposition,
        group: &GroupId,
        rule: PollRule,
        outcome: &ExperimentOutcome,
        names: &HashMap<ParticipantId, String>,
    ) -> Self {
        let answered: HashSet<&ParticipantId> = outcome
            .positive_responders
            .iter()
            .chain(&outcome.negative_responders)
            .collect();
        let silent = names
            .keys()
            .filter(|id| !answered.contains(id))
            .map(|id| display_name(id, names))
            .collect();

        Self {
            proposition: proposition.rendered(),
            group: group.to_string(),
            rule,
            result: verdict(rule, outcome),
            reason: outcome.reason,
            positive: sorted_names(&outcome.positive_responders, names),
            negative: sorted_names(&outcome.negative_responders, names),
            silent: sorted(silent),
            contest: None,
        }
    }

    /// Attach the winners named by a contest announcement
    pub fn with_announcement(
        mut self,
        announcement: &ContestAnnouncement,
        names: &HashMap<ParticipantId, String>,
    ) -> Self {
        self.contest = Some(ContestSummary {
            winners: announcement
                .winners
                .iter()
                .map(|id| display_name(id, names))
                .collect(),
            prize: announcement.prize.clone(),
        });
        self
    }

    pub fn tally_summary(&self) -> String {
        format!(
            "{} positive / {} negative / {} silent",
            self.positive.len(),
            self.negative.len(),
            self.silent.len()
        )
    }
}

fn verdict(rule: PollRule, outcome: &ExperimentOutcome) -> Option<bool> {
    match (rule, outcome.reason) {
        (PollRule::Contest { .. }, reason) if reason != ConclusionReason::Decided => None,
        _ => Some(outcome.result),
    }
}

fn display_name(id: &ParticipantId, names: &HashMap<ParticipantId, String>) -> String {
    names.get(id).cloned().unwrap_or_else(|| id.short())
}

fn sorted_names(ids: &HashSet<ParticipantId>, names: &HashMap<ParticipantId, String>) -> Vec<String> {
    sorted(ids.iter().map(|id| display_name(id, names)).collect())
}

fn sorted(mut names: Vec<String>) -> Vec<String> {
    names.sort();
    names
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use uuid::Uuid;

    pub(crate) struct Sample {
        pub alice: ParticipantId,
        pub bob: ParticipantId,
        pub carol: ParticipantId,
        pub names: HashMap<ParticipantId, String>,
    }

    pub(crate) fn sample() -> Sample {
        let alice = ParticipantId::random();
        let bob = ParticipantId::random();
        let carol = ParticipantId::random();
        let names = HashMap::from([
            (alice, "alice".to_string()),
            (bob, "bob".to_string()),
            (carol, "carol".to_string()),
        ]);
        Sample {
            alice,
            bob,
            carol,
            names,
        }
    }

    pub(crate) fn report(sample: &Sample, reason: ConclusionReason, result: bool) -> PollReport {
        let outcome = ExperimentOutcome {
            result,
            reason,
            positive_responders: HashSet::from([sample.bob, sample.alice]),
            negative_responders: HashSet::new(),
        };
        PollReport::new(
            &Proposition::new("raining").unwrap(),
            &GroupId::new("council").unwrap(),
            PollRule::BelievedByAll,
            &outcome,
            &sample.names,
        )
    }

    #[test]
    fn test_names_are_resolved_and_sorted() {
        let sample = sample();
        let report = report(&sample, ConclusionReason::Timeout, false);

        assert_eq!(report.positive, vec!["alice", "bob"]);
        assert!(report.negative.is_empty());
        assert_eq!(report.silent, vec!["carol"]);
        assert!(!report.positive.contains(&sample.names[&sample.carol]));
        assert_eq!(report.tally_summary(), "2 positive / 0 negative / 1 silent");
    }

    #[test]
    fn test_unknown_respondent_uses_short_id() {
        let stranger = ParticipantId::random();
        let outcome = ExperimentOutcome {
            result: false,
            reason: ConclusionReason::Decided,
            positive_responders: HashSet::new(),
            negative_responders: HashSet::from([stranger]),
        };
        let report = PollReport::new(
            &Proposition::new("raining").unwrap(),
            &GroupId::new("council").unwrap(),
            PollRule::BelievedByAll,
            &outcome,
            &HashMap::new(),
        );
        assert_eq!(report.negative, vec![stranger.short()]);
    }

    #[test]
    fn test_undecided_contest_has_no_result() {
        let sample = sample();
        let outcome = ExperimentOutcome {
            result: false,
            reason: ConclusionReason::Timeout,
            positive_responders: HashSet::from([sample.alice]),
            negative_responders: HashSet::new(),
        };
        let contest = PollRule::Contest { winners: 1 };
        let proposition = Proposition::new("fast").unwrap();
        let group = GroupId::new("arena").unwrap();

        let report = PollReport::new(&proposition, &group, contest, &outcome, &sample.names);
        assert_eq!(report.result, None);

        let decided = ExperimentOutcome {
            reason: ConclusionReason::Decided,
            result: true,
            ..outcome
        };
        let report = PollReport::new(&proposition, &group, contest, &decided, &sample.names);
        assert_eq!(report.result, Some(true));
    }

    #[test]
    fn test_with_announcement() {
        let sample = sample();
        let announcement = ContestAnnouncement::new(
            Uuid::new_v4(),
            vec![sample.bob, sample.alice],
            vec![serde_json::json!("gold")],
        );
        let report =
            report(&sample, ConclusionReason::Decided, true).with_announcement(&announcement, &sample.names);

        let contest = report.contest.unwrap();
        assert_eq!(contest.winners, vec!["bob", "alice"]);
        assert_eq!(contest.prize, vec![serde_json::json!("gold")]);
    }
}
