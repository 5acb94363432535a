//! Winner selection over the positive responders

use crate::experiment::{Conclusion, Evaluator, ExperimentBallot};
use poll_domain::{ContestAnnouncement, ParticipantId, Response};
use serde_json::Value;
use std::collections::HashSet;
use tracing::{info, trace};

/// Picks winners from the set of positive responders
pub type WinnerSelector = Box<dyn Fn(&HashSet<ParticipantId>) -> Vec<ParticipantId> + Send + Sync>;

/// Partitions responders without concluding early
///
/// When the experiment concludes, for whatever reason, the selector runs
/// over the positive responders and the winners are announced to the whole
/// group together with the prize.
pub struct Contest {
    selector: WinnerSelector,
    prize: Vec<Value>,
}

impl Contest {
    pub fn new(
        selector: impl Fn(&HashSet<ParticipantId>) -> Vec<ParticipantId> + Send + Sync + 'static,
    ) -> Self {
        Self {
            selector: Box::new(selector),
            prize: Vec::new(),
        }
    }

    /// Contest won by up to `n` of the positive responders
    ///
    /// The pick is arbitrary; pass a selector to [`Contest::new`] to rank.
    pub fn any(n: usize) -> Self {
        Self::new(move |positives| positives.iter().take(n).copied().collect())
    }

    pub fn with_prize(mut self, prize: impl IntoIterator<Item = Value>) -> Self {
        self.prize = prize.into_iter().collect();
        self
    }

    pub fn prize(&self) -> &[Value] {
        &self.prize
    }

    /// Run the selector, keeping only positive responders and dropping repeats
    fn select(&self, positives: &HashSet<ParticipantId>) -> Vec<ParticipantId> {
        let mut seen = HashSet::new();
        (self.selector)(positives)
            .into_iter()
            .filter(|id| positives.contains(id) && seen.insert(*id))
            .collect()
    }
}

impl std::fmt::Debug for Contest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Contest")
            .field("prize", &self.prize)
            .finish_non_exhaustive()
    }
}

impl Evaluator for Contest {
    fn evaluate(&self, ballot: &mut ExperimentBallot<'_>, response: &Response) {
        if !ballot.participants().contains(&response.respondent()) {
            trace!(respondent = %response.respondent(), "Ignoring contest entry from outside the scope");
            return;
        }
        if response.believed() {
            ballot.add_positive_response(response);
        } else {
            ballot.add_negative_response(response);
        }
    }

    fn on_conclusion(&self, conclusion: &Conclusion<'_>) {
        let winners = self.select(&conclusion.outcome().positive_responders);
        info!(
            contest = %conclusion.experiment_id(),
            winners = winners.len(),
            reason = %conclusion.outcome().reason,
            "Contest decided"
        );
        conclusion.announce(ContestAnnouncement::new(
            *conclusion.experiment_id().as_uuid(),
            winners,
            self.prize.clone(),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::experiment::ExperimentBuilder;
    use crate::ports::group::GroupListener;
    use crate::ports::testing::{FakeGroup, ManualScheduler, RecordingLogger};
    use poll_domain::{GroupEvent, Proposition};
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::Duration;

    fn entry() -> Proposition {
        Proposition::new("wants_prize").unwrap()
    }

    fn announcements(group: &FakeGroup) -> Vec<ContestAnnouncement> {
        group
            .sent()
            .into_iter()
            .filter_map(|(_, event, _)| match event {
                GroupEvent::Announcement(a) => Some(a),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_top_two_by_external_metric_win() {
        let group = FakeGroup::open("arena");
        let members: Vec<_> = (0..5).map(|_| group.add_member()).collect();
        let scores: HashMap<ParticipantId, u32> =
            members.iter().enumerate().map(|(i, id)| (*id, i as u32 * 10)).collect();

        let contest = Contest::new(move |positives| {
            let mut ranked: Vec<_> = positives.iter().copied().collect();
            ranked.sort_by_key(|id| std::cmp::Reverse(scores[id]));
            ranked.truncate(2);
            ranked
        })
        .with_prize([json!("gold"), json!(100)]);

        let logger = Arc::new(RecordingLogger::default());
        let experiment = ExperimentBuilder::new(group.clone(), ManualScheduler::new())
            .group(group.group())
            .proposition(entry())
            .evaluator(contest)
            .logger(logger.clone())
            .execute()
            .unwrap();

        for id in &members[..4] {
            experiment.on_response(Response::new(entry(), true, *id));
        }
        experiment.on_response(Response::new(entry(), false, members[4]));
        assert!(experiment.in_progress());

        experiment.finalize(true);

        let sent = announcements(&group);
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].winners, vec![members[3], members[2]]);
        assert_eq!(sent[0].prize, vec![json!("gold"), json!(100)]);
        assert_eq!(sent[0].contest, *experiment.id().as_uuid());
        assert!(logger.types().contains(&"announcement"));
    }

    #[test]
    fn test_contest_without_prize_announces_empty_payload() {
        let group = FakeGroup::open("arena");
        let a = group.add_member();
        let scheduler = ManualScheduler::new();
        let experiment = ExperimentBuilder::new(group.clone(), scheduler.clone())
            .group(group.group())
            .proposition(entry())
            .evaluator(Contest::any(1))
            .end_after(Duration::from_millis(10))
            .execute()
            .unwrap();

        experiment.on_response(Response::new(entry(), true, a));
        scheduler.fire_all();

        let sent = announcements(&group);
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].winners, vec![a]);
        assert!(!sent[0].has_prize());
        assert!(!experiment.outcome().unwrap().result);
    }

    #[test]
    fn test_selector_cannot_pick_non_positive_responders() {
        let group = FakeGroup::open("arena");
        let a = group.add_member();
        let b = group.add_member();
        let outsider = ParticipantId::random();
        let experiment = ExperimentBuilder::new(group.clone(), ManualScheduler::new())
            .group(group.group())
            .proposition(entry())
            .evaluator(Contest::new(move |_| vec![outsider, b, a, a]))
            .execute()
            .unwrap();

        experiment.on_response(Response::new(entry(), true, a));
        experiment.on_response(Response::new(entry(), false, b));
        experiment.end();

        assert_eq!(announcements(&group)[0].winners, vec![a]);
    }

    #[test]
    fn test_repeated_end_announces_once() {
        let group = FakeGroup::open("arena");
        let experiment = ExperimentBuilder::new(group.clone(), ManualScheduler::new())
            .group(group.group())
            .proposition(entry())
            .evaluator(Contest::any(3))
            .execute()
            .unwrap();

        experiment.end();
        experiment.end();

        assert_eq!(announcements(&group).len(), 1);
        assert!(!group.is_registered(&experiment.id()));
    }

    #[test]
    fn test_any_picks_up_to_n_positive_responders() {
        let group = FakeGroup::open("arena");
        let entrants: Vec<_> = (0..3).map(|_| group.add_member()).collect();
        let loser = group.add_member();
        let experiment = ExperimentBuilder::new(group.clone(), ManualScheduler::new())
            .group(group.group())
            .proposition(entry())
            .evaluator(Contest::any(2))
            .execute()
            .unwrap();

        for entrant in &entrants {
            experiment.on_response(Response::new(entry(), true, *entrant));
        }
        experiment.on_response(Response::new(entry(), false, loser));
        experiment.end();

        let winners = announcements(&group).remove(0).winners;
        assert_eq!(winners.len(), 2);
        assert!(winners.iter().all(|w| entrants.contains(w)));
        assert_ne!(winners[0], winners[1]);
    }
}
