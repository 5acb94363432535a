//! Poll parameters: which strategy decides and how long to wait.
//!
//! [`PollParams`] is the application-side view of the `[poll]` section of
//! the configuration file. It is applied to an [`ExperimentBuilder`] just
//! before launch.

use crate::experiment::ExperimentBuilder;
use crate::strategies::{self, BelievedByAny};
use poll_domain::PollRule;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Strategy and timeout for a poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollParams {
    /// Strategy that decides the poll.
    pub rule: PollRule,
    /// Conclude negatively after this long; `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// For `BelievedByAny`: stop once every participant said no.
    pub conclude_when_exhausted: bool,
}

impl Default for PollParams {
    fn default() -> Self {
        Self {
            rule: PollRule::default(),
            timeout: Some(Duration::from_secs(2)),
            conclude_when_exhausted: false,
        }
    }
}

impl PollParams {
    // ==================== Builder Methods ====================

    pub fn with_rule(mut self, rule: PollRule) -> Self {
        self.rule = rule;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_conclude_when_exhausted(mut self, enabled: bool) -> Self {
        self.conclude_when_exhausted = enabled;
        self
    }

    /// Attach the strategy and timeout to `builder`
    pub fn configure(&self, builder: ExperimentBuilder) -> ExperimentBuilder {
        let builder = match self.rule {
            PollRule::BelievedByAny if self.conclude_when_exhausted => {
                builder.evaluator(BelievedByAny::new().conclude_when_exhausted())
            }
            rule => strategies::with_rule(builder, rule),
        };
        match self.timeout {
            Some(timeout) => builder.end_after(timeout),
            None => builder,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::testing::{FakeGroup, ManualScheduler};
    use poll_domain::Proposition;

    #[test]
    fn test_default() {
        let params = PollParams::default();
        assert_eq!(params.rule, PollRule::BelievedByAll);
        assert_eq!(params.timeout, Some(Duration::from_secs(2)));
        assert!(!params.conclude_when_exhausted);
    }

    #[test]
    fn test_configure_arms_timeout() {
        let group = FakeGroup::open("council");
        let scheduler = ManualScheduler::new();
        let params = PollParams::default()
            .with_rule(PollRule::BelievedByAny)
            .with_timeout(Some(Duration::from_millis(300)));

        let builder = ExperimentBuilder::new(group.clone(), scheduler.clone())
            .group(group.group())
            .proposition(Proposition::new("raining").unwrap());
        params.configure(builder).execute().unwrap();

        assert_eq!(scheduler.scheduled(), vec![Duration::from_millis(300)]);
    }

    #[test]
    fn test_configure_without_timeout() {
        let group = FakeGroup::open("council");
        let scheduler = ManualScheduler::new();
        let params = PollParams::default()
            .with_rule(PollRule::BelievedByAny)
            .with_conclude_when_exhausted(true)
            .with_timeout(None);

        let builder = ExperimentBuilder::new(group.clone(), scheduler.clone())
            .group(group.group())
            .proposition(Proposition::new("raining").unwrap());
        let experiment = params.configure(builder).execute().unwrap();

        assert!(scheduler.scheduled().is_empty());
        assert!(experiment.in_progress());
    }
}
