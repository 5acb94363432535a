//! Prebuilt consensus strategies
//!
//! | Strategy | Concludes `true` | Concludes `false` |
//! |----------|------------------|-------------------|
//! | [`BelievedByAll`] | every participant agrees | first dissent, or timeout |
//! | [`BelievedByAny`] | first believer | timeout |
//! | [`BelievedByNone`] | every participant disbelieves | first believer, or timeout |
//! | [`Contest`] | when the owner finalizes | timeout or `end()`; winners are announced either way |
//!
//! The launchers below take a builder already carrying the group, scope,
//! credential and timeout, and add the proposition and strategy. Contests
//! are launched through the builder directly with [`Contest`] as evaluator.

mod believed_by;
mod contest;

pub use believed_by::{BelievedByAll, BelievedByAny, BelievedByNone};
pub use contest::{Contest, WinnerSelector};

use crate::experiment::{Experiment, ExperimentBuilder, LaunchError};
use poll_domain::{PollRule, Proposition};
use std::sync::Arc;

/// Poll whether every participant believes `proposition`
pub fn is_believed_by_all(
    builder: ExperimentBuilder,
    proposition: Proposition,
    on_result: impl FnOnce(bool) + Send + 'static,
) -> Result<Arc<Experiment>, LaunchError> {
    builder
        .proposition(proposition)
        .evaluator(BelievedByAll::new(true))
        .on_result(on_result)
        .execute()
}

/// Poll whether at least one participant believes `proposition`
pub fn is_believed_by_any(
    builder: ExperimentBuilder,
    proposition: Proposition,
    on_result: impl FnOnce(bool) + Send + 'static,
) -> Result<Arc<Experiment>, LaunchError> {
    builder
        .proposition(proposition)
        .evaluator(BelievedByAny::new())
        .on_result(on_result)
        .execute()
}

/// Poll whether no participant believes `proposition`
pub fn is_believed_by_none(
    builder: ExperimentBuilder,
    proposition: Proposition,
    on_result: impl FnOnce(bool) + Send + 'static,
) -> Result<Arc<Experiment>, LaunchError> {
    builder
        .proposition(proposition)
        .evaluator(BelievedByNone::new())
        .on_result(on_result)
        .execute()
}

/// Attach the strategy a [`PollRule`] names
///
/// Contests built this way pick an arbitrary `winners` of the positive
/// responders; use [`Contest::new`] for a specific selection.
pub fn with_rule(builder: ExperimentBuilder, rule: PollRule) -> ExperimentBuilder {
    match rule {
        PollRule::BelievedByAll => builder.evaluator(BelievedByAll::new(true)),
        PollRule::BelievedByAny => builder.evaluator(BelievedByAny::new()),
        PollRule::BelievedByNone => builder.evaluator(BelievedByNone::new()),
        PollRule::Contest { winners } => builder.evaluator(Contest::any(winners)),
    }
}
