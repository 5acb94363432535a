//! Application layer for group-poll
//!
//! This crate contains the experiment engine, the prebuilt strategies, the
//! belief-socialisation use cases and the port definitions they rely on.
//! It depends only on the domain layer.

pub mod config;
pub mod experiment;
pub mod ports;
pub mod strategies;
pub mod use_cases;

// Re-export commonly used types
pub use config::PollParams;
pub use experiment::{
    Conclusion, Evaluator, Experiment, ExperimentBallot, ExperimentBuilder, LaunchError,
};
pub use ports::{
    experiment_logger::{
        CompositeExperimentLogger, ExperimentEvent, ExperimentLogger, NoExperimentLogger,
    },
    group::{GroupListener, GroupPort, PortError},
    knowledge::KnowledgeBase,
    scheduler::{TimeoutScheduler, TimeoutTask},
};
pub use strategies::{BelievedByAll, BelievedByAny, BelievedByNone, Contest};
pub use use_cases::respond::BeliefResponder;
pub use use_cases::socialise::{BeliefSocialisation, SocialiseError};
