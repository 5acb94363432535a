//! Experiment engine
//!
//! [`ExperimentBuilder`] assembles and launches an [`Experiment`]; an
//! [`Evaluator`] decides, response by response, when it concludes.

mod builder;
mod error;
mod evaluator;
#[allow(clippy::module_inception)]
mod experiment;

pub use builder::ExperimentBuilder;
pub use error::LaunchError;
pub use evaluator::{Conclusion, Evaluator};
pub use experiment::{Experiment, ExperimentBallot, OutcomeCallback, ResultCallback};
