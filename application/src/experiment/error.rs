//! Launch failures reported by [`ExperimentBuilder::execute`](super::ExperimentBuilder::execute)

use crate::ports::group::PortError;
use poll_domain::GroupId;
use thiserror::Error;

/// Errors that prevent an experiment from starting
///
/// None of these leave anything behind: no listener stays registered, no
/// proposition is sent and no timeout is scheduled.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LaunchError {
    #[error("No target group configured")]
    MissingGroup,

    #[error("No evaluator configured")]
    MissingEvaluator,

    #[error("Access to group '{0}' denied")]
    AccessDenied(GroupId),

    #[error("Registration failed: {0}")]
    Registration(PortError),
}

impl From<PortError> for LaunchError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::AccessDenied(group) => LaunchError::AccessDenied(group),
            other => LaunchError::Registration(other),
        }
    }
}

impl LaunchError {
    /// Whether a fresh launch with different settings could succeed
    pub fn is_configuration(&self) -> bool {
        matches!(self, LaunchError::MissingGroup | LaunchError::MissingEvaluator)
    }
}
