//! Poll rule selection
//!
//! [`PollRule`] names one of the prebuilt strategies so that it can be chosen
//! from configuration or the command line.

use serde::{Deserialize, Serialize};

/// Which prebuilt strategy decides a poll
///
/// # Example
///
/// ```
/// use poll_domain::PollRule;
///
/// assert_eq!("all".parse::<PollRule>().unwrap(), PollRule::BelievedByAll);
/// assert_eq!("contest:2".parse::<PollRule>().unwrap(), PollRule::Contest { winners: 2 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PollRule {
    /// Every participant must believe the proposition
    #[default]
    BelievedByAll,

    /// At least one participant must believe the proposition
    BelievedByAny,

    /// No participant may believe the proposition
    BelievedByNone,

    /// Collect believers, then pick up to `winners` of them
    Contest { winners: usize },
}

impl PollRule {
    /// Get a human-readable description of this rule
    pub fn description(&self) -> String {
        match self {
            PollRule::BelievedByAll => "believed by all (unanimous)".to_string(),
            PollRule::BelievedByAny => "believed by any (at least one)".to_string(),
            PollRule::BelievedByNone => "believed by none (unanimous disbelief)".to_string(),
            PollRule::Contest { winners } => format!("contest ({} winner(s))", winners),
        }
    }

    /// Short name accepted back by [`str::parse`], as used in config files
    pub fn key(&self) -> String {
        match self {
            PollRule::BelievedByAll => "all".to_string(),
            PollRule::BelievedByAny => "any".to_string(),
            PollRule::BelievedByNone => "none".to_string(),
            PollRule::Contest { winners } => format!("contest:{}", winners),
        }
    }

    /// Whether a dissenting response can end the poll early
    pub fn short_circuits_on_dissent(&self) -> bool {
        matches!(self, PollRule::BelievedByAll | PollRule::BelievedByNone)
    }
}

impl std::fmt::Display for PollRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl std::str::FromStr for PollRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "believed_by_all" => Ok(PollRule::BelievedByAll),
            "any" | "believed_by_any" => Ok(PollRule::BelievedByAny),
            "none" | "believed_by_none" => Ok(PollRule::BelievedByNone),
            "contest" => Ok(PollRule::Contest { winners: 1 }),
            s if s.starts_with("contest:") => {
                let n: usize = s
                    .split(':')
                    .nth(1)
                    .ok_or("Missing number after contest:")?
                    .parse()
                    .map_err(|_| "Invalid winner count for contest")?;
                Ok(PollRule::Contest { winners: n })
            }
            _ => Err(format!(
                "Unknown poll rule: {}. Valid: all, any, none, contest, contest:N",
                s
            )),
        }
    }
}
