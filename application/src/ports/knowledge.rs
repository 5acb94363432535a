//! Knowledge-base port
//!
//! Used only on the responding side: a participant consults its own beliefs
//! to decide the value of the disclosure it sends back. The experiment
//! machinery never calls it.

use poll_domain::Proposition;

/// Port for a participant's belief store
pub trait KnowledgeBase: Send + Sync {
    /// Whether the proposition is provable from the current beliefs
    fn prove(&self, proposition: &Proposition) -> bool;
}
