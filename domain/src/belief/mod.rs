//! Belief messages exchanged inside a group
//!
//! - [`proposition::Proposition`]: the statement being polled
//! - [`disclosure::Disclosure`]: a participant's boolean answer on the wire
//! - [`disclosure::Response`]: a disclosure correlated with its respondent at receipt
//! - [`disclosure::GroupEvent`] / [`disclosure::Envelope`]: what the transport carries

pub mod disclosure;
pub mod proposition;
pub mod term;

pub use disclosure::{Disclosure, Envelope, GroupEvent, Response};
pub use proposition::Proposition;
pub use term::Term;
