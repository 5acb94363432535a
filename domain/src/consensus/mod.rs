//! Consensus rules for group polls
//!
//! Only unanimity, existence and custom winner selection are provided; there
//! are no numeric thresholds. Every rule is evaluated against the *current*
//! membership of the response scope.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Rule              Concludes true when     Concludes false   │
//! ├──────────────────────────────────────────────────────────────┤
//! │  all(expected)     positives ⊇ members     first dissenter   │
//! │  any               first believer          timeout only      │
//! │  none              == all(false)                             │
//! │  contest(n)        selector over positives at conclusion     │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod rule;
pub mod tally;

pub use rule::PollRule;
pub use tally::covers;
