//! Application-level configuration.
//!
//! - [`PollParams`]: strategy and timeout applied to every launched poll

pub mod poll_params;

pub use poll_params::PollParams;
