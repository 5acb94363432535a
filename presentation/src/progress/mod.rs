//! Live feedback while a poll is running

pub mod audience;
pub mod reporter;
