//! Output formatting for poll results

pub mod console;
pub mod formatter;
pub mod report;
