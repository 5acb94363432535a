//! Presentation layer for group-poll
//!
//! This crate contains the CLI definition, the report formatters and the
//! live reporters that echo a running poll on the terminal.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormat, ParticipantSpec};
pub use output::console::ConsoleFormatter;
pub use output::formatter::OutputFormatter;
pub use output::report::{ContestSummary, PollReport};
pub use progress::audience::Audience;
pub use progress::reporter::ConsoleEventReporter;
