//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod group;
mod logging;
mod output;
mod participants;
mod poll;

pub use group::FileGroupConfig;
pub use logging::FileLoggingConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use participants::FileParticipantConfig;
pub use poll::FilePollConfig;

use poll_domain::DomainError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration loading and validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("Invalid poll rule '{0}': {1}")]
    InvalidRule(String, String),

    #[error("poll.timeout_ms cannot be 0 (set poll.unbounded instead)")]
    InvalidTimeout,

    #[error("Invalid group: {0}")]
    InvalidGroup(#[from] DomainError),

    #[error("Restricted group '{0}' needs a credential")]
    MissingCredential(String),

    #[error("Participant #{0} has an empty name")]
    EmptyParticipantName(usize),

    #[error("Duplicate participant name: {0}")]
    DuplicateParticipant(String),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Strategy and timeout
    pub poll: FilePollConfig,
    /// Target group and access control
    pub group: FileGroupConfig,
    /// Simulated local participants
    pub participants: Vec<FileParticipantConfig>,
    /// Output settings
    pub output: FileOutputConfig,
    /// Log destinations
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning every detected issue.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut issues = Vec::new();

        if let Err(e) = self.poll.parse_rule() {
            issues.push(e);
        }
        if let Err(e) = self.poll.timeout() {
            issues.push(e);
        }
        if let Err(e) = self.group.group_id() {
            issues.push(e);
        }
        if let Err(e) = self.group.credential() {
            issues.push(e);
        }

        let mut seen = std::collections::HashSet::new();
        for (index, participant) in self.participants.iter().enumerate() {
            if participant.name.trim().is_empty() {
                issues.push(ConfigError::EmptyParticipantName(index));
            } else if !seen.insert(participant.name.as_str()) {
                issues.push(ConfigError::DuplicateParticipant(participant.name.clone()));
            }
        }

        issues
    }
}
