//! Configuration file loading for group-poll
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `POLL_` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./poll.toml` or `./.poll.toml`
//! 4. Global: `$XDG_CONFIG_HOME/group-poll/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigError, FileConfig, FileGroupConfig, FileLoggingConfig, FileOutputConfig,
    FileOutputFormat, FileParticipantConfig, FilePollConfig,
};
pub use loader::ConfigLoader;
