//! Logging configuration from TOML (`[logging]` section)
//!
//! ```toml
//! [logging]
//! dir = "~/.local/state/group-poll"
//! experiment_log = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where diagnostic and experiment logs go
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Directory for the tracing log file; unset logs to stderr only
    pub dir: Option<PathBuf>,
    /// Also write a JSONL experiment log into `dir`
    pub experiment_log: bool,
}

impl FileLoggingConfig {
    /// Path of the JSONL experiment log, if enabled
    pub fn experiment_log_path(&self) -> Option<PathBuf> {
        self.dir
            .as_ref()
            .filter(|_| self.experiment_log)
            .map(|dir| dir.join("experiments.jsonl"))
    }
}
