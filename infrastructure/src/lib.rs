//! Infrastructure layer for group-poll
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod group;
pub mod knowledge;
pub mod logging;
pub mod scheduler;

// Re-export commonly used types
pub use config::{
    ConfigError, ConfigLoader, FileConfig, FileGroupConfig, FileLoggingConfig, FileOutputConfig,
    FileOutputFormat, FileParticipantConfig, FilePollConfig,
};
pub use group::{AccessPolicy, InProcessGroupBus};
pub use knowledge::InMemoryKnowledgeBase;
pub use logging::JsonlExperimentLogger;
pub use scheduler::TokioTimeoutScheduler;
