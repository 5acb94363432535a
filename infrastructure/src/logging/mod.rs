//! Logging infrastructure: structured experiment logging.
//!
//! Provides [`JsonlExperimentLogger`], a JSONL file writer that implements
//! the [`ExperimentLogger`](poll_application::ExperimentLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlExperimentLogger;
