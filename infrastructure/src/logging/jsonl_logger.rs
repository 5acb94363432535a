//! JSONL file writer for experiment events.
//!
//! One line per [`ExperimentEvent`]:
//!
//! ```json
//! {"seq":3,"timestamp":"2026-01-01T12:00:00.000Z","event":"concluded","experiment":"8c1f..","data":{"result":true}}
//! ```
//!
//! The `experiment` id is lifted out of the payload so lines from
//! interleaved polls can be grouped without parsing `data`. `seq` counts
//! lines written through this logger, starting at 1.

use poll_application::ports::experiment_logger::{ExperimentEvent, ExperimentLogger};
use serde::Serialize;
use serde_json::Value;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

#[derive(Debug, Serialize)]
struct ExperimentRecord {
    seq: u64,
    timestamp: String,
    event: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    experiment: Option<Value>,
    data: Value,
}

impl ExperimentRecord {
    fn new(seq: u64, event: ExperimentEvent) -> Self {
        let mut data = event.payload;
        let experiment = match &mut data {
            Value::Object(map) => map.remove("experiment"),
            _ => None,
        };
        Self {
            seq,
            timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            event: event.event_type,
            experiment,
            data,
        }
    }
}

fn write_line(writer: &mut BufWriter<File>, record: &ExperimentRecord) -> io::Result<()> {
    serde_json::to_writer(&mut *writer, record)?;
    writer.write_all(b"\n")?;
    writer.flush()
}

struct Sink {
    writer: BufWriter<File>,
    written: u64,
}

/// Appends experiment events to a JSONL file
pub struct JsonlExperimentLogger {
    sink: Mutex<Sink>,
    path: PathBuf,
}

impl JsonlExperimentLogger {
    /// Open (or create) the log at `path` for appending, creating parent directories
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            sink: Mutex::new(Sink {
                writer: BufWriter::new(file),
                written: 0,
            }),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ExperimentLogger for JsonlExperimentLogger {
    fn log(&self, event: ExperimentEvent) {
        let mut sink = self.sink.lock().unwrap_or_else(|e| e.into_inner());
        let record = ExperimentRecord::new(sink.written + 1, event);

        match write_line(&mut sink.writer, &record) {
            Ok(()) => sink.written += 1,
            Err(e) => warn!(
                path = %self.path.display(),
                event = record.event,
                "Could not write experiment log: {}",
                e
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn read_lines(path: &Path) -> Vec<Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_experiment_id_is_lifted_out_of_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("polls/experiments.jsonl");
        let logger = JsonlExperimentLogger::open(&path).unwrap();

        logger.log(ExperimentEvent::new(
            "launched",
            json!({ "experiment": "e-1", "group": "council", "propositions": 1 }),
        ));
        logger.log(ExperimentEvent::new(
            "concluded",
            json!({ "experiment": "e-1", "result": true, "reason": "decided" }),
        ));
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["event"], "launched");
        assert_eq!(records[0]["experiment"], "e-1");
        assert_eq!(records[0]["data"], json!({ "group": "council", "propositions": 1 }));
        assert_eq!(records[1]["event"], "concluded");
        assert_eq!(records[1]["data"]["result"], true);
        assert!(records[1]["data"].get("experiment").is_none());
        assert_eq!(records[0]["seq"], 1);
        assert_eq!(records[1]["seq"], 2);
        assert!(records.iter().all(|r| r["timestamp"].is_string()));
    }

    #[test]
    fn test_payload_without_experiment_is_kept_whole() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("experiments.jsonl");
        let logger = JsonlExperimentLogger::open(&path).unwrap();

        logger.log(ExperimentEvent::new("announcement", json!(["gold"])));
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records[0]["event"], "announcement");
        assert!(records[0].get("experiment").is_none());
        assert_eq!(records[0]["data"], json!(["gold"]));
    }

    #[test]
    fn test_reopening_appends_and_restarts_seq() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("experiments.jsonl");

        for _ in 0..2 {
            let logger = JsonlExperimentLogger::open(&path).unwrap();
            logger.log(ExperimentEvent::new("launched", json!({})));
        }

        let records = read_lines(&path);
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r["seq"] == 1));
    }

    #[test]
    fn test_open_fails_when_parent_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();

        assert!(JsonlExperimentLogger::open(blocker.join("experiments.jsonl")).is_err());
    }
}
