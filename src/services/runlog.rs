//! JSON-lines metrics run log.
//!
//! Start/log/finish lifecycle for a named run: `start` dumps the run config,
//! `log` appends one metrics record per call, `finish` records the elapsed
//! time. Every record is mirrored through tracing so a console follower sees
//! the same stream that lands in the file.

use crate::error::{RunLogError, RunLogResult};
use crate::services::runner::unix_timestamp;
use serde_json::{json, Value};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

struct ActiveRun {
    name: String,
    file: File,
    path: PathBuf,
    started: Instant,
}

/// Metrics logger with a start/log/finish lifecycle
pub struct RunLogger {
    project: String,
    log_dir: PathBuf,
    config: Option<Value>,
    run: Option<ActiveRun>,
}

impl RunLogger {
    /// Create a logger for a project.
    ///
    /// The config value, if any, is written into the start record of every
    /// run.
    pub fn new(log_dir: PathBuf, project: impl Into<String>, config: Option<Value>) -> Self {
        Self {
            project: project.into(),
            log_dir,
            config,
            run: None,
        }
    }

    /// Path of the active run's file, if a run is open
    pub fn log_path(&self) -> Option<&PathBuf> {
        self.run.as_ref().map(|run| &run.path)
    }

    /// Open a new run file and write the start record.
    pub fn start(&mut self, run_name: &str, tags: &[String]) -> RunLogResult<()> {
        if let Some(run) = &self.run {
            return Err(RunLogError::AlreadyStarted(run.name.clone()));
        }

        if !self.log_dir.exists() {
            fs::create_dir_all(&self.log_dir)?;
        }

        let path = self
            .log_dir
            .join(format!("{}-{}-{}.jsonl", self.project, run_name, unix_timestamp()));
        let mut file = OpenOptions::new().create(true).write(true).open(&path)?;

        let record = json!({
            "event": "start",
            "project": self.project,
            "run": run_name,
            "tags": tags,
            "ts": unix_timestamp(),
            "config": self.config,
        });
        writeln!(file, "{}", serde_json::to_string(&record)?)?;
        tracing::info!("started run {} ({})", run_name, path.display());

        self.run = Some(ActiveRun {
            name: run_name.to_string(),
            file,
            path,
            started: Instant::now(),
        });
        Ok(())
    }

    /// Append one metrics record to the active run.
    pub fn log(&mut self, metrics: Value) -> RunLogResult<()> {
        let run = self.run.as_mut().ok_or(RunLogError::NotStarted)?;

        if !metrics.is_object() {
            return Err(RunLogError::NotAnObject);
        }

        let record = json!({
            "event": "metrics",
            "ts": unix_timestamp(),
            "data": metrics,
        });
        writeln!(run.file, "{}", serde_json::to_string(&record)?)?;
        tracing::info!("logged metrics for run {}: {}", run.name, record["data"]);
        Ok(())
    }

    /// Close the active run with a finish record.
    pub fn finish(&mut self) -> RunLogResult<()> {
        let mut run = self.run.take().ok_or(RunLogError::NotStarted)?;

        let record = json!({
            "event": "finish",
            "ts": unix_timestamp(),
            "elapsed_secs": run.started.elapsed().as_secs_f64(),
        });
        writeln!(run.file, "{}", serde_json::to_string(&record)?)?;
        tracing::info!("finished run {}", run.name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_lifecycle_writes_parseable_records() {
        let temp = TempDir::new().unwrap();
        let mut logger = RunLogger::new(
            temp.path().to_path_buf(),
            "visualize",
            Some(json!({"device": "cpu"})),
        );

        logger.start("encoder", &["baseline".to_string()]).unwrap();
        let path = logger.log_path().unwrap().clone();
        logger.log(json!({"exit_code": 0})).unwrap();
        logger.finish().unwrap();

        let contents = std::fs::read_to_string(path).unwrap();
        let records: Vec<Value> = contents
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0]["event"], "start");
        assert_eq!(records[0]["config"]["device"], "cpu");
        assert_eq!(records[1]["event"], "metrics");
        assert_eq!(records[1]["data"]["exit_code"], 0);
        assert_eq!(records[2]["event"], "finish");
    }

    #[test]
    fn test_log_before_start_is_rejected() {
        let temp = TempDir::new().unwrap();
        let mut logger = RunLogger::new(temp.path().to_path_buf(), "visualize", None);

        let err = logger.log(json!({"loss": 0.5})).unwrap_err();
        assert!(matches!(err, RunLogError::NotStarted));
    }

    #[test]
    fn test_double_start_is_rejected() {
        let temp = TempDir::new().unwrap();
        let mut logger = RunLogger::new(temp.path().to_path_buf(), "visualize", None);

        logger.start("first", &[]).unwrap();
        let err = logger.start("second", &[]).unwrap_err();
        assert!(matches!(err, RunLogError::AlreadyStarted(name) if name == "first"));
    }

    #[test]
    fn test_metrics_must_be_an_object() {
        let temp = TempDir::new().unwrap();
        let mut logger = RunLogger::new(temp.path().to_path_buf(), "visualize", None);

        logger.start("run", &[]).unwrap();
        let err = logger.log(json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, RunLogError::NotAnObject));
    }

    #[test]
    fn test_finish_without_run_is_rejected() {
        let temp = TempDir::new().unwrap();
        let mut logger = RunLogger::new(temp.path().to_path_buf(), "visualize", None);

        assert!(matches!(logger.finish(), Err(RunLogError::NotStarted)));
    }
}
