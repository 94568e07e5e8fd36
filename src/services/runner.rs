//! External process execution with streamed output and log persistence.
//!
//! Spawns one child at a time, mirrors its stdout/stderr to the console and
//! appends every line to a per-run log file. Draining is blocking; call it
//! off the async runtime (e.g. inside spawn_blocking).

use crate::error::{AppError, Result};
use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Output event from a running process
#[derive(Debug, Clone)]
pub enum ProcessOutput {
    /// Line from stdout
    Stdout(String),
    /// Line from stderr
    Stderr(String),
    /// Read error on a stream
    Error(String),
}

/// Handle for a spawned command
pub struct ProcessHandle {
    child: Child,
    start_time: Instant,
    output_rx: mpsc::UnboundedReceiver<ProcessOutput>,
    log_file: PathBuf,
}

impl ProcessHandle {
    /// Get elapsed time since spawn
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Get the log file path
    pub fn log_file(&self) -> &Path {
        &self.log_file
    }

    /// Drain the output streams to the console, then wait for exit.
    ///
    /// Returns the child's exit code (-1 when killed by a signal).
    pub fn run_to_completion(mut self) -> Result<i32> {
        while let Some(event) = self.output_rx.blocking_recv() {
            match event {
                ProcessOutput::Stdout(line) => println!("{}", line),
                ProcessOutput::Stderr(line) => eprintln!("{}", line),
                ProcessOutput::Error(err) => tracing::warn!("output stream error: {}", err),
            }
        }

        let status = self
            .child
            .wait()
            .map_err(|e| AppError::Process(e.to_string()))?;
        Ok(status.code().unwrap_or(-1))
    }
}

/// Service spawning external commands with persisted logs
pub struct CommandRunner {
    log_dir: PathBuf,
}

impl CommandRunner {
    /// Create a new runner writing logs under the given directory
    pub fn new(log_dir: PathBuf) -> Self {
        Self { log_dir }
    }

    fn ensure_log_dir(&self) -> Result<()> {
        if !self.log_dir.exists() {
            fs::create_dir_all(&self.log_dir).map_err(AppError::Io)?;
        }
        Ok(())
    }

    /// Generate the log file path for a labelled run
    fn log_file_path(&self, label: &str) -> PathBuf {
        let filename = format!("{}-{}.log", label, unix_timestamp());
        self.log_dir.join(filename)
    }

    /// Spawn a command with piped output and a log file.
    ///
    /// Reader threads forward each line to the returned handle and append it
    /// to the log with an [OUT]/[ERR] prefix.
    pub fn spawn(
        &self,
        program: &str,
        args: &[String],
        working_dir: &Path,
        label: &str,
    ) -> Result<ProcessHandle> {
        self.ensure_log_dir()?;

        let log_file_path = self.log_file_path(label);

        let mut log_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&log_file_path)
            .map_err(AppError::Io)?;

        writeln!(log_file, "# Command: {} {}", program, args.join(" ")).map_err(AppError::Io)?;
        writeln!(log_file, "# Started: {}", unix_timestamp()).map_err(AppError::Io)?;
        writeln!(log_file, "# Directory: {}", working_dir.display()).map_err(AppError::Io)?;
        writeln!(log_file, "---").map_err(AppError::Io)?;

        let mut child = Command::new(program)
            .args(args)
            .current_dir(working_dir)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| AppError::Process(format!("Failed to spawn {}: {}", program, e)))?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        let (output_tx, output_rx) = mpsc::unbounded_channel();

        if let Some(stdout) = stdout {
            let tx = output_tx.clone();
            let log_path = log_file_path.clone();
            std::thread::spawn(move || {
                let reader = BufReader::new(stdout);
                for line in reader.lines() {
                    match line {
                        Ok(text) => {
                            if let Ok(mut f) = OpenOptions::new().append(true).open(&log_path) {
                                let _ = writeln!(f, "[OUT] {}", text);
                            }
                            let _ = tx.send(ProcessOutput::Stdout(text));
                        }
                        Err(e) => {
                            let _ = tx.send(ProcessOutput::Error(e.to_string()));
                            break;
                        }
                    }
                }
            });
        }

        if let Some(stderr) = stderr {
            let tx = output_tx.clone();
            let log_path = log_file_path.clone();
            std::thread::spawn(move || {
                let reader = BufReader::new(stderr);
                for line in reader.lines() {
                    match line {
                        Ok(text) => {
                            if let Ok(mut f) = OpenOptions::new().append(true).open(&log_path) {
                                let _ = writeln!(f, "[ERR] {}", text);
                            }
                            let _ = tx.send(ProcessOutput::Stderr(text));
                        }
                        Err(e) => {
                            let _ = tx.send(ProcessOutput::Error(e.to_string()));
                            break;
                        }
                    }
                }
            });
        }

        Ok(ProcessHandle {
            child,
            start_time: Instant::now(),
            output_rx,
            log_file: log_file_path,
        })
    }
}

/// Seconds since the unix epoch, for log and run file names
pub(crate) fn unix_timestamp() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
