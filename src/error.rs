//! Unified error types for labkit.

use std::path::PathBuf;
use thiserror::Error;

/// Main application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Git error: {0}")]
    Git(#[from] GitError),

    #[error("Visualization error: {0}")]
    Viz(#[from] VizError),

    #[error("Publish error: {0}")]
    Publish(#[from] PublishError),

    #[error("Run log error: {0}")]
    RunLog(#[from] RunLogError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Process error: {0}")]
    Process(String),
}

impl AppError {
    /// Exit status for the binary.
    ///
    /// Usage and validation failures exit 1; a failed external tool exits
    /// with the child's own code so callers can distinguish git/tool failures
    /// from ours.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Git(GitError::CommandFailed { code, .. }) => *code,
            Self::Viz(VizError::ToolFailed { code }) => *code,
            _ => 1,
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Git invocation errors
#[derive(Debug, Error)]
pub enum GitError {
    #[error("`git {command}` failed with exit code {code}: {stderr}")]
    CommandFailed {
        command: String,
        code: i32,
        stderr: String,
    },

    #[error("Failed to run git: {0}")]
    Spawn(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Model visualization errors
#[derive(Debug, Error)]
pub enum VizError {
    #[error("Model file not found: {0}")]
    ModelFileNotFound(PathBuf),

    #[error("Visualization script not found: {0}")]
    ScriptNotFound(PathBuf),

    #[error("Invalid model class name: {0}")]
    InvalidClassName(String),

    #[error("Invalid input shape (expected comma-separated positive integers): {0}")]
    InvalidShape(String),

    #[error("Invalid init args (expected a {{...}} dict literal): {0}")]
    InvalidInitArgs(String),

    #[error("Invalid output format: {0}")]
    InvalidFormat(String),

    #[error("Invalid graph direction: {0}")]
    InvalidRankDir(String),

    #[error("Invalid device: {0}")]
    InvalidDevice(String),

    #[error("Visualization tool exited with code {code}")]
    ToolFailed { code: i32 },
}

/// Publish target errors
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Invalid repository name: {0}")]
    InvalidRepositoryName(String),

    #[error("Cannot determine workspace root: USER is not set and git.workspace_root is not configured")]
    NoWorkspaceRoot,

    #[error("Repository directory does not exist: {0}")]
    DirectoryNotFound(PathBuf),
}

/// Metrics run logger errors
#[derive(Debug, Error)]
pub enum RunLogError {
    #[error("Run already started: {0}")]
    AlreadyStarted(String),

    #[error("No active run; call start() first")]
    NotStarted,

    #[error("Metrics must be a JSON object")]
    NotAnObject,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, AppError>;

/// Result type alias for git operations
pub type GitResult<T> = std::result::Result<T, GitError>;

/// Result type alias for visualization operations
pub type VizResult<T> = std::result::Result<T, VizError>;

/// Result type alias for publish operations
pub type PublishResult<T> = std::result::Result<T, PublishError>;

/// Result type alias for run log operations
pub type RunLogResult<T> = std::result::Result<T, RunLogError>;
