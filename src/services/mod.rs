//! Infrastructure services for labkit.
//!
//! This module contains:
//! - GitService: the publish sequence against the git CLI
//! - CommandRunner: external process execution and streaming
//! - Visualizer: the visualization tool wrapper
//! - RunLogger: JSON-lines metrics run log

mod git;
mod runlog;
pub mod runner;
mod visualize;

pub use git::GitService;
pub use runlog::RunLogger;
pub use runner::{CommandRunner, ProcessHandle, ProcessOutput};
pub use visualize::Visualizer;
