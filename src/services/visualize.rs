//! Wrapper for the external model visualization tool.
//!
//! labkit never imports the model itself; it assembles the exact command
//! line for the Python tool and runs it through the shared CommandRunner.

use crate::domain::{GraphStyle, ModelSpec};
use crate::error::{Result, VizError};
use crate::services::CommandRunner;
use std::path::PathBuf;

/// Visualization tool invocation, built from config plus CLI overrides
pub struct Visualizer {
    interpreter: String,
    script: PathBuf,
}

impl Visualizer {
    /// Create a new Visualizer
    pub fn new(interpreter: String, script: PathBuf) -> Self {
        Self {
            interpreter,
            script,
        }
    }

    /// Path to the visualization tool script
    pub fn script(&self) -> &PathBuf {
        &self.script
    }

    /// Build the tool's argv, one flag per option.
    ///
    /// Every option is passed explicitly so the invoked command line is a
    /// complete record of the run, independent of the tool's own defaults.
    pub fn build_args(&self, model: &ModelSpec, style: &GraphStyle) -> Vec<String> {
        let mut args = vec![
            self.script.to_string_lossy().into_owned(),
            "--model-file".to_string(),
            model.model_file.to_string_lossy().into_owned(),
            "--model-class".to_string(),
            model.model_class.clone(),
            "--model-init-args".to_string(),
            model.init_args.clone(),
        ];

        if model.as_obj {
            args.push("--obj".to_string());
        }

        args.push("--input-shapes".to_string());
        for shape in &model.input_shapes {
            args.push(shape.to_string());
        }

        args.extend([
            "--device".to_string(),
            model.device.to_string(),
            "--output-name".to_string(),
            style.output_name.clone(),
            "--output-dir".to_string(),
            style.output_dir.to_string_lossy().into_owned(),
            "--output-format".to_string(),
            style.format.to_string(),
            "--rankdir".to_string(),
            style.rankdir.to_string(),
            "--node-color".to_string(),
            style.node_color.clone(),
        ]);

        args
    }

    /// Run the tool, streaming its output, and return its exit code.
    pub fn run(
        &self,
        model: &ModelSpec,
        style: &GraphStyle,
        runner: &CommandRunner,
    ) -> Result<i32> {
        if !self.script.is_file() {
            return Err(VizError::ScriptNotFound(self.script.clone()).into());
        }

        let args = self.build_args(model, style);
        tracing::info!("running {} {}", self.interpreter, args.join(" "));

        let cwd = std::env::current_dir()?;
        let handle = runner.spawn(&self.interpreter, &args, &cwd, "visualize")?;
        tracing::debug!("tool log at {}", handle.log_file().display());

        handle.run_to_completion()
    }
}
