//! Configuration management for labkit.
//!
//! Supports layered configuration: defaults → project → user → env

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolConfig {
    #[serde(default)]
    pub python: PythonConfig,
    #[serde(default)]
    pub git: GitConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl ToolConfig {
    /// Load configuration with hierarchy: defaults → project → user → env.
    ///
    /// An explicit file (from `--config`) is layered on top of project and
    /// user files; environment variables still win.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        use config::{Config, Environment, File};

        let mut builder = Config::builder();

        // 1. Start with defaults
        builder = builder.add_source(
            config::File::from_str(
                include_str!("../default_config.toml"),
                config::FileFormat::Toml,
            )
            .required(false),
        );

        // 2. Project-specific config (.labkit.toml in the working directory)
        let project_config = PathBuf::from(".labkit.toml");
        if project_config.exists() {
            builder = builder.add_source(File::from(project_config).required(false));
        }

        // 3. User config (~/.config/labkit/config.toml)
        if let Some(dirs) = directories::ProjectDirs::from("com", "labkit", "labkit") {
            let user_config = dirs.config_dir().join("config.toml");
            if user_config.exists() {
                builder = builder.add_source(File::from(user_config).required(false));
            }
        }

        // 4. Explicit file from the command line
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            builder = builder.add_source(File::from(path.to_path_buf()).required(true));
        }

        // 5. Environment variables (LABKIT_*)
        builder = builder.add_source(
            Environment::with_prefix("LABKIT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| ConfigError::Parse(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Directory for run and process logs.
    ///
    /// Configured value, or the platform data-local dir, or `.labkit/logs`
    /// when no home directory can be determined.
    pub fn log_dir(&self) -> PathBuf {
        if let Some(dir) = &self.log.directory {
            return dir.clone();
        }
        directories::ProjectDirs::from("com", "labkit", "labkit")
            .map(|dirs| dirs.data_local_dir().join("logs"))
            .unwrap_or_else(|| PathBuf::from(".labkit/logs"))
    }
}

/// Python tool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PythonConfig {
    /// Interpreter used to run the visualization tool
    #[serde(default = "default_interpreter")]
    pub interpreter: String,
    /// Path to the visualization tool script
    #[serde(default = "default_script")]
    pub script: PathBuf,
}

impl Default for PythonConfig {
    fn default() -> Self {
        Self {
            interpreter: default_interpreter(),
            script: default_script(),
        }
    }
}

fn default_interpreter() -> String {
    "python3".to_string()
}

fn default_script() -> PathBuf {
    PathBuf::from("scripts/model_visualization.py")
}

/// Git-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitConfig {
    /// Remote pushed to by `labkit publish`
    #[serde(default = "default_remote")]
    pub remote: String,
    /// Root directory holding the user's repositories.
    /// When unset, `/home/<USER>` is derived from the environment.
    #[serde(default)]
    pub workspace_root: Option<PathBuf>,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            remote: default_remote(),
            workspace_root: None,
        }
    }
}

fn default_remote() -> String {
    "origin".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogConfig {
    /// Directory for run and process logs
    #[serde(default)]
    pub directory: Option<PathBuf>,
}
