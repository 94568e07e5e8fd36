//! Model description for the visualization tool invocation.

use crate::error::{VizError, VizResult};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// A dummy-input tensor shape, e.g. `1,80,10`.
///
/// The visualization tool materializes one random tensor per shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputShape(Vec<u32>);

impl InputShape {
    /// Create a shape from explicit dimensions
    pub fn new(dims: Vec<u32>) -> VizResult<Self> {
        if dims.is_empty() || dims.contains(&0) {
            return Err(VizError::InvalidShape(
                dims.iter()
                    .map(|d| d.to_string())
                    .collect::<Vec<_>>()
                    .join(","),
            ));
        }
        Ok(Self(dims))
    }

    /// Dimensions of the shape
    pub fn dims(&self) -> &[u32] {
        &self.0
    }
}

impl FromStr for InputShape {
    type Err = VizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let dims = s
            .split(',')
            .map(|part| part.trim().parse::<u32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| VizError::InvalidShape(s.to_string()))?;
        Self::new(dims).map_err(|_| VizError::InvalidShape(s.to_string()))
    }
}

impl std::fmt::Display for InputShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|d| d.to_string()).collect();
        write!(f, "{}", parts.join(","))
    }
}

/// Device the model is run on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Device {
    Cpu,
    /// Tool default; the tool itself falls back to CPU when CUDA is absent
    #[default]
    Cuda,
}

impl FromStr for Device {
    type Err = VizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cpu" => Ok(Self::Cpu),
            "cuda" => Ok(Self::Cuda),
            _ => Err(VizError::InvalidDevice(s.to_string())),
        }
    }
}

impl std::fmt::Display for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cpu => write!(f, "cpu"),
            Self::Cuda => write!(f, "cuda"),
        }
    }
}

/// The model handed to the external visualization tool
#[derive(Debug, Clone)]
pub struct ModelSpec {
    /// Python file defining the model class
    pub model_file: PathBuf,
    /// Class name inside the model file
    pub model_class: String,
    /// Constructor args as a Python dict literal, passed through verbatim
    pub init_args: String,
    /// Convert a loaded config dict into a dot-accessible object
    pub as_obj: bool,
    /// One dummy tensor per shape
    pub input_shapes: Vec<InputShape>,
    /// Device to run on
    pub device: Device,
}

impl ModelSpec {
    /// Validate and assemble a model description.
    ///
    /// The dict literal is only checked for `{...}` delimiters; the tool owns
    /// full parsing of its contents.
    pub fn new(
        model_file: PathBuf,
        model_class: String,
        init_args: String,
        as_obj: bool,
        input_shapes: Vec<InputShape>,
        device: Device,
    ) -> VizResult<Self> {
        if !model_file.is_file() {
            return Err(VizError::ModelFileNotFound(model_file));
        }

        let class_re = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap();
        if !class_re.is_match(&model_class) {
            return Err(VizError::InvalidClassName(model_class));
        }

        let trimmed = init_args.trim();
        if !(trimmed.starts_with('{') && trimmed.ends_with('}')) {
            return Err(VizError::InvalidInitArgs(init_args));
        }

        if input_shapes.is_empty() {
            return Err(VizError::InvalidShape(String::new()));
        }

        Ok(Self {
            model_file,
            model_class,
            init_args: trimmed.to_string(),
            as_obj,
            input_shapes,
            device,
        })
    }

    /// Whether any constructor args were supplied
    pub fn has_init_args(&self) -> bool {
        self.init_args != "{}"
    }
}
