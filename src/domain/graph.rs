//! Layout and output options for the rendered model graph.

use crate::error::VizError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// Graphviz layout direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RankDir {
    /// Top to bottom (tool default)
    #[default]
    Tb,
    /// Left to right
    Lr,
    /// Bottom to top
    Bt,
    /// Right to left
    Rl,
}

impl FromStr for RankDir {
    type Err = VizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "TB" => Ok(Self::Tb),
            "LR" => Ok(Self::Lr),
            "BT" => Ok(Self::Bt),
            "RL" => Ok(Self::Rl),
            _ => Err(VizError::InvalidRankDir(s.to_string())),
        }
    }
}

impl std::fmt::Display for RankDir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tb => write!(f, "TB"),
            Self::Lr => write!(f, "LR"),
            Self::Bt => write!(f, "BT"),
            Self::Rl => write!(f, "RL"),
        }
    }
}

/// Output file format for the rendered graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    #[default]
    Png,
    Svg,
    Pdf,
    Dot,
}

impl OutputFormat {
    /// File extension appended by the tool
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
            Self::Pdf => "pdf",
            Self::Dot => "dot",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = VizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "svg" => Ok(Self::Svg),
            "pdf" => Ok(Self::Pdf),
            "dot" => Ok(Self::Dot),
            _ => Err(VizError::InvalidFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Style and destination of the rendered graph
#[derive(Debug, Clone)]
pub struct GraphStyle {
    /// Layout direction
    pub rankdir: RankDir,
    /// Node fill color
    pub node_color: String,
    /// Directory the graph file is written to
    pub output_dir: PathBuf,
    /// Base name, no extension
    pub output_name: String,
    /// Output file format
    pub format: OutputFormat,
}

impl GraphStyle {
    /// Path the tool will write the rendered graph to
    pub fn output_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", self.output_name, self.format.extension()))
    }
}
