//! Command-line definitions for labkit.

use crate::domain::{Device, InputShape, OutputFormat, RankDir};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "labkit",
    version,
    about = "Command-line toolkit for ML experiment repositories",
    long_about = "labkit wraps the chores of an ML experiment repository: rendering a \
    model graph through the Python visualization tool, and publishing a repository \
    from the user workspace with a fixed add/commit/push sequence."
)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to an explicit configuration file")]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable info-level logging")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        name = "visualize",
        about = "Render a model graph via the Python visualization tool",
        long_about = "Builds the command line for the external visualization tool from the \
        given model and graph options, runs it, and records the run in the metrics log."
    )]
    Visualize(VisualizeArgs),

    #[command(
        name = "publish",
        about = "Stage, commit and push a repository from the user workspace",
        long_about = "Resolves <REPOSITORY> under the workspace root (/home/<USER> unless \
        configured), then runs `git add .`, `git commit -m <MESSAGE>` and \
        `git push <remote> <BRANCH>` in that order."
    )]
    Publish(PublishArgs),
}

/// Options mirroring the visualization tool's interface
#[derive(Args, Debug)]
pub struct VisualizeArgs {
    #[arg(long, value_name = "PATH", help = "Python file that defines the model class")]
    pub model_file: PathBuf,

    #[arg(long, value_name = "NAME", help = "Model class inside the model file")]
    pub model_class: String,

    #[arg(
        long,
        value_name = "DICT",
        default_value = "{}",
        help = "Constructor args for the model, as a Python dict literal"
    )]
    pub model_init_args: String,

    #[arg(long, help = "Convert a loaded config dict into a dot-accessible object")]
    pub obj: bool,

    #[arg(
        long,
        value_name = "SHAPE",
        num_args = 1..,
        default_value = "1,10",
        help = "One or more comma-separated input shapes, e.g. 1,80,10"
    )]
    pub input_shapes: Vec<InputShape>,

    #[arg(long, default_value_t = Device::Cuda, help = "Device to run the model on (cpu or cuda)")]
    pub device: Device,

    #[arg(
        long,
        value_name = "NAME",
        default_value = "model_graph",
        help = "Base name for the output graph file, no extension"
    )]
    pub output_name: String,

    #[arg(
        long,
        value_name = "DIR",
        default_value = ".",
        help = "Directory to save the output graph file"
    )]
    pub output_dir: PathBuf,

    #[arg(long, default_value_t = OutputFormat::Png, help = "Output file format (png, svg, pdf, dot)")]
    pub output_format: OutputFormat,

    #[arg(long, default_value_t = RankDir::Tb, help = "Graph layout direction (TB, LR, BT, RL)")]
    pub rankdir: RankDir,

    #[arg(
        long,
        value_name = "COLOR",
        default_value = "lightblue",
        help = "Node color in the rendered graph"
    )]
    pub node_color: String,

    #[arg(
        long,
        value_name = "PATH",
        help = "Path to the visualization tool, overriding configuration"
    )]
    pub script: Option<PathBuf>,
}

/// Positional arguments of the publish sequence
#[derive(Args, Debug)]
pub struct PublishArgs {
    #[arg(index = 1, help = "Repository name under the workspace root")]
    pub repository: String,

    #[arg(index = 2, help = "Commit message")]
    pub message: String,

    #[arg(index = 3, help = "Branch to push to")]
    pub branch: String,

    #[arg(long, value_name = "NAME", help = "Remote to push to (default from configuration)")]
    pub remote: Option<String>,
}
