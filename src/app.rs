//! Command handlers wiring configuration, domain validation and services.

use crate::cli::{Cli, Commands, PublishArgs, VisualizeArgs};
use crate::config::ToolConfig;
use crate::domain::{workspace_root, GraphStyle, ModelSpec, RepoTarget};
use crate::error::{PublishError, Result, VizError};
use crate::services::{CommandRunner, GitService, RunLogger, Visualizer};
use serde_json::json;

/// Dispatch the parsed command line.
pub fn run(cli: Cli, config: ToolConfig) -> Result<()> {
    match cli.command {
        Commands::Visualize(args) => run_visualize(args, &config),
        Commands::Publish(args) => run_publish(args, &config),
    }
}

/// Render a model graph through the external visualization tool.
fn run_visualize(args: VisualizeArgs, config: &ToolConfig) -> Result<()> {
    let model = ModelSpec::new(
        args.model_file,
        args.model_class,
        args.model_init_args,
        args.obj,
        args.input_shapes,
        args.device,
    )?;
    let style = GraphStyle {
        rankdir: args.rankdir,
        node_color: args.node_color,
        output_dir: args.output_dir,
        output_name: args.output_name,
        format: args.output_format,
    };

    let script = args.script.unwrap_or_else(|| config.python.script.clone());
    let visualizer = Visualizer::new(config.python.interpreter.clone(), script);

    let log_dir = config.log_dir();
    let runner = CommandRunner::new(log_dir.clone());

    let mut runs = RunLogger::new(
        log_dir,
        "visualize",
        Some(json!({
            "model_file": model.model_file,
            "model_class": model.model_class,
            "init_args": model.init_args,
            "input_shapes": model.input_shapes.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
            "device": model.device.to_string(),
            "rankdir": style.rankdir.to_string(),
            "node_color": style.node_color,
            "output": style.output_path(),
        })),
    );
    runs.start(&style.output_name, &[])?;

    let code = visualizer.run(&model, &style, &runner)?;
    runs.log(json!({ "exit_code": code }))?;
    runs.finish()?;

    if code != 0 {
        return Err(VizError::ToolFailed { code }.into());
    }

    tracing::info!("graph expected at {}", style.output_path().display());
    Ok(())
}

/// Stage, commit and push a repository from the user workspace.
fn run_publish(args: PublishArgs, config: &ToolConfig) -> Result<()> {
    let root = workspace_root(config.git.workspace_root.as_deref())?;
    let target = RepoTarget::resolve(&args.repository, &root)?;

    if !target.exists() {
        return Err(PublishError::DirectoryNotFound(target.directory).into());
    }

    let remote = args.remote.unwrap_or_else(|| config.git.remote.clone());
    let git = GitService::new(target.directory.clone());
    git.publish(&args.message, &remote, &args.branch)?;

    println!("Published {} to {}/{}", target.name, remote, args.branch);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use std::path::PathBuf;

    fn publish_args(repository: &str) -> PublishArgs {
        PublishArgs {
            repository: repository.to_string(),
            message: "msg".to_string(),
            branch: "main".to_string(),
            remote: None,
        }
    }

    #[test]
    fn test_publish_rejects_missing_directory_before_git_runs() {
        let temp = tempfile::tempdir().unwrap();
        let mut config = ToolConfig::default();
        config.git.workspace_root = Some(temp.path().to_path_buf());

        let err = run_publish(publish_args("ghost"), &config).unwrap_err();
        match err {
            AppError::Publish(PublishError::DirectoryNotFound(dir)) => {
                assert_eq!(dir, temp.path().join("ghost"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(
            AppError::Publish(PublishError::DirectoryNotFound(PathBuf::new())).exit_code(),
            1
        );
    }

    #[test]
    fn test_publish_rejects_separator_in_repository_name() {
        let temp = tempfile::tempdir().unwrap();
        let mut config = ToolConfig::default();
        config.git.workspace_root = Some(temp.path().to_path_buf());

        let err = run_publish(publish_args("../etc"), &config).unwrap_err();
        assert!(matches!(
            err,
            AppError::Publish(PublishError::InvalidRepositoryName(_))
        ));
    }
}
