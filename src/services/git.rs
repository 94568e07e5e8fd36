//! Git service for the publish sequence.
//!
//! Uses the git CLI via std::process::Command. All operations are blocking
//! and run with the repository directory as the working directory; there is
//! deliberately no repository pre-check beyond directory existence, so a
//! non-repository directory fails inside git with git's own exit code.

use crate::error::{GitError, GitResult};
use std::path::{Path, PathBuf};

/// Git service bound to one repository directory
pub struct GitService {
    repo_path: PathBuf,
}

impl GitService {
    /// Create a new GitService for a repository directory
    pub fn new(repo_path: PathBuf) -> Self {
        Self { repo_path }
    }

    /// Get the repository path
    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }

    /// Stage every change in the repository
    pub fn stage_all(&self) -> GitResult<()> {
        self.run(&["add", "."])
    }

    /// Commit the staged changes with the given message
    pub fn commit(&self, message: &str) -> GitResult<()> {
        self.run(&["commit", "-m", message])
    }

    /// Push the given branch to a remote
    pub fn push(&self, remote: &str, branch: &str) -> GitResult<()> {
        self.run(&["push", remote, branch])
    }

    /// Stage, commit and push, in that order, stopping at the first failure
    pub fn publish(&self, message: &str, remote: &str, branch: &str) -> GitResult<()> {
        tracing::info!("staging changes in {}", self.repo_path.display());
        self.stage_all()?;
        tracing::info!("committing: {}", message);
        self.commit(message)?;
        tracing::info!("pushing {} to {}", branch, remote);
        self.push(remote, branch)
    }

    fn run(&self, args: &[&str]) -> GitResult<()> {
        let output = std::process::Command::new("git")
            .args(args)
            .current_dir(&self.repo_path)
            .output()
            .map_err(|e| GitError::Spawn(format!("git {}: {}", args.join(" "), e)))?;

        // git writes progress and summaries to stdout; keep them visible
        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            print!("{}", stdout);
        }

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command: args.join(" "),
                code: output.status.code().unwrap_or(1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, PathBuf) {
        let temp = TempDir::new().unwrap();
        let path = temp.path().to_path_buf();

        std::process::Command::new("git")
            .args(["init"])
            .current_dir(&path)
            .output()
            .unwrap();

        std::process::Command::new("git")
            .args(["config", "user.email", "test@test.com"])
            .current_dir(&path)
            .output()
            .unwrap();
        std::process::Command::new("git")
            .args(["config", "user.name", "Test"])
            .current_dir(&path)
            .output()
            .unwrap();

        (temp, path)
    }

    fn last_commit_subject(path: &Path) -> String {
        let output = std::process::Command::new("git")
            .args(["log", "-1", "--format=%s"])
            .current_dir(path)
            .output()
            .unwrap();
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    #[test]
    fn test_stage_and_commit() {
        let (_temp, path) = create_test_repo();
        std::fs::write(path.join("metrics.csv"), "epoch,loss\n1,0.5\n").unwrap();

        let git = GitService::new(path.clone());
        git.stage_all().unwrap();
        git.commit("record first epoch").unwrap();

        assert_eq!(last_commit_subject(&path), "record first epoch");
    }

    #[test]
    fn test_commit_with_nothing_staged_fails_with_git_exit_code() {
        let (_temp, path) = create_test_repo();

        let git = GitService::new(path);
        git.stage_all().unwrap();
        let err = git.commit("empty").unwrap_err();

        match err {
            GitError::CommandFailed { command, code, .. } => {
                assert!(command.starts_with("commit"));
                assert_ne!(code, 0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_push_without_remote_fails() {
        let (_temp, path) = create_test_repo();
        std::fs::write(path.join("notes.md"), "# notes\n").unwrap();

        let git = GitService::new(path);
        git.stage_all().unwrap();
        git.commit("add notes").unwrap();

        let err = git.push("origin", "main").unwrap_err();
        assert!(matches!(err, GitError::CommandFailed { .. }));
    }
}
