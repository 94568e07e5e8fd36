//! Publish target: a repository under the user's workspace root.

use crate::error::{PublishError, PublishResult};
use std::path::{Path, PathBuf};

/// A repository directory resolved from a bare name
#[derive(Debug, Clone)]
pub struct RepoTarget {
    /// Repository name as given on the command line
    pub name: String,
    /// Resolved directory, `<workspace_root>/<name>`
    pub directory: PathBuf,
}

impl RepoTarget {
    /// Resolve a repository name against the workspace root.
    ///
    /// Names must be a single path component; separators and `..` are
    /// rejected before any filesystem access.
    pub fn resolve(name: &str, workspace_root: &Path) -> PublishResult<Self> {
        if name.is_empty()
            || name == "."
            || name == ".."
            || name.contains('/')
            || name.contains('\\')
        {
            return Err(PublishError::InvalidRepositoryName(name.to_string()));
        }

        Ok(Self {
            name: name.to_string(),
            directory: workspace_root.join(name),
        })
    }

    /// Whether the resolved directory exists
    pub fn exists(&self) -> bool {
        self.directory.is_dir()
    }
}

/// Root directory holding the user's repositories.
///
/// A configured root wins; otherwise `/home/<USER>` is derived from the
/// environment, matching the original script's contract.
pub fn workspace_root(configured: Option<&Path>) -> PublishResult<PathBuf> {
    match configured {
        Some(root) => Ok(root.to_path_buf()),
        None => root_for_user(std::env::var("USER").ok().as_deref()),
    }
}

fn root_for_user(user: Option<&str>) -> PublishResult<PathBuf> {
    match user {
        Some(user) if !user.is_empty() => Ok(PathBuf::from("/home").join(user)),
        _ => Err(PublishError::NoWorkspaceRoot),
    }
}
