//! Source acquisition: local directories and cloned remotes
//!
//! A remote locator is cloned with the external `git` client into a
//! temporary directory owned by the returned [`RepoSource`]. Dropping the
//! source removes the clone, whichever way the run ends.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;
use thiserror::Error;

use crate::domain::REMOTE_HOST_MARKER;

/// Fatal errors while acquiring the root directory.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("git executable not found; install git to flatten remote repositories")]
    GitNotFound,

    #[error("failed to run git: {0}")]
    Spawn(#[source] io::Error),

    #[error("failed to create temporary directory: {0}")]
    TempDir(#[source] io::Error),

    #[error("git clone of {url} failed ({status}): {stderr}")]
    CloneFailed { url: String, status: String, stderr: String },

    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}

/// A materialized root directory ready for traversal.
#[derive(Debug)]
pub struct RepoSource {
    root: PathBuf,
    label: String,
    /// Keeps the clone alive; removed on drop
    clone_dir: Option<TempDir>,
}

impl RepoSource {
    /// Directory to walk.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Name shown in the output header: the local path or the remote URL.
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// True if the locator names a remote repository rather than a local path.
pub fn is_remote_locator(locator: &str) -> bool {
    locator.contains(REMOTE_HOST_MARKER)
}

/// Resolve a locator to a root directory, cloning it first if it is remote.
pub fn acquire_source(locator: &str, git_ref: Option<&str>) -> Result<RepoSource, FetchError> {
    if is_remote_locator(locator) {
        return clone_repository(locator, git_ref);
    }

    let root = PathBuf::from(locator);
    if !root.is_dir() {
        return Err(FetchError::NotADirectory(root));
    }
    Ok(RepoSource { label: root.display().to_string(), root, clone_dir: None })
}

/// Shallow-clone `url` into a fresh temporary directory.
pub fn clone_repository(url: &str, git_ref: Option<&str>) -> Result<RepoSource, FetchError> {
    let temp_dir = tempfile::Builder::new()
        .prefix("repo-flatten-")
        .tempdir()
        .map_err(FetchError::TempDir)?;
    let root = temp_dir.path().to_path_buf();

    let mut cmd = Command::new("git");
    cmd.arg("clone").arg("--depth").arg("1");
    if let Some(git_ref) = git_ref {
        cmd.arg("--branch").arg(git_ref);
    }
    cmd.arg(url).arg(&root).env("GIT_TERMINAL_PROMPT", "0");

    tracing::info!("Cloning {} into {}", url, root.display());
    let output = cmd.output().map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => FetchError::GitNotFound,
        _ => FetchError::Spawn(e),
    })?;

    if !output.status.success() {
        return Err(FetchError::CloneFailed {
            url: url.to_string(),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(RepoSource { root, label: url.to_string(), clone_dir: Some(temp_dir) })
}
