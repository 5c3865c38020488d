//! Directory traversal with excluded-directory pruning

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::domain::is_excluded_dir;
use crate::utils::relative_to;

/// A file found during the walk, not yet classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: PathBuf,
    pub relative_path: String,
}

/// Depth-first walk yielding candidate files in filesystem order.
///
/// Excluded directories are pruned before descent. Symlinked directories are
/// listed but not followed; walk errors are logged and skipped.
pub struct TreeWalker {
    root: PathBuf,
    inner: walkdir::IntoIter,
    dirs_pruned: usize,
}

impl TreeWalker {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            inner: WalkDir::new(root).follow_links(false).into_iter(),
            dirs_pruned: 0,
        }
    }

    /// Excluded directories skipped so far.
    pub fn dirs_pruned(&self) -> usize {
        self.dirs_pruned
    }
}

impl Iterator for TreeWalker {
    type Item = Candidate;

    fn next(&mut self) -> Option<Candidate> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };
            if entry.depth() == 0 {
                continue;
            }

            if entry.file_type().is_dir() {
                let name = entry.file_name().to_string_lossy();
                if is_excluded_dir(&name) {
                    tracing::debug!("Pruning {}", entry.path().display());
                    self.inner.skip_current_dir();
                    self.dirs_pruned += 1;
                }
                continue;
            }
            if entry.path_is_symlink() && entry.path().is_dir() {
                continue;
            }

            let Some(relative_path) = relative_to(entry.path(), &self.root) else {
                continue;
            };
            return Some(Candidate { path: entry.into_path(), relative_path });
        }
    }
}
