//! Path helpers

use std::path::{Component, Path};

/// Render `path` relative to `root` with `/` separators.
///
/// Returns `None` if `path` is not under `root`.
pub fn relative_to(path: &Path, root: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    Some(normalize_path(rel))
}

/// Join the normal components of a path with `/`.
pub fn normalize_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
