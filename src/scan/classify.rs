//! Per-file include/exclude decision

use std::path::Path;

use super::ignore::IgnorePatterns;
use crate::domain::Classification;
use crate::utils::is_binary_file;

/// Decide whether a file belongs in the output.
///
/// Checks run in order: size ceiling, null-byte sniff, ignore patterns.
/// Probe failures are logged and reported as [`Classification::Unreadable`].
pub fn classify_file(
    path: &Path,
    relative_path: &str,
    patterns: &IgnorePatterns,
    max_file_bytes: u64,
) -> Classification {
    let size = match std::fs::metadata(path) {
        Ok(meta) => meta.len(),
        Err(e) => {
            tracing::warn!("Error checking file {}: {}", path.display(), e);
            return Classification::Unreadable;
        }
    };
    if size > max_file_bytes {
        return Classification::TooLarge;
    }

    match is_binary_file(path) {
        Ok(true) => return Classification::Binary,
        Ok(false) => {}
        Err(e) => {
            tracing::warn!("Error checking file {}: {}", path.display(), e);
            return Classification::Unreadable;
        }
    }

    if let Some(pattern) = patterns.matching_pattern(relative_path) {
        tracing::debug!("{} ignored by pattern {:?}", relative_path, pattern);
        return Classification::Ignored;
    }

    Classification::Text
}
