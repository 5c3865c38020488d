//! Core domain types and models
//!
//! Defines the run configuration, the per-file record handed from the scanner
//! to the writer, and the statistics reported at the end of a run.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Default per-file size ceiling, in KiB.
pub const DEFAULT_MAX_SIZE_KIB: u64 = 100;

/// Number of leading bytes inspected for a null byte.
pub const BINARY_SNIFF_BYTES: usize = 1024;

/// Number of leading bytes handed to the encoding detector.
pub const ENCODING_SNIFF_BYTES: usize = 10_000;

/// Suffix appended to the source name when no output path is given.
pub const OUTPUT_SUFFIX: &str = "_output.txt";

/// Hostname whose presence marks a locator as a remote repository.
pub const REMOTE_HOST_MARKER: &str = "github.com";

/// Directory names pruned unconditionally during traversal.
pub const EXCLUDED_DIRS: &[&str] =
    &[".git", "node_modules", ".venv", "venv", "__pycache__", "dist", "build"];

/// Returns true if a directory with this name is never descended into.
pub fn is_excluded_dir(name: &str) -> bool {
    EXCLUDED_DIRS.contains(&name)
}

/// Run configuration after config file, environment and CLI have been merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Files larger than this many KiB are skipped
    #[serde(default = "default_max_size_kib")]
    pub max_size_kib: u64,

    /// Output artifact path (derived from the source name when unset)
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Name of the root-level ignore file
    #[serde(default = "default_ignore_file")]
    pub ignore_file: String,

    /// Branch or tag to check out when cloning a remote
    #[serde(default)]
    pub git_ref: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_size_kib: DEFAULT_MAX_SIZE_KIB,
            output: None,
            ignore_file: default_ignore_file(),
            git_ref: None,
        }
    }
}

impl Config {
    /// Size ceiling in bytes.
    pub fn max_file_bytes(&self) -> u64 {
        self.max_size_kib.saturating_mul(1024)
    }
}

fn default_max_size_kib() -> u64 {
    DEFAULT_MAX_SIZE_KIB
}

fn default_ignore_file() -> String {
    ".gitignore".to_string()
}

/// Outcome of classifying a single candidate file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Under the ceiling, no null byte, not ignored
    Text,
    /// Larger than the size ceiling
    TooLarge,
    /// Null byte found in the sniffed prefix
    Binary,
    /// Matched a loaded ignore pattern
    Ignored,
    /// Size or content could not be probed
    Unreadable,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Classification::Text => "text",
            Classification::TooLarge => "size",
            Classification::Binary => "binary",
            Classification::Ignored => "ignored",
            Classification::Unreadable => "unreadable",
        };
        f.write_str(s)
    }
}

/// A file selected for output. Built per file and dropped once written.
#[derive(Debug, Clone)]
pub struct FileRecord {
    /// Absolute (or root-joined) path on disk
    pub path: PathBuf,

    /// Path relative to the root, `/`-separated
    pub relative_path: String,

    /// File size in bytes
    pub size_bytes: u64,

    /// Name of the encoding used for decoding
    pub encoding: &'static str,

    /// Decoded content (empty if the read failed)
    pub content: String,
}

/// Statistics from one flatten run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlattenStats {
    /// Files considered (after directory pruning)
    pub files_seen: usize,

    /// Files written to the output artifact
    pub files_processed: usize,

    /// Files skipped due to the size ceiling
    pub files_skipped_size: usize,

    /// Files skipped due to binary detection
    pub files_skipped_binary: usize,

    /// Files skipped due to ignore patterns
    pub files_skipped_ignored: usize,

    /// Files whose size or content could not be probed
    pub files_skipped_unreadable: usize,

    /// Files that failed while their section was being written
    pub files_failed: usize,

    /// Excluded directories pruned during the walk
    pub dirs_pruned: usize,

    /// Bytes written to the output artifact
    pub bytes_written: u64,
}

impl FlattenStats {
    /// Record a non-text classification.
    pub fn record_skip(&mut self, class: Classification) {
        match class {
            Classification::Text => {}
            Classification::TooLarge => self.files_skipped_size += 1,
            Classification::Binary => self.files_skipped_binary += 1,
            Classification::Ignored => self.files_skipped_ignored += 1,
            Classification::Unreadable => self.files_skipped_unreadable += 1,
        }
    }

    pub fn files_skipped(&self) -> usize {
        self.files_skipped_size
            + self.files_skipped_binary
            + self.files_skipped_ignored
            + self.files_skipped_unreadable
    }
}
