//! Traverse-and-emit pipeline
//!
//! Walks the root, classifies each candidate against the ignore set and size
//! ceiling, and appends every text file to the output artifact in walk order.

use anyhow::{Context, Result};
use indicatif::ProgressBar;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::domain::{Classification, FileRecord, FlattenStats, DEFAULT_MAX_SIZE_KIB};
use crate::render::ArtifactWriter;
use crate::scan::{classify_file, Candidate, IgnorePatterns, TreeWalker};
use crate::utils::read_file_safe;

/// Flattens one root directory into one artifact.
pub struct Flattener {
    root: PathBuf,
    max_file_bytes: u64,
    ignore_file: String,
    progress: ProgressBar,
}

impl Flattener {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            max_file_bytes: DEFAULT_MAX_SIZE_KIB * 1024,
            ignore_file: ".gitignore".to_string(),
            progress: ProgressBar::hidden(),
        }
    }

    pub fn max_file_bytes(mut self, bytes: u64) -> Self {
        self.max_file_bytes = bytes;
        self
    }

    pub fn ignore_file(mut self, name: impl Into<String>) -> Self {
        self.ignore_file = name.into();
        self
    }

    pub fn progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Write the artifact for this root to `output`, headed by `label`.
    ///
    /// Only opening, heading or flushing the output is fatal; per-file
    /// failures are logged and the walk continues. The progress line is
    /// cleared on every exit path.
    pub fn run(&self, label: &str, output: &Path) -> Result<FlattenStats> {
        let result = self.write_artifact(label, output);
        self.progress.finish_and_clear();
        result
    }

    fn write_artifact(&self, label: &str, output: &Path) -> Result<FlattenStats> {
        let patterns = IgnorePatterns::load(&self.root, &self.ignore_file);

        let mut writer = ArtifactWriter::create(output)?;
        writer
            .write_header(label)
            .with_context(|| format!("Failed to write to {}", output.display()))?;
        let output_canonical = output.canonicalize().ok();

        let mut stats = FlattenStats::default();
        let mut walker = TreeWalker::new(&self.root);
        for candidate in walker.by_ref() {
            stats.files_seen += 1;
            self.progress.set_message(candidate.relative_path.clone());
            self.progress.tick();

            if is_same_file(&candidate.path, output, output_canonical.as_deref()) {
                tracing::debug!("Skipping output artifact {}", candidate.relative_path);
                continue;
            }

            let class = classify_file(
                &candidate.path,
                &candidate.relative_path,
                &patterns,
                self.max_file_bytes,
            );
            if class != Classification::Text {
                tracing::debug!("Excluded {} ({})", candidate.relative_path, class);
                stats.record_skip(class);
                continue;
            }

            let record = load_record(candidate);
            tracing::debug!(
                "Including {} ({} bytes, {})",
                record.relative_path,
                record.size_bytes,
                record.encoding
            );
            if let Err(e) = emit_record(&mut writer, &record) {
                tracing::error!("Error processing {}: {}", record.path.display(), e);
                stats.files_failed += 1;
                continue;
            }
            stats.files_processed += 1;
        }
        stats.dirs_pruned = walker.dirs_pruned();
        stats.bytes_written = writer.bytes_written();

        writer.finish().with_context(|| format!("Failed to flush {}", output.display()))?;
        Ok(stats)
    }
}

/// Convenience wrapper with default settings apart from the size ceiling.
pub fn flatten_repository(root: &Path, output: &Path, max_file_bytes: u64) -> Result<FlattenStats> {
    Flattener::new(root).max_file_bytes(max_file_bytes).run(&root.display().to_string(), output)
}

fn load_record(candidate: Candidate) -> FileRecord {
    let size_bytes = std::fs::metadata(&candidate.path).map(|m| m.len()).unwrap_or(0);
    let decoded = read_file_safe(&candidate.path);
    FileRecord {
        path: candidate.path,
        relative_path: candidate.relative_path,
        size_bytes,
        encoding: decoded.encoding.name(),
        content: decoded.text,
    }
}

fn emit_record<W: Write>(
    writer: &mut ArtifactWriter<W>,
    record: &FileRecord,
) -> std::io::Result<()> {
    writer.write_section(&record.relative_path, &record.content)
}

fn is_same_file(candidate: &Path, output: &Path, output_canonical: Option<&Path>) -> bool {
    if candidate.file_name() != output.file_name() {
        return false;
    }
    match (output_canonical, candidate.canonicalize()) {
        (Some(out), Ok(path)) => out == path,
        _ => false,
    }
}
