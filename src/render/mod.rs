//! Output artifact rendering
//!
//! ```text
//! # Repository: <root>
//! ==================================================
//!
//! ### SOURCE FILE: <relative-path>
//! --------------------------------------------------
//! <content>
//!
//! ```

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

const RULE_WIDTH: usize = 50;

/// Append-only writer for the flattened output.
pub struct ArtifactWriter<W: Write> {
    out: W,
    bytes_written: u64,
}

impl ArtifactWriter<BufWriter<File>> {
    /// Create (truncate) the output file. Failure here is fatal for the run.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> ArtifactWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, bytes_written: 0 }
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Write the `# Repository:` line and its rule.
    pub fn write_header(&mut self, label: &str) -> io::Result<()> {
        self.emit(&format!("# Repository: {label}\n{}\n\n", "=".repeat(RULE_WIDTH)))
    }

    /// Write one file section: path header, rule, content, blank line.
    pub fn write_section(&mut self, relative_path: &str, content: &str) -> io::Result<()> {
        self.emit(&format!("### SOURCE FILE: {relative_path}\n{}\n", "-".repeat(RULE_WIDTH)))?;
        self.emit(content)?;
        self.emit("\n\n")
    }

    /// Flush and hand back the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }

    fn emit(&mut self, s: &str) -> io::Result<()> {
        self.out.write_all(s.as_bytes())?;
        self.bytes_written += s.len() as u64;
        Ok(())
    }
}
