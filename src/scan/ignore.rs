//! Root-level ignore file handling
//!
//! Only literal glob lines are honored. There is no negation, no nested
//! ignore files and no precedence between lines: a path is ignored as soon as
//! any pattern matches it. Root-anchored lines (leading `/`) never match a
//! relative path and are dropped when loading.

use globset::{GlobBuilder, GlobMatcher};
use std::collections::BTreeSet;
use std::io;
use std::path::Path;

/// One compiled ignore line.
#[derive(Debug, Clone)]
struct IgnorePattern {
    raw: String,
    /// Number of `/`-separated components in the pattern
    depth: usize,
    matcher: GlobMatcher,
}

impl IgnorePattern {
    fn compile(raw: &str) -> Result<Option<Self>, globset::Error> {
        if raw.starts_with('/') {
            tracing::debug!("Ignore pattern {:?} is root-anchored and never matches", raw);
            return Ok(None);
        }
        let body = raw.trim_end_matches('/');
        if body.is_empty() {
            return Ok(None);
        }

        let matcher = GlobBuilder::new(body).literal_separator(true).build()?.compile_matcher();
        Ok(Some(Self {
            raw: raw.to_string(),
            depth: body.split('/').count(),
            matcher,
        }))
    }

    /// Match against the trailing components of `rel`, the way a relative
    /// pattern matches a path from the right.
    fn matches(&self, rel: &str) -> bool {
        let parts: Vec<&str> = rel.split('/').collect();
        if parts.len() < self.depth {
            return false;
        }
        let tail = parts[parts.len() - self.depth..].join("/");
        self.matcher.is_match(tail.as_str())
    }
}

/// The set of patterns loaded from the root's ignore file.
#[derive(Debug, Clone, Default)]
pub struct IgnorePatterns {
    patterns: Vec<IgnorePattern>,
}

impl IgnorePatterns {
    /// An empty set that ignores nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load `<root>/<file_name>`. A missing file yields an empty set.
    pub fn load(root: &Path, file_name: &str) -> Self {
        let path = root.join(file_name);
        match std::fs::read(&path) {
            Ok(bytes) => {
                let patterns = Self::from_lines(&String::from_utf8_lossy(&bytes));
                tracing::debug!(
                    "Loaded {} ignore pattern(s) from {}",
                    patterns.len(),
                    path.display()
                );
                patterns
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Self::empty(),
            Err(e) => {
                tracing::warn!("Could not read {}: {}", path.display(), e);
                Self::empty()
            }
        }
    }

    /// Parse ignore file contents: one pattern per non-empty, non-comment line.
    pub fn from_lines(contents: &str) -> Self {
        let unique: BTreeSet<&str> = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .collect();

        let mut patterns = Vec::with_capacity(unique.len());
        for raw in unique {
            match IgnorePattern::compile(raw) {
                Ok(Some(pattern)) => patterns.push(pattern),
                Ok(None) => {}
                Err(e) => tracing::warn!("Skipping invalid ignore pattern {:?}: {}", raw, e),
            }
        }
        Self { patterns }
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// The first pattern matching the `/`-separated relative path, if any.
    pub fn matching_pattern(&self, rel: &str) -> Option<&str> {
        self.patterns.iter().find(|p| p.matches(rel)).map(|p| p.raw.as_str())
    }

    pub fn is_ignored(&self, rel: &str) -> bool {
        self.matching_pattern(rel).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let patterns = IgnorePatterns::from_lines("# logs\n\n*.log\n   \n  target  \n#*.rs\n");
        assert_eq!(patterns.len(), 2);
        assert!(patterns.is_ignored("run.log"));
        assert!(patterns.is_ignored("target"));
        assert!(!patterns.is_ignored("main.rs"));
    }

    #[test]
    fn duplicate_lines_collapse() {
        let patterns = IgnorePatterns::from_lines("*.log\n*.log\n");
        assert_eq!(patterns.len(), 1);
    }

    #[test]
    fn single_component_pattern_matches_nested_file_name() {
        let patterns = IgnorePatterns::from_lines("*.log");
        assert!(patterns.is_ignored("logs/deep/run.log"));
        assert!(!patterns.is_ignored("run.log.txt"));
    }

    #[test]
    fn star_does_not_cross_separators() {
        let patterns = IgnorePatterns::from_lines("docs/*.md");
        assert!(patterns.is_ignored("docs/guide.md"));
        assert!(patterns.is_ignored("site/docs/guide.md"));
        assert!(!patterns.is_ignored("docs/api/guide.md"));
        assert!(!patterns.is_ignored("guide.md"));
    }

    #[test]
    fn directory_patterns_match_only_that_name() {
        let patterns = IgnorePatterns::from_lines("target/");
        assert!(patterns.is_ignored("target"));
        assert!(!patterns.is_ignored("target/debug/app.d"));
    }

    #[test]
    fn root_anchored_lines_never_match() {
        let patterns = IgnorePatterns::from_lines("/secret.txt\n/*.lock\n*.log\n");
        assert_eq!(patterns.len(), 1);
        assert!(!patterns.is_ignored("secret.txt"));
        assert!(!patterns.is_ignored("nested/secret.txt"));
        assert!(!patterns.is_ignored("Cargo.lock"));
        assert!(patterns.is_ignored("run.log"));
    }

    #[test]
    fn negation_is_literal() {
        let patterns = IgnorePatterns::from_lines("*.log\n!keep.log\n");
        assert!(patterns.is_ignored("keep.log"));
    }

    #[test]
    fn invalid_patterns_are_dropped() {
        let patterns = IgnorePatterns::from_lines("[abc\n*.tmp\n");
        assert_eq!(patterns.len(), 1);
        assert!(patterns.is_ignored("x.tmp"));
    }

    #[test]
    fn matching_pattern_reports_raw_line() {
        let patterns = IgnorePatterns::from_lines("build/*.lock\n");
        assert_eq!(patterns.matching_pattern("web/build/yarn.lock"), Some("build/*.lock"));
    }

    #[test]
    fn missing_ignore_file_is_empty() {
        let temp = TempDir::new().unwrap();
        assert!(IgnorePatterns::load(temp.path(), ".gitignore").is_empty());
    }

    #[test]
    fn load_reads_root_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".gitignore"), "*.log\n").unwrap();
        let patterns = IgnorePatterns::load(temp.path(), ".gitignore");
        assert!(patterns.is_ignored("run.log"));
    }
}
