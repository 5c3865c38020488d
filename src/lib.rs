//! Repo-Flatten: concatenate a repository's text sources into one file
//!
//! This library walks a local directory (or a freshly cloned remote),
//! selects the files that look like text, and writes them into a single
//! annotated artifact for downstream review, search or summarization tools.

pub mod cli;
pub mod config;
pub mod domain;
pub mod fetch;
pub mod flatten;
pub mod render;
pub mod scan;
pub mod utils;
