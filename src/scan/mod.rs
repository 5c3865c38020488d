//! File discovery: ignore patterns, classification and traversal

pub mod classify;
pub mod ignore;
pub mod walker;

pub use classify::classify_file;
pub use ignore::IgnorePatterns;
pub use walker::{Candidate, TreeWalker};
