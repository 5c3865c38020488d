//! repo-flatten: flatten a repository into a single annotated text file
//!
//! Walks a local path or a cloned GitHub repository and concatenates every
//! file judged to be text source into one output file.

use anyhow::Result;

fn main() -> Result<()> {
    repo_flatten::cli::run()
}
