//! Configuration loading
//!
//! Layers, lowest to highest: built-in defaults, a `repo-flatten.toml` (or
//! `.yml`) file, `REPO_FLATTEN_*` environment variables. CLI flags are
//! applied on top by [`merge_cli_with_config`].

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Toml, Yaml};
use figment::Figment;
use std::path::{Path, PathBuf};

use crate::domain::Config;

mod merge;

pub use merge::{merge_cli_with_config, CliOverrides};

/// Config file names probed in the anchor directory, in order.
pub const CONFIG_FILE_NAMES: &[&str] =
    &["repo-flatten.toml", "repo-flatten.yml", "repo-flatten.yaml"];

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "REPO_FLATTEN_";

/// Load configuration from an explicit file or the first config file found in `anchor`.
pub fn load_config(anchor: &Path, explicit: Option<&Path>) -> Result<Config> {
    let file = match explicit {
        Some(path) => {
            if !path.is_file() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            Some(path.to_path_buf())
        }
        None => find_config_file(anchor),
    };

    let mut figment = Figment::from(Serialized::defaults(Config::default()));
    if let Some(path) = &file {
        tracing::debug!("Loading config from {}", path.display());
        figment = if is_yaml(path) {
            figment.merge(Yaml::file(path))
        } else {
            figment.merge(Toml::file(path))
        };
    }
    figment = figment.merge(Env::prefixed(ENV_PREFIX));

    let config: Config = figment.extract().with_context(|| match &file {
        Some(path) => format!("Invalid configuration in {}", path.display()),
        None => "Invalid configuration in environment".to_string(),
    })?;
    Ok(config)
}

fn find_config_file(anchor: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES.iter().map(|name| anchor.join(name)).find(|p| p.is_file())
}

fn is_yaml(path: &Path) -> bool {
    matches!(path.extension().and_then(|e| e.to_str()), Some("yml" | "yaml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_without_config_file() {
        let temp = TempDir::new().unwrap();
        let config = load_config(temp.path(), None).unwrap();
        assert_eq!(config.ignore_file, ".gitignore");
        assert!(config.output.is_none());
    }

    #[test]
    fn toml_file_in_anchor_is_loaded() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("repo-flatten.toml"),
            "max_size_kib = 8\nignore_file = \".flattenignore\"\n",
        )
        .unwrap();

        let config = load_config(temp.path(), None).unwrap();
        assert_eq!(config.max_size_kib, 8);
        assert_eq!(config.ignore_file, ".flattenignore");
    }

    #[test]
    fn explicit_yaml_file_is_loaded() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.yml");
        fs::write(&path, "output: flat.txt\ngit_ref: main\n").unwrap();

        let config = load_config(temp.path(), Some(&path)).unwrap();
        assert_eq!(config.output, Some(PathBuf::from("flat.txt")));
        assert_eq!(config.git_ref.as_deref(), Some("main"));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let err = load_config(temp.path(), Some(&temp.path().join("nope.toml"))).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("repo-flatten.toml"), "max_size_kib = \"lots\"\n").unwrap();
        assert!(load_config(temp.path(), None).is_err());
    }
}
