//! CLI argument merging with config

use crate::domain::Config;
use std::path::PathBuf;

#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub max_size_kib: Option<u64>,
    pub output: Option<PathBuf>,
    pub git_ref: Option<String>,
}

pub fn merge_cli_with_config(mut base_config: Config, cli: CliOverrides) -> Config {
    if let Some(max_size_kib) = cli.max_size_kib {
        base_config.max_size_kib = max_size_kib;
    }
    if let Some(output) = cli.output {
        base_config.output = Some(output);
    }
    if let Some(git_ref) = cli.git_ref {
        base_config.git_ref = Some(git_ref);
    }

    base_config
}

#[cfg(test)]
mod tests {
    use super::{merge_cli_with_config, CliOverrides};
    use crate::domain::Config;
    use std::path::PathBuf;

    #[test]
    fn cli_overrides_replace_base_values() {
        let base = Config {
            max_size_kib: 100,
            output: Some(PathBuf::from("from-config.txt")),
            ignore_file: ".flattenignore".to_string(),
            ..Config::default()
        };

        let cli = CliOverrides {
            max_size_kib: Some(8),
            ..CliOverrides::default()
        };

        let merged = merge_cli_with_config(base, cli);
        assert_eq!(merged.max_size_kib, 8);
        assert_eq!(merged.output, Some(PathBuf::from("from-config.txt")));
        assert_eq!(merged.ignore_file, ".flattenignore");
        assert!(merged.git_ref.is_none());
    }
}
