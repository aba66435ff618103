//! Configuration file loading for impsort.
//!
//! Discovers and loads `impsort.toml` from the working directory (or `--config`).
//! Merges config file settings with CLI arguments (CLI takes precedence).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use impsort_types::options::{RawOptions, RawStrategy};
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "impsort.toml";

/// Top-level configuration from impsort.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ImpsortConfig {
    /// Ordering options, handed to the domain as-is.
    pub options: RawOptions,

    /// Which files directory walks pick up.
    pub files: FilesConfig,
}

/// Files section of the config.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    /// Glob patterns (relative to the walked directory) to skip.
    pub exclude: Vec<String>,
}

/// Discover the impsort.toml config file in `dir`.
///
/// Returns `None` if no config file is found.
pub fn discover_config(dir: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse an impsort.toml config file.
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<ImpsortConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

/// Parse a config file from a string.
pub fn parse_config(contents: &str) -> anyhow::Result<ImpsortConfig> {
    let config: ImpsortConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load the explicit config file if given, else discover one in `dir`, else defaults.
pub fn load_or_default(explicit: Option<&Utf8Path>, dir: &Utf8Path) -> anyhow::Result<ImpsortConfig> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    match discover_config(dir) {
        Some(path) => load_config(&path),
        None => Ok(ImpsortConfig::default()),
    }
}

/// Option overrides given on the command line.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// `name` or `name:asc|desc`; replaces the file's chain when non-empty.
    pub strategies: Vec<String>,
    pub internal_pattern: Option<String>,
    pub sort_destructured: bool,
    pub no_group_external_internal: bool,
}

/// Merged configuration combining config file and CLI arguments.
#[derive(Debug, Clone, Default)]
pub struct MergedConfig {
    pub options: RawOptions,
    pub exclude: Vec<String>,
}

/// Builder for merging config file with CLI arguments.
pub struct ConfigMerger {
    config: ImpsortConfig,
}

impl ConfigMerger {
    /// Create a new merger from a loaded config.
    pub fn new(config: ImpsortConfig) -> Self {
        Self { config }
    }

    /// CLI values override the file; boolean flags only override when set.
    pub fn merge(self, cli: &CliOverrides) -> MergedConfig {
        let mut options = self.config.options;

        if !cli.strategies.is_empty() {
            options.sort_strategy_chain =
                Some(cli.strategies.iter().map(|s| parse_strategy_arg(s)).collect());
        }
        if let Some(pattern) = &cli.internal_pattern {
            options.internal_path_pattern = Some(pattern.clone());
        }
        if cli.sort_destructured {
            options.sort_destructured_specifiers = Some(true);
        }
        if cli.no_group_external_internal {
            options.group_external_internal = Some(false);
        }

        MergedConfig {
            options,
            exclude: self.config.files.exclude,
        }
    }
}

/// `pathDepth:desc` → entry with direction; `alphabetical` → bare name.
pub fn parse_strategy_arg(arg: &str) -> RawStrategy {
    match arg.split_once(':') {
        Some((name, direction)) => RawStrategy::Entry {
            strategy: name.trim().to_string(),
            direction: Some(direction.trim().to_string()),
        },
        None => RawStrategy::Name(arg.trim().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_example_config() {
        let contents = r#"
[options]
groupExternalInternal = true
internalPathPattern = "^(@/|~/|\\.\\.?/)"
sortDestructuredSpecifiers = true
sortStrategyChain = [
  { strategy = "pathDepth", direction = "asc" },
  "filename",
  { strategy = "alphabetical", direction = "desc" },
]

[files]
exclude = ["generated/**"]
"#;

        let config = parse_config(contents).unwrap();
        assert_eq!(config.options.group_external_internal, Some(true));
        assert_eq!(
            config.options.internal_path_pattern.as_deref(),
            Some(r"^(@/|~/|\.\.?/)")
        );
        assert_eq!(config.options.sort_destructured_specifiers, Some(true));
        let chain = config.options.sort_strategy_chain.unwrap();
        assert_eq!(chain.len(), 3);
        assert_eq!(chain[1], RawStrategy::Name("filename".to_string()));
        assert_eq!(chain[2].direction_name(), Some("desc"));
        assert_eq!(config.files.exclude, vec!["generated/**"]);
    }

    #[test]
    fn test_parse_snake_case_keys() {
        let contents = r#"
[options]
group_external_internal = false
sort_strategy_chain = ["lineLength"]
"#;
        let config = parse_config(contents).unwrap();
        assert_eq!(config.options.group_external_internal, Some(false));
        assert_eq!(
            config.options.sort_strategy_chain,
            Some(vec![RawStrategy::Name("lineLength".to_string())])
        );
    }

    #[test]
    fn test_parse_empty_config() {
        let config = parse_config("").unwrap();
        assert_eq!(config.options, RawOptions::default());
        assert!(config.files.exclude.is_empty());
    }

    #[test]
    fn test_parse_invalid_toml() {
        let err = parse_config("[options\n").expect_err("invalid");
        assert!(err.to_string().contains("invalid TOML"));
    }

    #[test]
    fn test_malformed_option_values_fall_back() {
        let contents = r#"
[options]
sortDestructuredSpecifiers = "yes"
sortStrategyChain = "alphabetical"
groupExternalInternal = false
"#;
        let config = parse_config(contents).unwrap();
        assert_eq!(config.options.sort_destructured_specifiers, None);
        assert_eq!(config.options.sort_strategy_chain, None);
        assert_eq!(config.options.group_external_internal, Some(false));
    }

    #[test]
    fn test_malformed_direction_falls_back() {
        let contents = r#"
[options]
sortStrategyChain = [{ strategy = "alphabetical", direction = 1 }]
"#;
        let config = parse_config(contents).unwrap();
        let chain = config.options.sort_strategy_chain.unwrap();
        assert_eq!(
            chain,
            vec![RawStrategy::Entry {
                strategy: "alphabetical".to_string(),
                direction: None,
            }]
        );
    }

    #[test]
    fn test_merge_cli_overrides_file() {
        let config = parse_config(
            r#"
[options]
groupExternalInternal = true
sortStrategyChain = ["lineLength"]
internalPathPattern = "^src/"
"#,
        )
        .unwrap();

        let merged = ConfigMerger::new(config).merge(&CliOverrides {
            strategies: vec!["pathDepth:desc".to_string(), "alphabetical".to_string()],
            internal_pattern: Some("^~/".to_string()),
            sort_destructured: true,
            no_group_external_internal: true,
        });

        assert_eq!(merged.options.group_external_internal, Some(false));
        assert_eq!(merged.options.internal_path_pattern.as_deref(), Some("^~/"));
        assert_eq!(merged.options.sort_destructured_specifiers, Some(true));
        assert_eq!(
            merged.options.sort_strategy_chain,
            Some(vec![
                RawStrategy::Entry {
                    strategy: "pathDepth".to_string(),
                    direction: Some("desc".to_string()),
                },
                RawStrategy::Name("alphabetical".to_string()),
            ])
        );
    }

    #[test]
    fn test_merge_keeps_file_values_when_cli_unset() {
        let config = parse_config(
            r#"
[options]
sortDestructuredSpecifiers = true
sortStrategyChain = ["filename"]
"#,
        )
        .unwrap();

        let merged = ConfigMerger::new(config).merge(&CliOverrides::default());
        assert_eq!(merged.options.sort_destructured_specifiers, Some(true));
        assert_eq!(
            merged.options.sort_strategy_chain,
            Some(vec![RawStrategy::Name("filename".to_string())])
        );
        assert_eq!(merged.options.group_external_internal, None);
    }

    #[test]
    fn test_discover_config_some_and_none() {
        let temp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
        assert!(discover_config(&root).is_none());

        std::fs::write(root.join(CONFIG_FILE_NAME), "").expect("write config");
        assert!(discover_config(&root).is_some());
    }

    #[test]
    fn test_explicit_config_wins_over_discovery() {
        let temp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
        std::fs::write(
            root.join(CONFIG_FILE_NAME),
            "[options]\nsortDestructuredSpecifiers = false\n",
        )
        .expect("write config");
        let explicit = root.join("other.toml");
        std::fs::write(&explicit, "[options]\nsortDestructuredSpecifiers = true\n")
            .expect("write config");

        let cfg = load_or_default(Some(&explicit), &root).expect("load");
        assert_eq!(cfg.options.sort_destructured_specifiers, Some(true));
    }

    #[test]
    fn test_load_or_default_returns_default_when_missing() {
        let temp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
        let cfg = load_or_default(None, &root).expect("load default");
        assert_eq!(cfg.options, RawOptions::default());
    }
}
