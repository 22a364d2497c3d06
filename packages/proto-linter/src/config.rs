//! Configuration loading for proto-linter
//!
//! Loads configuration from a `proto-linter.toml` file

use crate::error::LintError;
use crate::models::Failure;
use crate::rules::base::is_valid_rule_id;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "proto-linter.toml";

/// Main configuration structure
#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct Config {
    /// Rules to enable (empty means all rules, or use ["ALL"])
    #[serde(default)]
    pub enable: Vec<String>,

    /// Rules to disable
    #[serde(default)]
    pub disable: Vec<String>,

    /// Paths to exclude from discovery
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Per-rule file suppressions
    #[serde(default)]
    pub ignore: Vec<IgnoreConfig>,

    /// Append a JSON Lines record of every run to this file
    #[serde(default)]
    pub log_file: Option<String>,
}

/// Suppresses one rule for a set of files
#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq)]
pub struct IgnoreConfig {
    pub id: String,
    #[serde(default)]
    pub files: Vec<String>,
}

impl IgnoreConfig {
    /// Files match by path suffix, so `foo/v1/foo.proto` matches `foo.proto`
    fn matches(&self, failure: &Failure) -> bool {
        failure.lint_id == self.id
            && self
                .files
                .iter()
                .any(|f| Path::new(&failure.position.filename).ends_with(f))
    }
}

impl Config {
    pub fn is_ignored(&self, failure: &Failure) -> bool {
        self.ignore.iter().any(|ignore| ignore.matches(failure))
    }

    /// Every rule id named anywhere in the config must be well formed
    pub fn validate(&self) -> Result<(), LintError> {
        let ids = self
            .enable
            .iter()
            .chain(&self.disable)
            .chain(self.ignore.iter().map(|i| &i.id))
            .filter(|id| id.as_str() != "ALL");
        for id in ids {
            if !is_valid_rule_id(id) {
                return Err(LintError::InvalidRuleId(id.clone()));
            }
        }
        Ok(())
    }
}

/// Find the config file starting from a path and walking up
pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
    let mut current = if start_path.is_file() {
        start_path.parent()?
    } else {
        start_path
    };

    loop {
        let candidate = current.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }

        current = current.parent()?;
    }
}

/// Load configuration from an explicit path, or from the nearest config file
/// above the current directory. `Ok(None)` when there is no config file.
pub fn load_config(path: Option<&Path>) -> Result<Option<Config>, LintError> {
    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let Ok(cwd) = std::env::current_dir() else {
                return Ok(None);
            };
            match find_config_file(&cwd) {
                Some(p) => p,
                None => return Ok(None),
            }
        }
    };

    let path_str = config_path.to_string_lossy().to_string();
    let content = std::fs::read_to_string(&config_path).map_err(|source| LintError::Io {
        path: path_str.clone(),
        source,
    })?;
    let config: Config = toml::from_str(&content).map_err(|source| LintError::InvalidConfig {
        path: path_str,
        source,
    })?;
    config.validate()?;

    Ok(Some(config))
}

fn all_except(all_rules: &[String], disabled: &[String]) -> Vec<String> {
    all_rules
        .iter()
        .filter(|r| !disabled.contains(r))
        .cloned()
        .collect()
}

/// Merge command line arguments with config file settings
/// CLI arguments take precedence
pub fn merge_config(
    config: Option<&Config>,
    all_rules: &[String],
    cli_enable: &[String],
    cli_disable: &[String],
    cli_exclude: &[String],
) -> (Option<Vec<String>>, Vec<String>) {
    let mut enable = None;
    let mut exclude = vec![];
    let cli_selects = !cli_enable.is_empty() || !cli_disable.is_empty();

    // Start with config file settings
    if let Some(cfg) = config {
        if !cli_selects {
            if cfg.enable.iter().any(|r| r == "ALL") {
                enable = Some(all_except(all_rules, &cfg.disable));
            } else if !cfg.enable.is_empty() {
                let enabled: Vec<String> = cfg
                    .enable
                    .iter()
                    .filter(|r| !cfg.disable.contains(r))
                    .cloned()
                    .collect();
                enable = Some(enabled);
            } else if !cfg.disable.is_empty() {
                enable = Some(all_except(all_rules, &cfg.disable));
            }
        }

        exclude.extend(cfg.exclude.iter().cloned());
    }

    // Apply CLI overrides
    if !cli_enable.is_empty() {
        if cli_enable.iter().any(|r| r == "ALL") {
            enable = Some(all_except(all_rules, cli_disable));
        } else {
            enable = Some(cli_enable.to_vec());
        }
    } else if !cli_disable.is_empty() {
        enable = Some(all_except(all_rules, cli_disable));
    }

    // Add CLI exclude patterns
    exclude.extend(cli_exclude.iter().cloned());

    // Add default excludes
    for default in [".git", "target", "node_modules"] {
        if !exclude.iter().any(|e| e == default) {
            exclude.push(default.to_string());
        }
    }

    (enable, exclude)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Position;
    use std::fs;
    use tempfile::TempDir;

    fn all_rules() -> Vec<String> {
        vec![
            "REQUEST_RESPONSE_NAMES_MATCH_RPC_LIXIN".to_string(),
            "SERVICE_NAMES_SERVICE_SUFFIX".to_string(),
        ]
    }

    #[test]
    fn test_find_config_file() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, "exclude = [\"gen\"]").unwrap();

        assert_eq!(find_config_file(dir.path()), Some(config_path.clone()));

        let subdir = dir.path().join("subdir");
        fs::create_dir(&subdir).unwrap();
        assert_eq!(find_config_file(&subdir), Some(config_path));
    }

    #[test]
    fn test_load_config() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        let content = r#"
enable = ["SERVICE_NAMES_SERVICE_SUFFIX"]
exclude = ["vendor", "gen"]
log_file = "lint-log.jsonl"

[[ignore]]
id = "REQUEST_RESPONSE_NAMES_MATCH_RPC_LIXIN"
files = ["legacy/v1/legacy.proto"]
"#;
        fs::write(&config_path, content).unwrap();

        let config = load_config(Some(&config_path)).unwrap().unwrap();
        assert_eq!(config.enable, vec!["SERVICE_NAMES_SERVICE_SUFFIX"]);
        assert_eq!(config.exclude, vec!["vendor", "gen"]);
        assert_eq!(config.log_file.as_deref(), Some("lint-log.jsonl"));
        assert_eq!(config.ignore.len(), 1);
        assert_eq!(config.ignore[0].files, vec!["legacy/v1/legacy.proto"]);
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, "enable = [").unwrap();

        let err = load_config(Some(&config_path)).unwrap_err();
        assert!(matches!(err, LintError::InvalidConfig { .. }));
    }

    #[test]
    fn test_load_config_rejects_bad_rule_id() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, "disable = [\"service-names\"]").unwrap();

        let err = load_config(Some(&config_path)).unwrap_err();
        assert!(matches!(err, LintError::InvalidRuleId(id) if id == "service-names"));
    }

    #[test]
    fn test_load_config_missing_explicit_path() {
        let dir = TempDir::new().unwrap();
        let err = load_config(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, LintError::Io { .. }));
    }

    #[test]
    fn test_merge_config() {
        let config = Config {
            enable: vec!["SERVICE_NAMES_SERVICE_SUFFIX".to_string()],
            exclude: vec!["custom_dir".to_string()],
            ..Default::default()
        };

        let (enable, exclude) = merge_config(
            Some(&config),
            &all_rules(),
            &["REQUEST_RESPONSE_NAMES_MATCH_RPC_LIXIN".to_string()],
            &[],
            &["skip_me".to_string()],
        );

        assert_eq!(enable, Some(vec!["REQUEST_RESPONSE_NAMES_MATCH_RPC_LIXIN".to_string()]));
        assert!(exclude.contains(&"custom_dir".to_string()));
        assert!(exclude.contains(&"skip_me".to_string()));
        assert!(exclude.contains(&".git".to_string()));
    }

    #[test]
    fn test_merge_config_disable_only() {
        let config = Config {
            disable: vec!["SERVICE_NAMES_SERVICE_SUFFIX".to_string()],
            ..Default::default()
        };

        let (enable, _) = merge_config(Some(&config), &all_rules(), &[], &[], &[]);
        assert_eq!(enable, Some(vec!["REQUEST_RESPONSE_NAMES_MATCH_RPC_LIXIN".to_string()]));
    }

    #[test]
    fn test_merge_config_no_selection_enables_all() {
        let (enable, exclude) = merge_config(None, &all_rules(), &[], &[], &[]);
        assert_eq!(enable, None);
        assert_eq!(exclude, vec![".git", "target", "node_modules"]);
    }

    #[test]
    fn test_merge_config_cli_all_with_disable() {
        let (enable, _) = merge_config(
            None,
            &all_rules(),
            &["ALL".to_string()],
            &["REQUEST_RESPONSE_NAMES_MATCH_RPC_LIXIN".to_string()],
            &[],
        );
        assert_eq!(enable, Some(vec!["SERVICE_NAMES_SERVICE_SUFFIX".to_string()]));
    }

    #[test]
    fn test_ignore_matches_by_path_suffix() {
        let config = Config {
            ignore: vec![IgnoreConfig {
                id: "SERVICE_NAMES_SERVICE_SUFFIX".to_string(),
                files: vec!["v1/legacy.proto".to_string()],
            }],
            ..Default::default()
        };

        let failure = |lint_id: &str, filename: &str| {
            Failure::new(lint_id, Position::new(filename, 1, 1), "msg")
        };

        assert!(config.is_ignored(&failure("SERVICE_NAMES_SERVICE_SUFFIX", "api/v1/legacy.proto")));
        assert!(!config.is_ignored(&failure("SERVICE_NAMES_SERVICE_SUFFIX", "api/v1/other.proto")));
        assert!(!config.is_ignored(&failure("SERVICE_NAMES_SERVICE_SUFFIX", "api/xv1/legacy.proto")));
        assert!(!config.is_ignored(&failure(
            "REQUEST_RESPONSE_NAMES_MATCH_RPC_LIXIN",
            "api/v1/legacy.proto"
        )));
    }
}
