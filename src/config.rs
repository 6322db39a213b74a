//! Configuration loading from .astwright.yml.
//!
//! ```yaml
//! rules:
//!   early-return:
//!     Enabled: true
//!   import-rewrite:
//!     From: fmt
//!     To: github.com/acme/fmtx
//!     Alias: fmtx
//!     Exclude:
//!       - "vendor/**"
//! ```
//!
//! `Enabled`, `Include` and `Exclude` are reserved keys; everything else is
//! passed through to the rule as a free-form option map.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::rule::RuleConfig;

pub const CONFIG_FILE_NAME: &str = ".astwright.yml";

#[derive(Debug, Default)]
pub struct Config {
    rule_configs: HashMap<String, RuleConfig>,
    config_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration. An explicit path must exist; otherwise the
    /// config file is searched in `search_dir` and its ancestors, and an
    /// empty config is used when none is found.
    pub fn load(explicit: Option<&Path>, search_dir: Option<&Path>) -> Result<Config> {
        if let Some(path) = explicit {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            let mut config = parse_config(&text)
                .with_context(|| format!("invalid config {}", path.display()))?;
            config.config_path = Some(path.to_path_buf());
            return Ok(config);
        }

        if let Some(dir) = search_dir {
            let mut dir = Some(dir);
            while let Some(current) = dir {
                let candidate = current.join(CONFIG_FILE_NAME);
                if candidate.is_file() {
                    let text = std::fs::read_to_string(&candidate).with_context(|| {
                        format!("failed to read config {}", candidate.display())
                    })?;
                    let mut config = parse_config(&text)
                        .with_context(|| format!("invalid config {}", candidate.display()))?;
                    config.config_path = Some(candidate);
                    return Ok(config);
                }
                dir = current.parent();
            }
        }

        Ok(Config::default())
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Effective configuration for a rule; rules not mentioned in the file
    /// get the default (enabled, no options).
    pub fn rule_config(&self, name: &str) -> RuleConfig {
        self.rule_configs.get(name).cloned().unwrap_or_default()
    }
}

fn parse_config(text: &str) -> Result<Config> {
    let raw: serde_yml::Value = serde_yml::from_str(text).context("not valid YAML")?;
    let mut rule_configs = HashMap::new();

    let Some(rules) = raw.get("rules") else {
        return Ok(Config {
            rule_configs,
            config_path: None,
        });
    };
    let Some(mapping) = rules.as_mapping() else {
        anyhow::bail!("'rules' must be a mapping");
    };

    for (key, value) in mapping {
        let Some(name) = key.as_str() else {
            anyhow::bail!("rule names must be strings");
        };
        let mut rule_config = RuleConfig::default();
        if let Some(entries) = value.as_mapping() {
            for (option_key, option_value) in entries {
                let Some(option_key) = option_key.as_str() else {
                    continue;
                };
                match option_key {
                    "Enabled" => {
                        rule_config.enabled = option_value.as_bool().unwrap_or(true);
                    }
                    "Include" => rule_config.include = string_list(option_value),
                    "Exclude" => rule_config.exclude = string_list(option_value),
                    _ => {
                        rule_config
                            .options
                            .insert(option_key.to_string(), option_value.clone());
                    }
                }
            }
        }
        rule_configs.insert(name.to_string(), rule_config);
    }

    Ok(Config {
        rule_configs,
        config_path: None,
    })
}

fn string_list(value: &serde_yml::Value) -> Vec<String> {
    match value {
        serde_yml::Value::String(s) => vec![s.clone()],
        serde_yml::Value::Sequence(seq) => seq
            .iter()
            .filter_map(|v| v.as_str().map(|s| s.to_string()))
            .collect(),
        _ => Vec::new(),
    }
}

/// Compiled per-rule path filter from Include/Exclude globs.
pub struct RuleFilter {
    include: Option<GlobSet>,
    exclude: Option<GlobSet>,
}

impl RuleFilter {
    pub fn build(config: &RuleConfig) -> Result<RuleFilter> {
        Ok(RuleFilter {
            include: build_glob_set(&config.include)?,
            exclude: build_glob_set(&config.exclude)?,
        })
    }

    /// Whether the rule applies to this path. An empty Include list means
    /// "everything"; Exclude wins over Include.
    pub fn matches(&self, path: &Path) -> bool {
        if let Some(exclude) = &self.exclude {
            if exclude.is_match(path) {
                return false;
            }
        }
        match &self.include {
            Some(include) => include.is_match(path),
            None => true,
        }
    }
}

fn build_glob_set(patterns: &[String]) -> Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob =
            Glob::new(pattern).with_context(|| format!("invalid glob pattern: {pattern}"))?;
        builder.add(glob);
    }
    Ok(Some(builder.build().context("failed to build glob set")?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_gives_default_config() {
        let config = parse_config("{}").unwrap();
        let rule = config.rule_config("early-return");
        assert!(rule.enabled);
        assert!(rule.options.is_empty());
    }

    #[test]
    fn parses_enabled_flag() {
        let config = parse_config("rules:\n  early-return:\n    Enabled: false\n").unwrap();
        assert!(!config.rule_config("early-return").enabled);
        // Unmentioned rules stay enabled.
        assert!(config.rule_config("import-rewrite").enabled);
    }

    #[test]
    fn parses_free_form_options() {
        let config = parse_config(
            "rules:\n  import-rewrite:\n    From: fmt\n    To: github.com/acme/fmtx\n    Alias: fmtx\n",
        )
        .unwrap();
        let rule = config.rule_config("import-rewrite");
        assert_eq!(rule.option_str("From"), Some("fmt".to_string()));
        assert_eq!(rule.option_str("To"), Some("github.com/acme/fmtx".to_string()));
        assert_eq!(rule.option_str("Alias"), Some("fmtx".to_string()));
    }

    #[test]
    fn parses_include_exclude_lists() {
        let config = parse_config(
            "rules:\n  early-return:\n    Include:\n      - \"src/**\"\n    Exclude:\n      - \"vendor/**\"\n      - \"gen/**\"\n",
        )
        .unwrap();
        let rule = config.rule_config("early-return");
        assert_eq!(rule.include, vec!["src/**"]);
        assert_eq!(rule.exclude, vec!["vendor/**", "gen/**"]);
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        assert!(parse_config("{{nope::").is_err());
        assert!(parse_config("rules: 3\n").is_err());
    }

    #[test]
    fn rule_filter_default_matches_everything() {
        let filter = RuleFilter::build(&RuleConfig::default()).unwrap();
        assert!(filter.matches(Path::new("anything/main.go")));
    }

    #[test]
    fn rule_filter_exclude_wins() {
        let mut rule = RuleConfig::default();
        rule.include = vec!["**/*.go".to_string()];
        rule.exclude = vec!["vendor/**".to_string()];
        let filter = RuleFilter::build(&rule).unwrap();
        assert!(filter.matches(Path::new("src/main.go")));
        assert!(!filter.matches(Path::new("vendor/dep/main.go")));
    }

    #[test]
    fn rule_filter_include_restricts() {
        let mut rule = RuleConfig::default();
        rule.include = vec!["cmd/**".to_string()];
        let filter = RuleFilter::build(&rule).unwrap();
        assert!(filter.matches(Path::new("cmd/app/main.go")));
        assert!(!filter.matches(Path::new("pkg/util.go")));
    }

    #[test]
    fn rule_filter_invalid_glob_errors() {
        let mut rule = RuleConfig::default();
        rule.exclude = vec!["a[".to_string()];
        assert!(RuleFilter::build(&rule).is_err());
    }

    #[test]
    fn load_explicit_missing_file_errors() {
        assert!(Config::load(Some(Path::new("/nonexistent/.astwright.yml")), None).is_err());
    }

    #[test]
    fn load_searches_ancestors() {
        let dir = std::env::temp_dir().join("astwright_test_config");
        let nested = dir.join("a/b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(
            dir.join(CONFIG_FILE_NAME),
            "rules:\n  early-return:\n    Enabled: false\n",
        )
        .unwrap();
        let config = Config::load(None, Some(&nested)).unwrap();
        assert!(!config.rule_config("early-return").enabled);
        assert!(config.config_path().is_some());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn load_without_config_file_gives_default() {
        let dir = std::env::temp_dir().join("astwright_test_config_none/deep");
        std::fs::create_dir_all(&dir).unwrap();
        let config = Config::load(None, Some(&dir)).unwrap();
        assert!(config.rule_config("anything").enabled);
        std::fs::remove_dir_all(std::env::temp_dir().join("astwright_test_config_none")).ok();
    }
}
