pub mod early_return;
pub mod import_rewrite;
pub mod logrus_zerolog;
pub mod registry;

use std::collections::HashMap;

use crate::pattern::Matcher;

/// Per-rule configuration extracted from .astwright.yml.
#[derive(Debug, Clone)]
pub struct RuleConfig {
    pub enabled: bool,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub options: HashMap<String, serde_yml::Value>,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            include: Vec::new(),
            exclude: Vec::new(),
            options: HashMap::new(),
        }
    }
}

impl RuleConfig {
    /// String-valued option, e.g. `From` for import-rewrite.
    pub fn option_str(&self, key: &str) -> Option<String> {
        self.options
            .get(key)
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
    }
}

/// A rewrite rule. Implementations must be Send + Sync so the registry can
/// be shared across rayon worker threads; the matchers a rule compiles are
/// thread-local to one file's matching session.
pub trait Rule: Send + Sync {
    /// The rule name used in config and reports, e.g. "early-return".
    fn name(&self) -> &'static str;

    /// One-line description shown by --list-rules.
    fn description(&self) -> &'static str;

    /// Report message attached to each completed match.
    fn message(&self) -> &'static str;

    /// Compile the rule into matchers bound to a fresh capture store.
    /// Called once per file; a rule that is not applicable under the given
    /// options returns no matchers.
    fn matchers(&self, config: &RuleConfig) -> Vec<Matcher>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_config_defaults_to_enabled() {
        let config = RuleConfig::default();
        assert!(config.enabled);
        assert!(config.options.is_empty());
    }

    #[test]
    fn option_str_reads_string_values() {
        let mut config = RuleConfig::default();
        config.options.insert(
            "From".to_string(),
            serde_yml::Value::String("fmt".to_string()),
        );
        config
            .options
            .insert("Max".to_string(), serde_yml::Value::Number(3.into()));
        assert_eq!(config.option_str("From"), Some("fmt".to_string()));
        assert_eq!(config.option_str("Max"), None);
        assert_eq!(config.option_str("Absent"), None);
    }
}
