//! Analysis configuration.
//!
//! Configuration comes from a JSON file (`--config`) and from CLI flags
//! (`--rule`, `--disable`), merged with [`AnalysisConfig::with_cli_rules`].
//! Every field has a default, so `{}` is a valid configuration.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sharpfix_core::diagnostic::{RuleDescriptor, Severity};
use sharpfix_core::error::SharpfixError;
use thiserror::Error;

/// Accesses of one static type that make a `using static` worthwhile.
pub const DEFAULT_STATIC_IMPORT_THRESHOLD: usize = 5;

// ============================================================================
// Error Types
// ============================================================================

/// Errors loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("static_import_threshold must be at least 1")]
    InvalidThreshold,
}

impl From<ConfigError> for SharpfixError {
    fn from(err: ConfigError) -> Self {
        SharpfixError::invalid_args(err.to_string())
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Which rules run and how they report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// When non-empty, only these rule ids run.
    pub enabled_rules: Vec<String>,
    /// Rule ids that never run. Wins over `enabled_rules`.
    pub disabled_rules: Vec<String>,
    /// Severity per rule id, replacing the descriptor default.
    pub severity_overrides: BTreeMap<String, Severity>,
    pub static_import_threshold: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            enabled_rules: Vec::new(),
            disabled_rules: Vec::new(),
            severity_overrides: BTreeMap::new(),
            static_import_threshold: DEFAULT_STATIC_IMPORT_THRESHOLD,
        }
    }
}

impl AnalysisConfig {
    /// Load and validate a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: AnalysisConfig =
            serde_json::from_str(&text).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.static_import_threshold == 0 {
            return Err(ConfigError::InvalidThreshold);
        }
        Ok(())
    }

    /// Add rule ids selected and disabled on the command line.
    pub fn with_cli_rules(mut self, only: Vec<String>, disable: Vec<String>) -> Self {
        self.enabled_rules.extend(only);
        self.disabled_rules.extend(disable);
        self
    }

    /// Whether the rule described by `descriptor` runs.
    pub fn is_enabled(&self, descriptor: &RuleDescriptor) -> bool {
        let listed = |ids: &[String]| ids.iter().any(|id| id.eq_ignore_ascii_case(descriptor.id));
        if listed(&self.disabled_rules) {
            return false;
        }
        if !self.enabled_rules.is_empty() {
            return listed(&self.enabled_rules);
        }
        descriptor.enabled_by_default
    }

    /// The severity diagnostics of `descriptor` report with.
    pub fn severity_for(&self, descriptor: &RuleDescriptor) -> Severity {
        self.severity_overrides
            .iter()
            .find(|(id, _)| id.eq_ignore_ascii_case(descriptor.id))
            .map_or(descriptor.default_severity, |(_, severity)| *severity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULE: RuleDescriptor = RuleDescriptor {
        id: "ACA0006",
        category: "ACA Diagnostics",
        default_severity: Severity::Info,
        enabled_by_default: true,
    };

    #[test]
    fn empty_json_is_default() {
        let config: AnalysisConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AnalysisConfig::default());
        assert_eq!(config.static_import_threshold, 5);
        assert!(config.is_enabled(&RULE));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(serde_json::from_str::<AnalysisConfig>(r#"{"treshold": 3}"#).is_err());
    }

    #[test]
    fn disabled_wins_over_enabled() {
        let config = AnalysisConfig::default()
            .with_cli_rules(vec!["aca0006".into()], vec!["ACA0006".into()]);
        assert!(!config.is_enabled(&RULE));
    }

    #[test]
    fn enabled_list_restricts_rules() {
        let config = AnalysisConfig::default().with_cli_rules(vec!["ACA0001".into()], vec![]);
        assert!(!config.is_enabled(&RULE));
    }

    #[test]
    fn severity_override_applies() {
        let config: AnalysisConfig =
            serde_json::from_str(r#"{"severity_overrides": {"aca0006": "warning"}}"#).unwrap();
        assert_eq!(config.severity_for(&RULE), Severity::Warning);
    }

    #[test]
    fn load_reports_invalid_threshold() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sharpfix.json");
        fs::write(&path, r#"{"static_import_threshold": 0}"#).unwrap();
        assert!(matches!(
            AnalysisConfig::load(&path),
            Err(ConfigError::InvalidThreshold)
        ));
        let missing = dir.path().join("missing.json");
        assert!(matches!(AnalysisConfig::load(&missing), Err(ConfigError::Io { .. })));
    }
}
