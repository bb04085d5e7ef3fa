use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

// =============================================================================
// Defaults
// =============================================================================

/// Timeout for one universe fetch in milliseconds (30 seconds)
pub const FETCH_TIMEOUT_MS: u64 = 30_000;

/// Advisories processed at the same time by `emit_batch`
pub const DEFAULT_CONCURRENCY: usize = 8;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Which versions count as fixed when an advisory has both a range and
/// explicit fixed versions
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum FixedVersionPolicy {
    /// Fixed versions are the universe versions outside the range
    #[default]
    PreferRange,
    /// Fixed versions are the advisory's explicit fixed versions
    PreferExplicitFixed,
}

/// Improver configuration structure
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ImproverConfig {
    /// Timeout for one universe fetch in milliseconds
    pub fetch_timeout_ms: u64,
    /// Maximum number of advisories processed concurrently
    pub concurrency: usize,
    /// Only consider versions published before the advisory
    pub bound_by_publication_date: bool,
    pub fixed_version_policy: FixedVersionPolicy,
    /// Version strings dropped from every universe (e.g. known bogus tags)
    pub ignorable_versions: Vec<String>,
    pub log: LogConfig,
}

impl Default for ImproverConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_ms: FETCH_TIMEOUT_MS,
            concurrency: DEFAULT_CONCURRENCY,
            bound_by_publication_date: true,
            fixed_version_policy: FixedVersionPolicy::default(),
            ignorable_versions: Vec::new(),
            log: LogConfig::default(),
        }
    }
}

impl ImproverConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                field: "concurrency",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.fetch_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "fetchTimeoutMs",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct LogConfig {
    /// Default filter directive, overridden by `RUST_LOG`
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn improver_config_from_partial_object_uses_defaults_for_missing_fields() {
        let result = serde_json::from_value::<ImproverConfig>(json!({
            "fetchTimeoutMs": 1000
        }))
        .unwrap();

        assert_eq!(result.fetch_timeout_ms, 1000);
        assert_eq!(result.concurrency, DEFAULT_CONCURRENCY);
        assert!(result.bound_by_publication_date);
        assert_eq!(result.log, LogConfig::default());
    }

    #[test]
    fn improver_config_from_full_object_parses_all_fields() {
        let result = serde_json::from_value::<ImproverConfig>(json!({
            "fetchTimeoutMs": 5000,
            "concurrency": 2,
            "boundByPublicationDate": false,
            "fixedVersionPolicy": "preferExplicitFixed",
            "ignorableVersions": ["0.0.0-dev"],
            "log": { "level": "debug", "json": true }
        }))
        .unwrap();

        assert_eq!(
            result,
            ImproverConfig {
                fetch_timeout_ms: 5000,
                concurrency: 2,
                bound_by_publication_date: false,
                fixed_version_policy: FixedVersionPolicy::PreferExplicitFixed,
                ignorable_versions: vec!["0.0.0-dev".to_string()],
                log: LogConfig {
                    level: "debug".to_string(),
                    json: true,
                },
            }
        );
    }

    #[test]
    fn from_json_str_rejects_zero_concurrency() {
        let result = ImproverConfig::from_json_str(r#"{ "concurrency": 0 }"#);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                field: "concurrency",
                ..
            })
        ));
    }

    #[test]
    fn from_json_str_rejects_unknown_policy() {
        let result = ImproverConfig::from_json_str(r#"{ "fixedVersionPolicy": "newest" }"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn from_path_reads_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "concurrency": 3 }}"#).unwrap();

        let config = ImproverConfig::from_path(file.path()).unwrap();

        assert_eq!(config.concurrency, 3);
        assert_eq!(config.fetch_timeout_ms, FETCH_TIMEOUT_MS);
    }

    #[test]
    fn from_path_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = ImproverConfig::from_path(dir.path().join("missing.json"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
