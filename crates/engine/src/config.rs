//! Engine configuration.
//!
//! Loaded from a TOML file; every section and key is optional.
//!
//! # Example
//!
//! ```toml
//! [storage]
//! data_dir = "/var/lib/contractflow"
//!
//! [ids]
//! max_attempts = 5
//!
//! [validation]
//! reject_unknown_fields = true
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

// ── Types ─────────────────────────────────────────────────────────────────────

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub storage: StorageConfig,
    pub ids: IdConfig,
    pub validation: ValidationConfig,
}

/// `[storage]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding `blueprints.json` and `contracts.json`.
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("contractflow-data"),
        }
    }
}

/// `[ids]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdConfig {
    /// How many generated ids to try before surfacing `DuplicateId`.
    pub max_attempts: u32,
}

impl Default for IdConfig {
    fn default() -> Self {
        Self { max_attempts: 5 }
    }
}

/// `[validation]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Refuse field values for ids outside the contract's blueprint, and
    /// values whose kind does not match the field type.
    pub reject_unknown_fields: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("could not parse engine config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid engine config: {0}")]
    Invalid(String),
}

// ── Functions ─────────────────────────────────────────────────────────────────

impl EngineConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ids.max_attempts == 0 {
            return Err(ConfigError::Invalid(
                "ids.max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Read and parse an engine config TOML file from `path`.
pub fn read_engine_config(path: &Path) -> Result<EngineConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    EngineConfig::from_toml_str(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.ids.max_attempts, 5);
        assert_eq!(config.storage.data_dir, PathBuf::from("contractflow-data"));
        assert!(!config.validation.reject_unknown_fields);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
            [validation]
            reject_unknown_fields = true
            "#,
        )
        .unwrap();
        assert!(config.validation.reject_unknown_fields);
        assert_eq!(config.ids.max_attempts, 5);
    }

    #[test]
    fn full_document_parses() {
        let config = EngineConfig::from_toml_str(
            r#"
            [storage]
            data_dir = "/tmp/cf"

            [ids]
            max_attempts = 2
            "#,
        )
        .unwrap();
        assert_eq!(config.storage.data_dir, PathBuf::from("/tmp/cf"));
        assert_eq!(config.ids.max_attempts, 2);
    }

    #[test]
    fn zero_attempts_rejected() {
        let err = EngineConfig::from_toml_str("[ids]\nmax_attempts = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn wrong_type_is_parse_error() {
        let err = EngineConfig::from_toml_str("[ids]\nmax_attempts = \"five\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = read_engine_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
