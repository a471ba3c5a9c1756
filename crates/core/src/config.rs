//! Engine configuration
//!
//! Every field has a default, so an empty TOML document is a valid config.
//!
//! ```toml
//! move_cooldown_ms = 50
//! rotate_cooldown_ms = 200
//! base_gravity_ms = 1000
//! gravity_floor_ms = 100
//! seed = 42
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::types::{BASE_GRAVITY_MS, GRAVITY_FLOOR_MS, MOVE_COOLDOWN_MS, ROTATE_COOLDOWN_MS};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

/// Tunable pacing and seeding for a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Cooldown shared by left/right/down input moves.
    pub move_cooldown_ms: u64,
    pub rotate_cooldown_ms: u64,
    /// Gravity interval at level 1.
    pub base_gravity_ms: u64,
    pub gravity_floor_ms: u64,
    /// Fixed seed for a reproducible piece sequence; entropy when absent.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            move_cooldown_ms: MOVE_COOLDOWN_MS,
            rotate_cooldown_ms: ROTATE_COOLDOWN_MS,
            base_gravity_ms: BASE_GRAVITY_MS,
            gravity_floor_ms: GRAVITY_FLOOR_MS,
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_gravity_ms == 0 {
            return Err(ConfigError::Invalid("base_gravity_ms must be positive"));
        }
        if self.gravity_floor_ms == 0 {
            return Err(ConfigError::Invalid("gravity_floor_ms must be positive"));
        }
        if self.gravity_floor_ms > self.base_gravity_ms {
            return Err(ConfigError::Invalid(
                "gravity_floor_ms must not exceed base_gravity_ms",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.move_cooldown_ms, 50);
        assert_eq!(config.rotate_cooldown_ms, 200);
    }

    #[test]
    fn partial_document_overrides_fields() {
        let config = EngineConfig::from_toml_str("base_gravity_ms = 800\nseed = 9\n").unwrap();
        assert_eq!(config.base_gravity_ms, 800);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.gravity_floor_ms, GRAVITY_FLOOR_MS);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = EngineConfig::from_toml_str("board_width = 12").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn zero_gravity_is_rejected() {
        let err = EngineConfig::from_toml_str("gravity_floor_ms = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = EngineConfig::from_toml_str("base_gravity_ms = 50").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = EngineConfig::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }
}
