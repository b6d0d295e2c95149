// SPDX-License-Identifier: LGPL-3.0-only

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Minimum distance kept between an overlay and the viewport top, so
/// overlays never render under a persistent top chrome bar.
pub const DEFAULT_TOP_CLAMP: f64 = 32.0;

/// Errors that can occur when loading or validating engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file {0}: {1}")]
    Read(PathBuf, std::io::Error),

    /// Failed to parse the TOML configuration.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A margin or clamp value was negative.
    #[error("Invalid {name}: {value} (must be non-negative)")]
    NegativeValue {
        /// Name of the offending field.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
}

/// Engine configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PopoverConfig {
    /// Grace margin applied when testing overflow before flipping.
    pub flip_margin: f64,
    /// Minimum final top coordinate of any placed overlay.
    pub top_clamp: f64,
    /// Class of the scrollable root container to watch for resizes. When
    /// set, [initialize](crate::engine::PopoverEngine::initialize) may be
    /// called without repeating the class.
    pub container_class: Option<String>,
}

impl Default for PopoverConfig {
    fn default() -> Self {
        Self {
            flip_margin: 0.0,
            top_clamp: DEFAULT_TOP_CLAMP,
            container_class: None,
        }
    }
}

impl PopoverConfig {
    /// Parse a configuration from a TOML string.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file from disk.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|err| ConfigError::Read(path.to_path_buf(), err))?;
        Self::from_toml_str(&raw)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.flip_margin < 0.0 {
            return Err(ConfigError::NegativeValue {
                name: "flip_margin",
                value: self.flip_margin,
            });
        }
        if self.top_clamp < 0.0 {
            return Err(ConfigError::NegativeValue {
                name: "top_clamp",
                value: self.top_clamp,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_engine_constants() {
        let config = PopoverConfig::default();
        assert_eq!(config.flip_margin, 0.0);
        assert_eq!(config.top_clamp, DEFAULT_TOP_CLAMP);
        assert_eq!(config.container_class, None);
    }

    #[test]
    fn parses_partial_toml() {
        let config = PopoverConfig::from_toml_str(
            r#"
            flip_margin = 8.0
            container_class = "main-content"
            "#,
        )
        .unwrap();

        assert_eq!(config.flip_margin, 8.0);
        assert_eq!(config.top_clamp, DEFAULT_TOP_CLAMP);
        assert_eq!(config.container_class.as_deref(), Some("main-content"));
    }

    #[test]
    fn rejects_negative_margin() {
        let err = PopoverConfig::from_toml_str("flip_margin = -1.0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NegativeValue {
                name: "flip_margin",
                ..
            }
        ));
    }
}
