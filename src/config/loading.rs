use std::{fs, path::Path};

use tracing::debug;

use super::EngineConfig;
use crate::{ControlBarError, Result};

impl EngineConfig {
    /// Parses a configuration from TOML text.
    ///
    /// Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ControlBarError::TomlParse` if the text is not valid TOML or
    /// does not match the configuration schema, and
    /// `ControlBarError::InvalidConfigField` if the icon base path is blank.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Self::parse(content, None)
    }

    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns `ControlBarError::IoError` if the file cannot be read, and
    /// the same parse errors as [`EngineConfig::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| ControlBarError::io(e, path))?;
        let config = Self::parse(&content, Some(path))?;
        debug!(path = %path.display(), "Loaded engine configuration");
        Ok(config)
    }

    fn parse(content: &str, path: Option<&Path>) -> Result<Self> {
        let mut config: EngineConfig =
            toml::from_str(content).map_err(|e| ControlBarError::toml_parse(e, path))?;

        if config.icon_base_path.trim().is_empty() {
            return Err(ControlBarError::InvalidConfigField {
                field: "icon_base_path".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        config.normalize();
        Ok(config)
    }
}
