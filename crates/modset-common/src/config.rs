//! Collector configuration model.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{DESCRIPTOR_FILE, FULL_BUILD_PROFILE};
use crate::error::{ModsetError, Result};

/// Settings for one collector run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CollectorConfig {
    /// File name of the descriptor inside each module directory.
    pub descriptor_file: String,
    /// Profile resolved for the root module.
    pub root_profile: String,
    /// Profile assumed for `module <name>` references without `/<profile>`.
    pub default_profile: String,
    /// Apply composite `base > augment` sections to referenced modules too,
    /// not only to the root.
    pub augment_referenced_profiles: bool,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            descriptor_file: DESCRIPTOR_FILE.into(),
            root_profile: FULL_BUILD_PROFILE.into(),
            default_profile: FULL_BUILD_PROFILE.into(),
            augment_referenced_profiles: false,
        }
    }
}

impl CollectorConfig {
    /// Parses a configuration from YAML text. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ModsetError::Config`] if the text is not a valid
    /// configuration or fails [`Self::validate`].
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(text).map_err(|e| ModsetError::Config {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| ModsetError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_yaml_str(&text)
    }

    /// Checks that every name is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ModsetError::Config`] naming the first empty field.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("descriptor_file", &self.descriptor_file),
            ("root_profile", &self.root_profile),
            ("default_profile", &self.default_profile),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(ModsetError::Config {
                    message: format!("{name} must not be empty"),
                });
            }
        }
        Ok(())
    }
}
