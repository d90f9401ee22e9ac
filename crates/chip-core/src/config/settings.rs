use crate::Result;
use crate::chip::DeletePolicy;
use chip_types::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Main configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub appearance: AppearanceConfig,

    #[serde(default)]
    pub behavior: BehaviorConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppearanceConfig {
    /// Theme applied to every chip at startup
    #[serde(default)]
    pub theme: Theme,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorConfig {
    /// Let the delete affordance fire on disabled chips
    #[serde(default)]
    pub delete_when_disabled: bool,
}

impl BehaviorConfig {
    #[must_use]
    pub fn delete_policy(&self) -> DeletePolicy {
        if self.delete_when_disabled {
            DeletePolicy::AlwaysActive
        } else {
            DeletePolicy::SuppressWhenDisabled
        }
    }
}

impl Config {
    /// Load config from file.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid JSON.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        super::validation::warn_unknown_fields(&content, "config.json");
        let config = serde_json::from_str(&content)?;
        info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Save config to file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.appearance.theme
    }

    #[must_use]
    pub fn delete_policy(&self) -> DeletePolicy {
        self.behavior.delete_policy()
    }
}
