//! Configuration file support for halftrack.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/halftrack/config.toml`.

use crate::plan::DEFAULT_STALE_AFTER_DAYS;
use crate::{Error, Result};
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub plan: PlanConfig,

    #[serde(default)]
    pub completion: CompletionConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Defaults for new plans when the CLI flags are omitted
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlanConfig {
    #[serde(default = "default_days_per_week")]
    pub days_per_week: u8,

    #[serde(default = "default_long_run_day")]
    pub long_run_day: Weekday,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            days_per_week: default_days_per_week(),
            long_run_day: default_long_run_day(),
        }
    }
}

/// Completion logging rules
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CompletionConfig {
    #[serde(default = "default_stale_after_days")]
    pub stale_after_days: i64,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            stale_after_days: default_stale_after_days(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("halftrack")
}

fn default_days_per_week() -> u8 {
    4
}

fn default_long_run_day() -> Weekday {
    Weekday::Sat
}

fn default_stale_after_days() -> i64 {
    DEFAULT_STALE_AFTER_DAYS
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Reject values the planner cannot use
    pub fn validate(&self) -> Result<()> {
        if !(3..=6).contains(&self.plan.days_per_week) {
            return Err(Error::Config(format!(
                "plan.days_per_week must be between 3 and 6, got {}",
                self.plan.days_per_week
            )));
        }
        if self.completion.stale_after_days < 0 {
            return Err(Error::Config(
                "completion.stale_after_days cannot be negative".into(),
            ));
        }
        Ok(())
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("halftrack")
            .join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}
