//! Configuration file support for the BMI tracker.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/bmi/config.toml`.

use crate::store::DEFAULT_DATABASE_FILE;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Largest number of decimals the history table will render
pub const MAX_DECIMALS: usize = 6;

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_database_file")]
    pub database_file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            database_file: default_database_file(),
        }
    }
}

/// Output formatting configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_decimals")]
    pub decimals: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            decimals: default_decimals(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("bmi")
}

fn default_database_file() -> String {
    DEFAULT_DATABASE_FILE.into()
}

fn default_decimals() -> usize {
    2
}

/// Replace a leading `~` component with the home directory
fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        (Ok(_), None) => {
            tracing::warn!("Cannot expand {:?}: no home directory", path);
            path.to_path_buf()
        }
        (Err(_), _) => path.to_path_buf(),
    }
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        Self::load_or_default(&Self::default_config_path())
    }

    /// Load configuration from `path`, falling back to defaults if it is missing
    pub fn load_or_default(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            Self::load_from(config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
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

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));
        base.join("bmi").join("config.toml")
    }

    /// Check values that serde alone cannot reject
    pub fn validate(&self) -> Result<()> {
        if self.data.database_file.trim().is_empty() {
            return Err(Error::Config("data.database_file must not be empty".into()));
        }
        if self.display.decimals > MAX_DECIMALS {
            return Err(Error::Config(format!(
                "display.decimals must be at most {}, got {}",
                MAX_DECIMALS, self.display.decimals
            )));
        }
        Ok(())
    }

    /// Full path of the measurement database; a leading `~` in `data_dir`
    /// resolves to the home directory
    pub fn database_path(&self) -> PathBuf {
        expand_home(&self.data.data_dir).join(&self.data.database_file)
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
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
