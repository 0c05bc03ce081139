//! Configuration file support for the studio tools.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/studio/config.toml`.

use crate::{BookingPolicy, Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub booking: BookingPolicy,

    #[serde(default)]
    pub seed: SeedConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_snapshot_file")]
    pub snapshot_file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            snapshot_file: default_snapshot_file(),
        }
    }
}

/// Sample data configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Populate a brand-new store with the built-in sample records
    #[serde(default = "default_sample_data")]
    pub sample_data: bool,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            sample_data: default_sample_data(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("studio")
}

fn default_snapshot_file() -> String {
    "studio_data.json".into()
}

fn default_sample_data() -> bool {
    true
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        match Self::default_config_path() {
            Some(config_path) if config_path.exists() => Self::load_from(&config_path),
            config_path => {
                tracing::info!(
                    "No config file found at {:?}, using defaults",
                    config_path
                );
                Ok(Self::default())
            }
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
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|base| base.join("studio").join("config.toml"))
    }

    /// Path of the snapshot file inside `data_dir`
    pub fn snapshot_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.data.snapshot_file)
    }

    fn validate(&self) -> Result<()> {
        let name = self.data.snapshot_file.trim();
        if name.is_empty() {
            return Err(Error::Config("data.snapshot_file must not be empty".into()));
        }
        if Path::new(name).components().count() != 1 {
            return Err(Error::Config(format!(
                "data.snapshot_file must be a plain file name, got '{}'",
                name
            )));
        }
        Ok(())
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
