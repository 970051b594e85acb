use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
}

/// General configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Directory for record stores and logs (XDG data dir when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Customer store file name, relative to the data directory
    #[serde(default = "default_customers_file")]
    pub customers_file: String,

    /// Room store file name, relative to the data directory
    #[serde(default = "default_rooms_file")]
    pub rooms_file: String,

    /// Level written to the log file
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Level also echoed to stderr
    #[serde(default = "default_console_log_level")]
    pub console_log_level: String,
}

impl GeneralConfig {
    pub fn customers_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.customers_file)
    }

    pub fn rooms_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.rooms_file)
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            data_dir: None,
            customers_file: default_customers_file(),
            rooms_file: default_rooms_file(),
            log_level: default_log_level(),
            console_log_level: default_console_log_level(),
        }
    }
}

// Default value functions for serde
fn default_customers_file() -> String {
    "customers.txt".to_string()
}

fn default_rooms_file() -> String {
    "rooms.txt".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_console_log_level() -> String {
    "warn".to_string()
}

/// Trait for configuration storage
pub trait ConfigStorage {
    /// Load configuration from file
    fn load(&self) -> Result<Config>;

    /// Get the config file path
    fn path(&self) -> &PathBuf;

    /// Create default configuration file if it doesn't exist
    fn create_default(&self) -> Result<()>;
}

/// TOML-based implementation of ConfigStorage
pub struct TomlConfigStorage {
    path: PathBuf,
}

impl TomlConfigStorage {
    /// Create a new TomlConfigStorage with the given path
    pub fn new(path: PathBuf) -> Self {
        TomlConfigStorage { path }
    }
}

impl ConfigStorage for TomlConfigStorage {
    fn load(&self) -> Result<Config> {
        use anyhow::Context;
        use std::fs;

        // If file doesn't exist, create default and return it
        if !self.path.exists() {
            log::info!(
                "Config file not found at {:?}, creating default configuration",
                self.path
            );
            self.create_default()?;
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read config from {:?}", self.path))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {:?}", self.path))?;

        log::info!("Loaded configuration from {:?}", self.path);
        log::debug!(
            "Config: customers_file={}, rooms_file={}, data_dir={:?}",
            config.general.customers_file,
            config.general.rooms_file,
            config.general.data_dir
        );

        Ok(config)
    }

    fn path(&self) -> &PathBuf {
        &self.path
    }

    fn create_default(&self) -> Result<()> {
        use anyhow::Context;
        use std::fs;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }

        // Use the example config compiled into the binary
        let example_config = include_str!("../../hotel.toml.example");

        fs::write(&self.path, example_config)
            .with_context(|| format!("Failed to create default config at {:?}", self.path))?;

        log::info!("Created default configuration at {:?}", self.path);

        Ok(())
    }
}
