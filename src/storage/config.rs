use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// How long a flash message stays fully visible, in milliseconds
    #[serde(default = "default_flash_duration_ms")]
    pub flash_duration_ms: u64,

    /// Length of the fade phase after the visible window, in milliseconds.
    /// Messages are only dropped once the fade completes.
    #[serde(default = "default_flash_fade_ms")]
    pub flash_fade_ms: u64,

    /// Log level written to the log file (error, warn, info, debug, trace)
    #[serde(default = "default_file_log_level")]
    pub file_log_level: String,

    /// Minimum log level forwarded to the flash message area
    #[serde(default = "default_flash_log_level")]
    pub flash_log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            flash_duration_ms: default_flash_duration_ms(),
            flash_fade_ms: default_flash_fade_ms(),
            file_log_level: default_file_log_level(),
            flash_log_level: default_flash_log_level(),
        }
    }
}

/// Dashboard panel settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Country data endpoint; the query string restricts the payload to the
    /// fields the cards actually use
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Number of countries sampled per refresh
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            endpoint: default_endpoint(),
            sample_size: default_sample_size(),
        }
    }
}

// Default value functions for serde
fn default_flash_duration_ms() -> u64 {
    3000
}

fn default_flash_fade_ms() -> u64 {
    400
}

fn default_file_log_level() -> String {
    "info".to_string()
}

fn default_flash_log_level() -> String {
    "info".to_string()
}

fn default_endpoint() -> String {
    "https://restcountries.com/v3.1/all?fields=name,population,flags,region,capital".to_string()
}

fn default_sample_size() -> usize {
    8
}

/// Trait for configuration storage
pub trait ConfigStorage: Send + Sync {
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

        log::debug!(
            "Config: endpoint={}, sample_size={}",
            config.dashboard.endpoint,
            config.dashboard.sample_size
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
        let example_config = include_str!("../../regbook.toml.example");

        fs::write(&self.path, example_config)
            .with_context(|| format!("Failed to create default config at {:?}", self.path))?;

        log::info!("Created default configuration at {:?}", self.path);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.general.flash_duration_ms, 3000);
        assert_eq!(config.general.flash_fade_ms, 400);
        assert_eq!(config.dashboard.sample_size, 8);
        assert!(config.dashboard.endpoint.contains("fields="));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let toml_str = r#"
        [dashboard]
        sample_size = 4
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.dashboard.sample_size, 4);
        assert_eq!(
            config.dashboard.endpoint,
            DashboardConfig::default().endpoint
        );
        assert_eq!(config.general.flash_duration_ms, 3000);
    }

    #[test]
    fn test_example_config_parses() {
        let example = include_str!("../../regbook.toml.example");
        let config: Config = toml::from_str(example).unwrap();
        assert_eq!(config.dashboard.sample_size, 8);
        assert_eq!(config.general.flash_duration_ms, 3000);
    }
}
