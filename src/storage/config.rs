use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::search_bar::SearchBarOptions;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(rename = "search-bar", default)]
    pub search_bar: SearchBarConfig,
}

/// General configuration settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Theme name (built-in or a file in the themes directory)
    #[serde(default = "default_theme")]
    pub theme: String,

    /// Minimum level written to the log file
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Minimum level shown as a flash message in the status bar
    #[serde(default = "default_flash_level")]
    pub flash_level: String,

    /// How long flash messages stay visible
    #[serde(default = "default_flash_message_duration_ms")]
    pub flash_message_duration_ms: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            theme: default_theme(),
            log_level: default_log_level(),
            flash_level: default_flash_level(),
            flash_message_duration_ms: default_flash_message_duration_ms(),
        }
    }
}

/// Search bar settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchBarConfig {
    #[serde(default = "default_placeholder")]
    pub placeholder: String,

    /// Width of the text field when expanded, in cells
    #[serde(default = "default_expanded_width")]
    pub expanded_width: u16,

    /// Delay between expanding and focusing the field
    #[serde(default = "default_focus_delay_ms")]
    pub focus_delay_ms: u64,

    /// Length of the expand/collapse animation (0 disables it)
    #[serde(default = "default_transition_ms")]
    pub transition_ms: u64,

    #[serde(default = "default_search_label")]
    pub search_label: String,

    #[serde(default = "default_close_label")]
    pub close_label: String,

    /// Start with the search bar expanded
    #[serde(default)]
    pub start_expanded: bool,

    /// Clicks in the results panel collapse an empty search bar
    #[serde(default = "default_anchor_to_results")]
    pub anchor_to_results: bool,
}

impl Default for SearchBarConfig {
    fn default() -> Self {
        SearchBarConfig {
            placeholder: default_placeholder(),
            expanded_width: default_expanded_width(),
            focus_delay_ms: default_focus_delay_ms(),
            transition_ms: default_transition_ms(),
            search_label: default_search_label(),
            close_label: default_close_label(),
            start_expanded: false,
            anchor_to_results: default_anchor_to_results(),
        }
    }
}

impl SearchBarConfig {
    pub fn to_options(&self) -> SearchBarOptions {
        SearchBarOptions {
            placeholder: (!self.placeholder.is_empty()).then(|| self.placeholder.clone()),
            expanded_width: self.expanded_width,
            focus_delay: Duration::from_millis(self.focus_delay_ms),
            transition: Duration::from_millis(self.transition_ms),
            search_label: self.search_label.clone(),
            close_label: self.close_label.clone(),
        }
    }
}

// Default value functions for serde
fn default_theme() -> String {
    "catppuccin-mocha".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_flash_level() -> String {
    "info".to_string()
}

fn default_flash_message_duration_ms() -> u64 {
    3000
}

fn default_placeholder() -> String {
    "Search...".to_string()
}

fn default_expanded_width() -> u16 {
    24
}

fn default_focus_delay_ms() -> u64 {
    300
}

fn default_transition_ms() -> u64 {
    300
}

fn default_search_label() -> String {
    "Search".to_string()
}

fn default_close_label() -> String {
    "Close".to_string()
}

fn default_anchor_to_results() -> bool {
    true
}

/// Trait for configuration storage
pub trait ConfigStorage: Send + Sync {
    /// Load configuration from file
    fn load(&self) -> Result<Config>;

    /// Save configuration to file
    fn save(&self, config: &Config) -> Result<()>;

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
            "Config: theme={}, expanded_width={}, focus_delay_ms={}",
            config.general.theme,
            config.search_bar.expanded_width,
            config.search_bar.focus_delay_ms
        );

        Ok(config)
    }

    fn save(&self, config: &Config) -> Result<()> {
        let toml_str =
            toml::to_string_pretty(config).context("Failed to serialize configuration")?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }

        fs::write(&self.path, toml_str)
            .with_context(|| format!("Failed to write config to {:?}", self.path))?;

        log::debug!("Saved configuration to {:?}", self.path);

        Ok(())
    }

    fn path(&self) -> &PathBuf {
        &self.path
    }

    fn create_default(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }

        // Use the example config compiled into the binary
        let example_config = include_str!("../../searchbar.toml.example");

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
        assert_eq!(config.general.theme, "catppuccin-mocha");
        assert_eq!(config.general.flash_message_duration_ms, 3000);
        assert_eq!(config.search_bar.expanded_width, 24);
        assert_eq!(config.search_bar.focus_delay_ms, 300);
        assert_eq!(config.search_bar.transition_ms, 300);
        assert!(config.search_bar.anchor_to_results);
        assert!(!config.search_bar.start_expanded);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [search-bar]
            placeholder = "Find a package"
            focus_delay_ms = 150
            "#,
        )
        .unwrap();

        assert_eq!(config.general, GeneralConfig::default());
        assert_eq!(config.search_bar.placeholder, "Find a package");
        assert_eq!(config.search_bar.focus_delay_ms, 150);
        assert_eq!(config.search_bar.close_label, "Close");
    }

    #[test]
    fn test_example_config_matches_defaults() {
        let config: Config = toml::from_str(include_str!("../../searchbar.toml.example")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_to_options() {
        let mut config = SearchBarConfig::default();
        config.placeholder.clear();
        config.transition_ms = 0;

        let options = config.to_options();
        assert_eq!(options.placeholder, None);
        assert_eq!(options.focus_delay, Duration::from_millis(300));
        assert!(options.transition.is_zero());
        assert_eq!(options.search_label, "Search");
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir()
            .join(format!("searchbar-config-test-{}", std::process::id()))
            .join("searchbar.toml");
        let storage = TomlConfigStorage::new(path.clone());

        let mut config = Config::default();
        config.general.theme = "tokyonight-day".to_string();
        config.search_bar.expanded_width = 40;
        storage.save(&config).unwrap();

        assert_eq!(storage.load().unwrap(), config);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
