use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::store::{StoreOptions, DEFAULT_DATETIME_FORMAT, DEFAULT_DATE_FORMAT, DEFAULT_ENTRIES_KEY, DEFAULT_TASKS_KEY};
use crate::utils;

/// Current configuration version
pub const CURRENT_CONFIG_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_storage_path")]
    pub storage_path: String,
    #[serde(default = "default_entries_key")]
    pub entries_key: String,
    #[serde(default = "default_tasks_key")]
    pub tasks_key: String,
    #[serde(default = "default_persist_tasks")]
    pub persist_tasks: bool,
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default = "default_datetime_format")]
    pub datetime_format: String,
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub key_bindings: KeyBindings,
    #[serde(default = "default_current_theme")]
    pub current_theme: String,
    #[serde(default)]
    pub themes: HashMap<String, Theme>,
    #[serde(default = "default_config_version")]
    pub config_version: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBindings {
    #[serde(default = "default_quit")]
    pub quit: String,
    #[serde(default = "default_next_pane")]
    pub next_pane: String,
    #[serde(default = "default_prev_pane")]
    pub prev_pane: String,
    #[serde(default = "default_submit")]
    pub submit: String,
    #[serde(default = "default_delete")]
    pub delete: String,
    #[serde(default = "default_toggle_task")]
    pub toggle_task: String,
    #[serde(default = "default_list_up")]
    pub list_up: String,
    #[serde(default = "default_list_down")]
    pub list_down: String,
    #[serde(default = "default_help")]
    pub help: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    #[serde(default = "default_fg")]
    pub fg: String,
    #[serde(default = "default_bg")]
    pub bg: String,
    #[serde(default = "default_highlight_bg")]
    pub highlight_bg: String,
    #[serde(default = "default_highlight_fg")]
    pub highlight_fg: String,
    #[serde(default = "default_border")]
    pub border: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_path: default_storage_path(),
            entries_key: default_entries_key(),
            tasks_key: default_tasks_key(),
            persist_tasks: default_persist_tasks(),
            date_format: default_date_format(),
            datetime_format: default_datetime_format(),
            tick_interval_ms: default_tick_interval_ms(),
            log_level: default_log_level(),
            key_bindings: KeyBindings::default(),
            current_theme: default_current_theme(),
            themes: HashMap::new(),
            config_version: Some(CURRENT_CONFIG_VERSION),
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: default_quit(),
            next_pane: default_next_pane(),
            prev_pane: default_prev_pane(),
            submit: default_submit(),
            delete: default_delete(),
            toggle_task: default_toggle_task(),
            list_up: default_list_up(),
            list_down: default_list_down(),
            help: default_help(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            fg: default_fg(),
            bg: default_bg(),
            highlight_bg: default_highlight_bg(),
            highlight_fg: default_highlight_fg(),
            border: default_border(),
        }
    }
}

impl Theme {
    fn preset(fg: &str, bg: &str, highlight_bg: &str, highlight_fg: &str, border: &str) -> Self {
        Self {
            fg: fg.to_string(),
            bg: bg.to_string(),
            highlight_bg: highlight_bg.to_string(),
            highlight_fg: highlight_fg.to_string(),
            border: border.to_string(),
        }
    }

    /// Get preset themes that are always available
    pub fn get_preset_themes() -> HashMap<String, Theme> {
        let mut themes = HashMap::new();
        themes.insert("default".to_string(), Theme::default());
        themes.insert("paper".to_string(), Theme::preset("black", "white", "blue", "white", "darkgray"));
        themes.insert("sepia".to_string(), Theme::preset("#5b4636", "#f4ecd8", "#a0522d", "", "#8b7355"));
        themes.insert("monochrome".to_string(), Theme::preset("white", "black", "white", "black", "white"));
        themes
    }
}

// Default value functions
fn default_storage_path() -> String {
    // This is a fallback - actual profile will be determined at load time
    Config::default_storage_path_for_profile(utils::Profile::Prod)
}

fn default_entries_key() -> String {
    DEFAULT_ENTRIES_KEY.to_string()
}

fn default_tasks_key() -> String {
    DEFAULT_TASKS_KEY.to_string()
}

fn default_persist_tasks() -> bool {
    true
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_datetime_format() -> String {
    DEFAULT_DATETIME_FORMAT.to_string()
}

fn default_tick_interval_ms() -> u64 {
    1000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_quit() -> String {
    "Ctrl+q".to_string()
}

fn default_next_pane() -> String {
    "Tab".to_string()
}

fn default_prev_pane() -> String {
    "BackTab".to_string()
}

fn default_submit() -> String {
    "Ctrl+s".to_string()
}

fn default_delete() -> String {
    "d".to_string()
}

fn default_toggle_task() -> String {
    "Space".to_string()
}

fn default_list_up() -> String {
    "k".to_string()
}

fn default_list_down() -> String {
    "j".to_string()
}

fn default_help() -> String {
    "F1".to_string()
}

fn default_current_theme() -> String {
    "default".to_string()
}

fn default_fg() -> String {
    "white".to_string()
}

fn default_bg() -> String {
    "black".to_string()
}

fn default_highlight_bg() -> String {
    "blue".to_string()
}

fn default_highlight_fg() -> String {
    "white".to_string()
}

fn default_border() -> String {
    "gray".to_string()
}

fn default_config_version() -> Option<u32> {
    Some(CURRENT_CONFIG_VERSION)
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config directory: {0}")]
    ConfigDirError(String),
    #[error("Failed to read config file: {0}")]
    ReadError(String),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to write config file: {0}")]
    WriteError(String),
    #[error("Invalid setting {field}: {reason}")]
    InvalidSetting { field: &'static str, reason: String },
}

impl Config {
    /// Load configuration for a profile, creating the default file if missing
    pub fn load_with_profile(profile: utils::Profile) -> Result<Self, ConfigError> {
        let config_path = Self::get_config_path(profile)?;
        let mut config = Self::load_from_path(&config_path, profile)?;

        // Dev and prod never share a storage file
        if profile == utils::Profile::Dev {
            config.storage_path = Self::default_storage_path_for_profile(profile);
        }
        Ok(config)
    }

    /// Load configuration from an explicit file. A missing file is created
    /// with defaults for the given profile.
    pub fn load_from_path(config_path: &Path, profile: utils::Profile) -> Result<Self, ConfigError> {
        let config = if config_path.exists() {
            let contents = fs::read_to_string(config_path)
                .map_err(|e| ConfigError::ReadError(e.to_string()))?;
            toml::from_str::<Config>(&contents)?
        } else {
            let mut config = Config {
                storage_path: Self::default_storage_path_for_profile(profile),
                ..Config::default()
            };
            config.save_to_path(config_path)?;
            config
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would break the store at runtime
    pub fn validate(&self) -> Result<(), ConfigError> {
        if utils::is_blank(&self.entries_key) {
            return Err(ConfigError::InvalidSetting {
                field: "entries_key",
                reason: "must not be empty".to_string(),
            });
        }
        if utils::is_blank(&self.tasks_key) || self.tasks_key == self.entries_key {
            return Err(ConfigError::InvalidSetting {
                field: "tasks_key",
                reason: "must be non-empty and differ from entries_key".to_string(),
            });
        }
        if !utils::is_valid_time_format(&self.date_format) {
            return Err(ConfigError::InvalidSetting {
                field: "date_format",
                reason: format!("'{}' is not a valid strftime format", self.date_format),
            });
        }
        if !utils::is_valid_time_format(&self.datetime_format) {
            return Err(ConfigError::InvalidSetting {
                field: "datetime_format",
                reason: format!("'{}' is not a valid strftime format", self.datetime_format),
            });
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::InvalidSetting {
                field: "tick_interval_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    pub fn save_to_path(&mut self, config_path: &Path) -> Result<(), ConfigError> {
        // Ensure config version is set before saving
        self.config_version = Some(CURRENT_CONFIG_VERSION);

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::WriteError(e.to_string()))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::WriteError(format!("Failed to serialize config: {}", e)))?;

        fs::write(config_path, toml_string)
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;

        Ok(())
    }

    /// Get the path to the config file
    pub fn get_config_path(profile: utils::Profile) -> Result<PathBuf, ConfigError> {
        let config_dir = utils::get_config_dir(profile)
            .ok_or_else(|| ConfigError::ConfigDirError("Could not determine config directory".to_string()))?;
        Ok(config_dir.join("config.toml"))
    }

    fn default_storage_path_for_profile(profile: utils::Profile) -> String {
        if let Some(data_dir) = utils::get_data_dir(profile) {
            data_dir.join("journal.db").to_string_lossy().to_string()
        } else {
            match profile {
                utils::Profile::Dev => "~/.local/share/journal-dev/journal.db".to_string(),
                utils::Profile::Prod => "~/.local/share/journal/journal.db".to_string(),
            }
        }
    }

    /// Get the expanded storage path (with ~ expansion)
    pub fn get_storage_path(&self) -> PathBuf {
        utils::expand_path(&self.storage_path)
    }

    /// Directory log files are written to, next to the storage file
    pub fn get_log_dir(&self) -> PathBuf {
        self.get_storage_path()
            .parent()
            .map(|p| p.join("logs"))
            .unwrap_or_else(|| PathBuf::from("logs"))
    }

    /// Options handed to the journal store
    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            entries_key: self.entries_key.clone(),
            tasks_key: self.tasks_key.clone(),
            persist_tasks: self.persist_tasks,
            date_format: self.date_format.clone(),
            datetime_format: self.datetime_format.clone(),
        }
    }

    /// Get the currently active theme
    /// If highlight_fg is not set (empty string), it will be calculated from highlight_bg
    pub fn get_active_theme(&self) -> Theme {
        use crate::tui::widgets::color::{parse_color, get_contrast_text_color, format_color_for_display};

        let mut theme = if let Some(theme) = self.themes.get(&self.current_theme) {
            theme.clone()
        } else if let Some(theme) = Theme::get_preset_themes().get(&self.current_theme) {
            theme.clone()
        } else {
            Theme::default()
        };

        if theme.highlight_fg.is_empty() {
            let highlight_bg_color = parse_color(&theme.highlight_bg);
            let calculated_fg = get_contrast_text_color(highlight_bg_color);
            theme.highlight_fg = format_color_for_display(&calculated_fg);
        }

        theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cfg").join("config.toml");
        let config = Config::load_from_path(&path, utils::Profile::Prod).unwrap();
        assert!(path.exists());
        assert_eq!(config.entries_key, "journalEntries");
        assert_eq!(config.tick_interval_ms, 1000);
        assert!(config.persist_tasks);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "persist_tasks = false\n[key_bindings]\nquit = \"q\"\n").unwrap();
        let config = Config::load_from_path(&path, utils::Profile::Prod).unwrap();
        assert!(!config.persist_tasks);
        assert_eq!(config.key_bindings.quit, "q");
        assert_eq!(config.key_bindings.submit, "Ctrl+s");
        assert_eq!(config.date_format, "%Y-%m-%d");
    }

    #[test]
    fn saved_config_reloads_identically() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config {
            date_format: "%d.%m.%Y".to_string(),
            current_theme: "paper".to_string(),
            ..Config::default()
        };
        config.save_to_path(&path).unwrap();
        let loaded = Config::load_from_path(&path, utils::Profile::Prod).unwrap();
        assert_eq!(loaded.date_format, "%d.%m.%Y");
        assert_eq!(loaded.current_theme, "paper");
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "persist_tasks = [").unwrap();
        let err = Config::load_from_path(&path, utils::Profile::Prod).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn rejects_shared_slot_keys() {
        let config = Config {
            tasks_key: "journalEntries".to_string(),
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSetting { field: "tasks_key", .. })
        ));
    }

    #[test]
    fn rejects_zero_tick_interval() {
        let config = Config {
            tick_interval_ms: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn store_options_mirror_config() {
        let config = Config {
            persist_tasks: false,
            tasks_key: "todo".to_string(),
            ..Config::default()
        };
        let options = config.store_options();
        assert!(!options.persist_tasks);
        assert_eq!(options.tasks_key, "todo");
        assert_eq!(options.entries_key, "journalEntries");
    }

    #[test]
    fn unknown_theme_falls_back_to_default() {
        let config = Config {
            current_theme: "nope".to_string(),
            ..Config::default()
        };
        let theme = config.get_active_theme();
        assert_eq!(theme.fg, "white");
        assert_eq!(theme.bg, "black");
    }

    #[test]
    fn empty_highlight_fg_is_derived() {
        let config = Config {
            current_theme: "sepia".to_string(),
            ..Config::default()
        };
        assert!(!config.get_active_theme().highlight_fg.is_empty());
    }

    #[test]
    fn log_dir_sits_next_to_storage() {
        let config = Config {
            storage_path: "/tmp/journal/journal.db".to_string(),
            ..Config::default()
        };
        assert_eq!(config.get_log_dir(), PathBuf::from("/tmp/journal/logs"));
    }
}
