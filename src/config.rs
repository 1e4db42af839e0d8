use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::utils;

/// Current configuration version
pub const CURRENT_CONFIG_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChimeKind {
    Bell,
    Command,
    Off,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database_path")]
    pub database_path: String,
    /// Global sound preference; a reminder chimes only if this and its own flag are on
    #[serde(default = "default_true")]
    pub sound_enabled: bool,
    #[serde(default = "default_snooze_minutes")]
    pub snooze_minutes: u32,
    #[serde(default = "default_check_interval_secs")]
    pub check_interval_secs: u64,
    #[serde(default = "default_chime")]
    pub chime: ChimeKind,
    #[serde(default)]
    pub chime_command: Vec<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_list_width")]
    pub list_width_percent: u16,
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
    #[serde(default = "default_new")]
    pub new: String,
    #[serde(default = "default_edit")]
    pub edit: String,
    #[serde(default = "default_save")]
    pub save: String,
    #[serde(default = "default_delete")]
    pub delete: String,
    #[serde(default = "default_mark_taken")]
    pub mark_taken: String,
    #[serde(default = "default_mark_missed")]
    pub mark_missed: String,
    #[serde(default = "default_snooze")]
    pub snooze: String,
    #[serde(default = "default_toggle_sound")]
    pub toggle_sound: String,
    #[serde(default = "default_clear_all")]
    pub clear_all: String,
    #[serde(default = "default_list_up")]
    pub list_up: String,
    #[serde(default = "default_list_down")]
    pub list_down: String,
    #[serde(default = "default_help")]
    pub help: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    #[serde(default = "default_fg")]
    pub fg: String,
    #[serde(default = "default_bg")]
    pub bg: String,
    #[serde(default = "default_highlight_bg")]
    pub highlight_bg: String,
    #[serde(default = "default_highlight_fg")]
    pub highlight_fg: String,
    #[serde(default = "default_accent")]
    pub accent: String,
    #[serde(default = "default_taken")]
    pub taken: String,
    #[serde(default = "default_missed")]
    pub missed: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            sound_enabled: true,
            snooze_minutes: default_snooze_minutes(),
            check_interval_secs: default_check_interval_secs(),
            chime: default_chime(),
            chime_command: Vec::new(),
            log_level: default_log_level(),
            list_width_percent: default_list_width(),
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
            new: default_new(),
            edit: default_edit(),
            save: default_save(),
            delete: default_delete(),
            mark_taken: default_mark_taken(),
            mark_missed: default_mark_missed(),
            snooze: default_snooze(),
            toggle_sound: default_toggle_sound(),
            clear_all: default_clear_all(),
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
            accent: default_accent(),
            taken: default_taken(),
            missed: default_missed(),
        }
    }
}

impl Theme {
    fn preset(fg: &str, bg: &str, highlight_bg: &str, highlight_fg: &str, accent: &str) -> Self {
        Self {
            fg: fg.to_string(),
            bg: bg.to_string(),
            highlight_bg: highlight_bg.to_string(),
            highlight_fg: highlight_fg.to_string(),
            accent: accent.to_string(),
            taken: default_taken(),
            missed: default_missed(),
        }
    }

    /// Get preset themes that are always available
    pub fn get_preset_themes() -> HashMap<String, Theme> {
        let mut themes = HashMap::new();
        themes.insert("default".to_string(), Theme::default());
        themes.insert("dark".to_string(), Theme::preset("white", "black", "cyan", "black", "yellow"));
        themes.insert("light".to_string(), Theme::preset("black", "white", "blue", "white", "magenta"));
        themes.insert("green".to_string(), Theme::preset("green", "black", "yellow", "black", "lightgreen"));
        themes.insert("monochrome".to_string(), Theme {
            taken: "white".to_string(),
            missed: "white".to_string(),
            ..Theme::preset("white", "black", "white", "black", "white")
        });
        themes
    }
}

// Default value functions
fn default_database_path() -> String {
    // Fallback only; load_with_profile pins the path to the active profile
    if let Some(data_dir) = utils::get_data_dir(utils::Profile::Prod) {
        data_dir.join("meditrak.db").to_string_lossy().to_string()
    } else {
        "~/.local/share/meditrak/meditrak.db".to_string()
    }
}

fn default_true() -> bool {
    true
}

fn default_snooze_minutes() -> u32 {
    10
}

fn default_check_interval_secs() -> u64 {
    60
}

fn default_chime() -> ChimeKind {
    ChimeKind::Bell
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_list_width() -> u16 {
    45
}

fn default_quit() -> String {
    "q".to_string()
}

fn default_new() -> String {
    "n".to_string()
}

fn default_edit() -> String {
    "e".to_string()
}

fn default_save() -> String {
    "Ctrl+s".to_string()
}

fn default_delete() -> String {
    "d".to_string()
}

fn default_mark_taken() -> String {
    "t".to_string()
}

fn default_mark_missed() -> String {
    "m".to_string()
}

fn default_snooze() -> String {
    "z".to_string()
}

fn default_toggle_sound() -> String {
    "s".to_string()
}

fn default_clear_all() -> String {
    "C".to_string()
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

fn default_accent() -> String {
    "cyan".to_string()
}

fn default_taken() -> String {
    "green".to_string()
}

fn default_missed() -> String {
    "red".to_string()
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
    #[error("Invalid setting: {0}")]
    InvalidValue(String),
}

impl Config {
    /// Load configuration from the profile's config file, creating it with
    /// defaults if missing
    pub fn load_with_profile(profile: utils::Profile) -> Result<Self, ConfigError> {
        let config_path = Self::get_config_path(profile)?;
        let mut config = Self::load_from_path(&config_path)?;
        // Keep dev and prod data apart even if the file was edited by hand
        config.database_path = Self::default_database_path_for_profile(profile);
        Ok(config)
    }

    /// Load from an explicit file. A missing file is created with defaults.
    pub fn load_from_path(config_path: &Path) -> Result<Self, ConfigError> {
        if config_path.exists() {
            let contents = fs::read_to_string(config_path)
                .map_err(|e| ConfigError::ReadError(e.to_string()))?;
            let config: Config = toml::from_str(&contents)?;
            config.validate()?;
            Ok(config)
        } else {
            let mut config = Config::default();
            config.save_to_path(config_path)?;
            Ok(config)
        }
    }

    /// Save configuration to the profile's config file
    pub fn save_with_profile(&mut self, profile: utils::Profile) -> Result<(), ConfigError> {
        let config_path = Self::get_config_path(profile)?;
        self.save_to_path(&config_path)
    }

    pub fn save_to_path(&mut self, config_path: &Path) -> Result<(), ConfigError> {
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

    fn validate(&self) -> Result<(), ConfigError> {
        if self.snooze_minutes == 0 {
            return Err(ConfigError::InvalidValue("snooze_minutes must be at least 1".to_string()));
        }
        if self.check_interval_secs == 0 {
            return Err(ConfigError::InvalidValue("check_interval_secs must be at least 1".to_string()));
        }
        if self.chime == ChimeKind::Command && self.chime_command.is_empty() {
            return Err(ConfigError::InvalidValue(
                "chime = \"command\" needs a non-empty chime_command".to_string(),
            ));
        }
        Ok(())
    }

    /// Get the path to the config file
    pub fn get_config_path(profile: utils::Profile) -> Result<PathBuf, ConfigError> {
        let config_dir = utils::get_config_dir(profile)
            .ok_or_else(|| ConfigError::ConfigDirError("Could not determine config directory".to_string()))?;
        Ok(config_dir.join("config.toml"))
    }

    fn default_database_path_for_profile(profile: utils::Profile) -> String {
        if let Some(data_dir) = utils::get_data_dir(profile) {
            data_dir.join("meditrak.db").to_string_lossy().to_string()
        } else {
            format!("~/.local/share/{}/meditrak.db", profile.app_name())
        }
    }

    /// Get the expanded database path (with ~ expansion)
    pub fn get_database_path(&self) -> PathBuf {
        utils::expand_path(&self.database_path)
    }

    /// Directory for the log file, next to the database
    pub fn get_log_dir(&self) -> PathBuf {
        let db_path = self.get_database_path();
        db_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Get the currently active theme, falling back to the default preset
    pub fn get_active_theme(&self) -> Theme {
        if let Some(theme) = self.themes.get(&self.current_theme) {
            theme.clone()
        } else if let Some(theme) = Theme::get_preset_themes().remove(&self.current_theme) {
            theme
        } else {
            Theme::default()
        }
    }

    /// Get all available theme names (presets + user-defined), sorted
    pub fn get_available_themes(&self) -> Vec<String> {
        let mut themes: Vec<String> = Theme::get_preset_themes().into_keys().collect();
        for theme_name in self.themes.keys() {
            if !themes.contains(theme_name) {
                themes.push(theme_name.clone());
            }
        }
        themes.sort();
        themes
    }
}
