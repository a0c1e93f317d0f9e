use crate::dialog::{MergePolicy, DEFAULT_TITLE};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Maximum notes the demo list keeps (prevents unbounded memory growth)
pub const MAX_NOTES: usize = 200;

/// Application configuration loaded from file
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Dialog service configuration
    #[serde(default)]
    pub dialog: DialogSettings,
}

/// Dialog-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogSettings {
    /// What omitted fields fall back to when a dialog opens
    #[serde(default)]
    pub merge_policy: MergePolicy,

    /// Title shown when a producer does not supply one
    #[serde(default = "default_title")]
    pub default_title: String,

    /// Dialog card width as a percentage of the screen
    #[serde(default = "default_width_percent")]
    pub width_percent: u16,

    /// Minimum dialog card height as a percentage of the screen
    #[serde(default = "default_height_percent")]
    pub height_percent: u16,
}

impl Default for DialogSettings {
    fn default() -> Self {
        Self {
            merge_policy: MergePolicy::default(),
            default_title: default_title(),
            width_percent: default_width_percent(),
            height_percent: default_height_percent(),
        }
    }
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_width_percent() -> u16 {
    60
}

fn default_height_percent() -> u16 {
    30
}

impl DialogSettings {
    /// Card size clamped to something drawable
    pub fn card_percent(&self) -> (u16, u16) {
        (
            self.width_percent.clamp(20, 100),
            self.height_percent.clamp(10, 100),
        )
    }
}

impl AppConfig {
    /// Get the default configuration path
    pub fn default_path() -> PathBuf {
        directories::BaseDirs::new().map_or_else(
            || PathBuf::from("~/.config/modal-relay/config.toml"),
            |dirs| dirs.config_dir().join("modal-relay").join("config.toml"),
        )
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!("Config file not found at {:?}, using defaults", path);
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded configuration from {:?}", path);
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config file: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config file: {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Write configuration to `path`, creating parent directories
    pub fn save_to_path(&self, path: &Path) -> crate::errors::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        tracing::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Generate example configuration file content
    pub fn example() -> String {
        r#"# modal-relay configuration
# Place this file at ~/.config/modal-relay/config.toml

[dialog]
# What fields omitted by a producer fall back to when a dialog opens:
#   "reset" - the inert default dialog (no inputs, no confirm action)
#   "merge" - whatever the previous dialog left behind
merge_policy = "reset"

# Title used when a producer does not set one
default_title = "Dialog"

# Dialog card size, as a percentage of the terminal
width_percent = 60
height_percent = 30
"#
        .to_string()
    }
}

/// Tokyo Night color palette
pub mod colors {
    use super::Color;

    pub const BG: Color = Color::Rgb(26, 27, 38); // #1a1b26
    pub const BG_LIGHT: Color = Color::Rgb(41, 46, 66); // #292e42 lighter bg
    pub const FG: Color = Color::Rgb(192, 202, 245); // #c0caf5
    pub const DIM: Color = Color::Rgb(86, 95, 137); // #565f89 gray
    pub const CONFIRM: Color = Color::Rgb(122, 162, 247); // #7aa2f7 blue
    pub const DANGER: Color = Color::Rgb(255, 158, 100); // #ff9e64 orange
    pub const BORDER: Color = Color::Rgb(59, 66, 97); // #3b4261
    pub const HIGHLIGHT: Color = Color::Rgb(187, 154, 247); // #bb9af7 purple
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from_path(&dir.path().join("absent.toml"));
        assert_eq!(config.dialog.merge_policy, MergePolicy::Reset);
        assert_eq!(config.dialog.default_title, DEFAULT_TITLE);
    }

    #[test]
    fn test_example_config_parses() {
        let config: AppConfig = toml::from_str(&AppConfig::example()).unwrap();
        assert_eq!(config.dialog.merge_policy, MergePolicy::Reset);
        assert_eq!(config.dialog.width_percent, 60);
        assert_eq!(config.dialog.height_percent, 30);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[dialog]\nmerge_policy = \"merge\"\n").unwrap();

        let config = AppConfig::load_from_path(&path);
        assert_eq!(config.dialog.merge_policy, MergePolicy::Merge);
        assert_eq!(config.dialog.default_title, DEFAULT_TITLE);
        assert_eq!(config.dialog.width_percent, 60);
    }

    #[test]
    fn test_invalid_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "this is = = not toml").unwrap();

        let config = AppConfig::load_from_path(&path);
        assert_eq!(config.dialog.merge_policy, MergePolicy::Reset);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = AppConfig::default();
        config.dialog.default_title = "Notice".to_string();
        config.save_to_path(&path).unwrap();

        let loaded = AppConfig::load_from_path(&path);
        assert_eq!(loaded.dialog.default_title, "Notice");
    }

    #[test]
    fn test_card_percent_is_clamped() {
        let settings = DialogSettings {
            width_percent: 500,
            height_percent: 0,
            ..DialogSettings::default()
        };
        assert_eq!(settings.card_percent(), (100, 10));
    }
}
