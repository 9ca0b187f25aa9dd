use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::KaitenError;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub site: SiteConfig,
    pub trailer: TrailerConfig,
    pub hover: HoverConfig,
    pub cache: CacheConfig,
    pub appearance: AppearanceConfig,
}

/// Discovery backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub per_page: u32,
    pub timeout_secs: u64,
}

/// Site hosting the `/info/{id}` detail pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub base_url: String,
}

/// Stream-info service, the variant picked for trailers, and the player
/// that runs them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrailerConfig {
    pub streams_base_url: String,
    pub quality: String,
    pub format: String,
    /// Player command; the stream URL is appended as the last argument.
    /// Empty hands the URL to the system handler.
    #[serde(default)]
    pub player: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoverConfig {
    pub delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    pub detail_capacity: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppearanceConfig {
    pub mode: ThemeMode,
    pub theme: String,
}

/// Light/dark preference; `System` follows the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Dark,
    Light,
    #[default]
    System,
}

impl AppConfig {
    /// Load config: user file (if exists) merged over built-in defaults.
    pub fn load() -> Result<Self, KaitenError> {
        Self::load_from(&Self::config_path())
    }

    /// Load from an explicit path, falling back to defaults when it is absent.
    pub fn load_from(path: &Path) -> Result<Self, KaitenError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let user_str = std::fs::read_to_string(path)?;
        Self::from_toml_str(&user_str)
    }

    /// Parse a (possibly partial) TOML document over the built-in defaults.
    pub fn from_toml_str(user_str: &str) -> Result<Self, KaitenError> {
        let mut merged: toml::Value =
            toml::from_str(DEFAULT_CONFIG).map_err(|e| KaitenError::Config(e.to_string()))?;
        let user: toml::Value =
            toml::from_str(user_str).map_err(|e| KaitenError::Config(e.to_string()))?;
        merge(&mut merged, user);
        AppConfig::deserialize(merged).map_err(|e| KaitenError::Config(e.to_string()))
    }

    /// Save current config to the user config file.
    pub fn save(&self) -> Result<(), KaitenError> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), KaitenError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| KaitenError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Path to user config file (XDG on Linux, AppData on Windows).
    pub fn config_path() -> PathBuf {
        project_dirs()
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Directory for logs, cached covers and window state.
    pub fn data_dir() -> PathBuf {
        project_dirs()
            .map(|d| d.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn hover_delay(&self) -> Duration {
        Duration::from_millis(self.hover.delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs.max(1))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("built-in default config is valid TOML")
    }
}

pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "kaiten")
}

/// Recursively overlay `overlay` tables onto `base`.
fn merge(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base), toml::Value::Table(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = AppConfig::default();
        assert_eq!(config.api.per_page, 30);
        assert_eq!(config.hover.delay_ms, 3000);
        assert_eq!(config.trailer.quality, "1080p");
        assert_eq!(config.trailer.format, "WEBM");
        assert_eq!(config.appearance.mode, ThemeMode::System);
        assert_eq!(config.hover_delay(), Duration::from_secs(3));
    }

    #[test]
    fn test_roundtrip() {
        let config = AppConfig::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized.api.base_url, config.api.base_url);
        assert_eq!(deserialized.cache.detail_capacity, config.cache.detail_capacity);
    }

    #[test]
    fn test_partial_user_file_keeps_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [api]
            base_url = "https://anime.example"

            [hover]
            delay_ms = 1500
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://anime.example");
        assert_eq!(config.api.per_page, 30);
        assert_eq!(config.hover.delay_ms, 1500);
        assert_eq!(config.trailer.quality, "1080p");
    }

    #[test]
    fn test_player_command() {
        let config = AppConfig::default();
        assert_eq!(config.trailer.player.first().map(String::as_str), Some("mpv"));
        assert!(config.trailer.player.iter().any(|arg| arg == "--mute=yes"));

        let system = AppConfig::from_toml_str("[trailer]\nplayer = []").unwrap();
        assert!(system.trailer.player.is_empty());
        assert_eq!(system.trailer.format, "WEBM");
    }

    #[test]
    fn test_invalid_user_file() {
        let err = AppConfig::from_toml_str("[hover]\ndelay_ms = \"soon\"").unwrap_err();
        assert!(matches!(err, KaitenError::Config(_)));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.appearance.mode = ThemeMode::Dark;
        config.cache.detail_capacity = 4;
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.appearance.mode, ThemeMode::Dark);
        assert_eq!(loaded.cache.detail_capacity, 4);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = AppConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded.api.per_page, 30);
    }
}
