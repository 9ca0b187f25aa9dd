use std::path::PathBuf;

use clap::Parser;

use kaiten_core::config::{AppConfig, ThemeMode};

/// Command-line overrides layered on top of the config file.
#[derive(Parser, Debug, Default)]
#[command(name = "kaiten")]
#[command(about = "Browse trending and popular anime with hover trailers")]
#[command(version)]
pub struct Cli {
    /// Config file to use instead of the per-user one
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Discovery backend base URL
    #[arg(long)]
    pub api_url: Option<String>,

    /// Site base URL for detail pages
    #[arg(long)]
    pub site_url: Option<String>,

    /// Hover delay before the trailer sequence starts, in milliseconds
    #[arg(long)]
    pub hover_delay_ms: Option<u64>,

    /// Appearance: dark, light or system
    #[arg(long, value_parser = parse_mode)]
    pub mode: Option<ThemeMode>,

    /// Log level or filter directives (overrides RUST_LOG)
    #[arg(long, short = 'l')]
    pub log_level: Option<String>,
}

impl Cli {
    /// Load the config file named on the command line (or the default one)
    /// and apply the remaining flags on top.
    pub fn load_config(&self) -> AppConfig {
        let loaded = match &self.config {
            Some(path) => AppConfig::load_from(path),
            None => AppConfig::load(),
        };
        let mut config = loaded.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Invalid config, using defaults");
            AppConfig::default()
        });
        self.apply(&mut config);
        config
    }

    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(url) = &self.api_url {
            config.api.base_url = url.clone();
        }
        if let Some(url) = &self.site_url {
            config.site.base_url = url.clone();
        }
        if let Some(ms) = self.hover_delay_ms {
            config.hover.delay_ms = ms;
        }
        if let Some(mode) = self.mode {
            config.appearance.mode = mode;
        }
    }
}

fn parse_mode(s: &str) -> Result<ThemeMode, String> {
    match s.to_ascii_lowercase().as_str() {
        "dark" => Ok(ThemeMode::Dark),
        "light" => Ok(ThemeMode::Light),
        "system" => Ok(ThemeMode::System),
        other => Err(format!("unknown mode '{other}' (expected dark, light or system)")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from([
            "kaiten",
            "--api-url",
            "http://backend:8080",
            "--hover-delay-ms",
            "500",
            "--mode",
            "Light",
        ])
        .unwrap();

        let mut config = AppConfig::default();
        cli.apply(&mut config);
        assert_eq!(config.api.base_url, "http://backend:8080");
        assert_eq!(config.hover.delay_ms, 500);
        assert_eq!(config.appearance.mode, ThemeMode::Light);
        assert_eq!(config.site.base_url, AppConfig::default().site.base_url);
    }

    #[test]
    fn test_no_flags_leave_defaults() {
        let cli = Cli::try_parse_from(["kaiten"]).unwrap();
        let mut config = AppConfig::default();
        cli.apply(&mut config);
        assert_eq!(config.hover.delay_ms, 3000);
        assert_eq!(config.api.per_page, 30);
    }

    #[test]
    fn test_bad_mode_rejected() {
        assert!(Cli::try_parse_from(["kaiten", "--mode", "sepia"]).is_err());
    }

    #[test]
    fn test_config_file_flag() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kaiten.toml");
        std::fs::write(&path, "[hover]\ndelay_ms = 1200\n").unwrap();

        let cli = Cli::try_parse_from(["kaiten", "-c", path.to_str().unwrap()]).unwrap();
        let config = cli.load_config();
        assert_eq!(config.hover.delay_ms, 1200);
        assert_eq!(config.trailer.quality, "1080p");
    }
}
