//! Theme loading: one TOML file carries both dark and light variants.
//! The embedded default can be replaced by user themes from
//! `~/.config/kaiten/themes/`.

mod catalog;
mod colors;

pub use catalog::*;
pub use colors::*;

use iced::Theme;

/// Embedded default theme TOML source.
pub(crate) const DEFAULT_THEME_TOML: &str = include_str!("../assets/themes/default.toml");

/// A fully loaded theme with both appearance variants.
#[derive(Debug, Clone)]
pub struct KaitenTheme {
    pub name: String,
    pub dark: ColorScheme,
    pub light: ColorScheme,
}

impl KaitenTheme {
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        let file: ThemeFile =
            toml::from_str(toml_str).map_err(|e| format!("theme parse error: {e}"))?;
        Ok(Self {
            name: file.meta.name.clone(),
            dark: ColorScheme::from_variant(&file.dark),
            light: ColorScheme::from_variant(&file.light),
        })
    }

    /// Load the embedded default theme.
    pub fn default_theme() -> Self {
        Self::from_toml(DEFAULT_THEME_TOML).expect("embedded default theme is valid TOML")
    }

    /// Color scheme for a resolved mode. `System` falls back to dark.
    pub fn colors(&self, mode: ThemeMode) -> &ColorScheme {
        match mode {
            ThemeMode::Light => &self.light,
            _ => &self.dark,
        }
    }

    pub fn iced_theme(&self, mode: ThemeMode) -> Theme {
        build_theme(&self.name, self.colors(mode))
    }
}

/// Resolve `ThemeMode::System` to a concrete Dark or Light.
pub fn resolve_mode(mode: ThemeMode) -> ThemeMode {
    match mode {
        ThemeMode::System => match dark_light::detect() {
            Ok(dark_light::Mode::Light) => ThemeMode::Light,
            _ => ThemeMode::Dark,
        },
        other => other,
    }
}

/// Embedded default plus every parseable theme in the user themes directory.
pub fn available_themes() -> Vec<KaitenTheme> {
    let mut themes = vec![KaitenTheme::default_theme()];

    let Some(dir) = user_themes_dir() else {
        return themes;
    };
    let Ok(entries) = std::fs::read_dir(&dir) else {
        return themes;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().is_none_or(|e| e != "toml") {
            continue;
        }
        match std::fs::read_to_string(&path) {
            Ok(content) => match KaitenTheme::from_toml(&content) {
                Ok(theme) => themes.push(theme),
                Err(e) => tracing::warn!("Skipping theme {}: {e}", path.display()),
            },
            Err(e) => tracing::warn!("Cannot read {}: {e}", path.display()),
        }
    }

    themes
}

pub fn find_theme(name: &str) -> Option<KaitenTheme> {
    available_themes().into_iter().find(|t| t.name == name)
}

fn user_themes_dir() -> Option<std::path::PathBuf> {
    kaiten_core::config::project_dirs().map(|dirs| dirs.config_dir().join("themes"))
}

pub fn build_theme(name: &str, cs: &ColorScheme) -> Theme {
    use iced::theme::Palette;

    Theme::custom(
        name.to_string(),
        Palette {
            background: cs.surface,
            text: cs.on_surface,
            primary: cs.primary,
            success: cs.primary_container,
            warning: cs.outline,
            danger: cs.danger,
        },
    )
}
