//! Persist and restore window size and position across sessions.
//!
//! Stored as `window.json` in the data directory.

use std::path::{Path, PathBuf};

use iced::{Point, Size};
use serde::{Deserialize, Serialize};

use kaiten_core::config::AppConfig;

const FILE_NAME: &str = "window.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowState {
    pub width: f32,
    pub height: f32,
    pub x: f32,
    pub y: f32,
}

impl Default for WindowState {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 860.0,
            x: -1.0,
            y: -1.0,
        }
    }
}

impl WindowState {
    pub fn size(&self) -> Size {
        Size::new(self.width.max(400.0), self.height.max(300.0))
    }

    /// Saved position, if one was ever recorded.
    pub fn position(&self) -> Option<Point> {
        if self.x >= 0.0 && self.y >= 0.0 {
            Some(Point::new(self.x, self.y))
        } else {
            None
        }
    }

    /// Load from disk, returning default if the file is missing or invalid.
    pub fn load() -> Self {
        Self::load_from(&state_path())
    }

    fn load_from(path: &Path) -> Self {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default()
    }

    /// Save to disk. Errors are logged but not propagated.
    pub fn save(&self) {
        self.save_to(&state_path());
    }

    fn save_to(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(path, json) {
                    tracing::warn!("Failed to save window state: {e}");
                }
            }
            Err(e) => tracing::warn!("Failed to serialize window state: {e}"),
        }
    }
}

fn state_path() -> PathBuf {
    AppConfig::data_dir().join(FILE_NAME)
}
