//! Cover images, downloaded once and kept on disk.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use kaiten_core::config::AppConfig;

/// State of a cover image for one anime.
#[derive(Debug, Clone, PartialEq)]
pub enum CoverState {
    Loading,
    Loaded(PathBuf),
    Failed,
}

/// In-memory index of image states keyed by anime id (covers) or
/// [`trailer_key`] (trailer frames).
#[derive(Debug)]
pub struct CoverCache {
    dir: PathBuf,
    states: HashMap<String, CoverState>,
}

impl Default for CoverCache {
    fn default() -> Self {
        Self::new(covers_dir())
    }
}

impl CoverCache {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            states: HashMap::new(),
        }
    }

    pub fn get(&self, anime_id: &str) -> Option<&CoverState> {
        self.states.get(anime_id)
    }

    /// Decide whether a cover must be downloaded.
    ///
    /// Returns the target path when a fetch should start. Entries without
    /// a URL are marked failed so the placeholder renders; entries already
    /// on disk are marked loaded without a request.
    pub fn begin(&mut self, anime_id: &str, url: Option<&str>) -> Option<PathBuf> {
        if self.states.contains_key(anime_id) {
            return None;
        }
        if url.is_none_or(str::is_empty) {
            self.states.insert(anime_id.to_string(), CoverState::Failed);
            return None;
        }
        let path = self.path_for(anime_id);
        if path.exists() {
            self.states
                .insert(anime_id.to_string(), CoverState::Loaded(path));
            return None;
        }
        self.states
            .insert(anime_id.to_string(), CoverState::Loading);
        Some(path)
    }

    pub fn finish(&mut self, anime_id: String, result: Result<PathBuf, String>) {
        let state = match result {
            Ok(path) => CoverState::Loaded(path),
            Err(e) => {
                tracing::warn!(anime_id = %anime_id, error = %e, "Cover download failed");
                CoverState::Failed
            }
        };
        self.states.insert(anime_id, state);
    }

    /// File name derived from the key. Bytes outside `[A-Za-z0-9-]` are
    /// written as `_XX` hex, so keys cannot escape the cache directory and
    /// distinct keys never share a file.
    fn path_for(&self, key: &str) -> PathBuf {
        let mut safe = String::with_capacity(key.len());
        for byte in key.bytes() {
            if byte.is_ascii_alphanumeric() || byte == b'-' {
                safe.push(char::from(byte));
            } else {
                safe.push_str(&format!("_{byte:02X}"));
            }
        }
        self.dir.join(format!("{safe}.jpg"))
    }
}

/// Cache key of the still frame shown while an entry's trailer plays.
pub fn trailer_key(anime_id: &str) -> String {
    format!("trailer:{anime_id}")
}

/// Directory for cached cover images.
pub fn covers_dir() -> PathBuf {
    AppConfig::data_dir().join("covers")
}

/// Download a cover image and save it to `path`.
pub async fn fetch_cover(url: String, path: PathBuf) -> Result<PathBuf, String> {
    if let Some(dir) = path.parent() {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| e.to_string())?;
    }

    let response = reqwest::get(&url).await.map_err(|e| e.to_string())?;
    let status = response.status();
    if !status.is_success() {
        return Err(format!("HTTP {status} for {url}"));
    }
    let bytes = response.bytes().await.map_err(|e| e.to_string())?;

    write_atomic(&path, &bytes).await?;
    Ok(path)
}

/// Write via a temporary sibling so a half-written file is never picked
/// up as a cached cover.
async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), String> {
    let tmp = path.with_extension("part");
    tokio::fs::write(&tmp, bytes)
        .await
        .map_err(|e| e.to_string())?;
    tokio::fs::rename(&tmp, path)
        .await
        .map_err(|e| e.to_string())
}
