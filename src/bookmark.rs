//! Best-effort disk persistence for per-book reading state.
//!
//! Each book gets a directory under the cache dir named by a hash of its id,
//! holding tiny TOML files: the last played word and optional per-book config
//! overrides. Writes never fail the session; errors are logged and dropped.

use crate::config::SessionConfig;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(serde::Serialize, serde::Deserialize)]
struct PositionEntry {
    word_index: usize,
}

/// Last played word for a book, if one was persisted.
pub fn load_last_word(cache_dir: &Path, book_id: &str) -> Option<usize> {
    let data = fs::read_to_string(position_path(cache_dir, book_id)).ok()?;
    let entry: PositionEntry = toml::from_str(&data).ok()?;
    Some(entry.word_index)
}

/// Persist the last played word. Best-effort; failures are logged only.
pub fn save_last_word(cache_dir: &Path, book_id: &str, word_index: usize) {
    let path = position_path(cache_dir, book_id);
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    match toml::to_string(&PositionEntry { word_index }) {
        Ok(contents) => {
            if let Err(err) = fs::write(&path, contents) {
                warn!(book_id, word_index, "Failed to persist position: {err}");
            }
        }
        Err(err) => warn!(book_id, "Failed to encode position entry: {err}"),
    }
}

pub fn load_book_config(cache_dir: &Path, book_id: &str) -> Option<SessionConfig> {
    let path = book_dir(cache_dir, book_id).join("config.toml");
    let data = fs::read_to_string(path).ok()?;
    crate::config::parse_config(&data).ok()
}

pub fn save_book_config(cache_dir: &Path, book_id: &str, config: &SessionConfig) {
    let path = book_dir(cache_dir, book_id).join("config.toml");
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    match crate::config::serialize_config(config) {
        Ok(contents) => {
            if let Err(err) = fs::write(&path, contents) {
                warn!(book_id, "Failed to persist book config: {err}");
            }
        }
        Err(err) => warn!(book_id, "Failed to encode book config: {err}"),
    }
}

/// Per-book directory, named by a hash of the id to avoid filesystem issues.
pub fn book_dir(cache_dir: &Path, book_id: &str) -> PathBuf {
    let mut hasher = Sha256::new();
    hasher.update(book_id.as_bytes());
    let hash = format!("{:x}", hasher.finalize());
    cache_dir.join(hash)
}

fn position_path(cache_dir: &Path, book_id: &str) -> PathBuf {
    book_dir(cache_dir, book_id).join("position.toml")
}
