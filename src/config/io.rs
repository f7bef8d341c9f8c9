use super::defaults;
use super::models::{
    MAX_PLAYBACK_RATE, MAX_ZOOM_CEILING, MIN_PLAYBACK_RATE, MIN_ZOOM_FLOOR, SessionConfig,
};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{info, warn};

/// Load config from `path`, falling back to defaults on any failure.
pub fn load_config(path: &Path) -> SessionConfig {
    match std::fs::read_to_string(path) {
        Ok(data) => match parse_config(&data) {
            Ok(config) => {
                info!(path = %path.display(), "Loaded session config");
                config
            }
            Err(err) => {
                warn!(path = %path.display(), "Ignoring malformed config: {err}");
                SessionConfig::default()
            }
        },
        Err(_) => SessionConfig::default(),
    }
}

pub fn parse_config(data: &str) -> Result<SessionConfig> {
    let mut config: SessionConfig = toml::from_str(data).context("invalid session config")?;
    clamp_config(&mut config);
    Ok(config)
}

pub fn serialize_config(config: &SessionConfig) -> Result<String> {
    toml::to_string(config).context("failed to serialize session config")
}

/// Normalize out-of-range values instead of rejecting the file.
pub(crate) fn clamp_config(config: &mut SessionConfig) {
    config.sync_cache_size = config.sync_cache_size.clamp(8, 4096);
    config.sync_reload_threshold = config
        .sync_reload_threshold
        .clamp(1, config.sync_cache_size / 2);
    config.text_cache_chars = config.text_cache_chars.clamp(256, 1 << 20);
    config.text_reload_chars = config
        .text_reload_chars
        .clamp(1, config.text_cache_chars / 2);
    config.playback_rate = if config.playback_rate.is_finite() {
        config.playback_rate.clamp(MIN_PLAYBACK_RATE, MAX_PLAYBACK_RATE)
    } else {
        defaults::default_playback_rate()
    };
    config.min_zoom = if config.min_zoom.is_finite() && config.min_zoom > 0.0 {
        config.min_zoom.clamp(MIN_ZOOM_FLOOR, MAX_ZOOM_CEILING)
    } else {
        defaults::default_min_zoom()
    };
    config.max_zoom = if config.max_zoom.is_finite() && config.max_zoom > 0.0 {
        config.max_zoom.clamp(config.min_zoom, MAX_ZOOM_CEILING)
    } else {
        defaults::default_max_zoom().max(config.min_zoom)
    };
    if config.cache_dir.trim().is_empty() {
        config.cache_dir = defaults::default_cache_dir();
    }
}
