use serde::{Deserialize, Serialize};

/// Slowest playback rate a host may request.
pub const MIN_PLAYBACK_RATE: f32 = 0.1;
/// Fastest playback rate a host may request.
pub const MAX_PLAYBACK_RATE: f32 = 3.0;

pub(crate) const MIN_ZOOM_FLOOR: f32 = 0.1;
pub(crate) const MAX_ZOOM_CEILING: f32 = 8.0;

/// Session configuration; deserializable from TOML.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Entries held by the word→timestep window.
    #[serde(default = "crate::config::defaults::default_sync_cache_size")]
    pub sync_cache_size: usize,
    /// Remaining entries at which the sync window refills.
    #[serde(default = "crate::config::defaults::default_sync_reload_threshold")]
    pub sync_reload_threshold: usize,
    /// Characters held by the text window.
    #[serde(default = "crate::config::defaults::default_text_cache_chars")]
    pub text_cache_chars: usize,
    /// Remaining characters at which the text window refills.
    #[serde(default = "crate::config::defaults::default_text_reload_chars")]
    pub text_reload_chars: usize,
    #[serde(default = "crate::config::defaults::default_playback_rate")]
    pub playback_rate: f32,
    /// When set, every word transition also emits a zoom-to-word effect.
    #[serde(default)]
    pub zoom_enabled: bool,
    #[serde(default = "crate::config::defaults::default_min_zoom")]
    pub min_zoom: f32,
    #[serde(default = "crate::config::defaults::default_max_zoom")]
    pub max_zoom: f32,
    #[serde(default = "crate::config::defaults::default_log_level")]
    pub log_level: LogLevel,
    #[serde(default = "crate::config::defaults::default_cache_dir")]
    pub cache_dir: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            sync_cache_size: crate::config::defaults::default_sync_cache_size(),
            sync_reload_threshold: crate::config::defaults::default_sync_reload_threshold(),
            text_cache_chars: crate::config::defaults::default_text_cache_chars(),
            text_reload_chars: crate::config::defaults::default_text_reload_chars(),
            playback_rate: crate::config::defaults::default_playback_rate(),
            zoom_enabled: false,
            min_zoom: crate::config::defaults::default_min_zoom(),
            max_zoom: crate::config::defaults::default_max_zoom(),
            log_level: crate::config::defaults::default_log_level(),
            cache_dir: crate::config::defaults::default_cache_dir(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_filter_str())
    }
}
