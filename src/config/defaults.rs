use crate::config::LogLevel;

pub(crate) fn default_sync_cache_size() -> usize {
    128
}

pub(crate) fn default_sync_reload_threshold() -> usize {
    16
}

pub(crate) fn default_text_cache_chars() -> usize {
    4096
}

pub(crate) fn default_text_reload_chars() -> usize {
    512
}

pub(crate) fn default_playback_rate() -> f32 {
    1.0
}

pub(crate) fn default_min_zoom() -> f32 {
    1.0
}

pub(crate) fn default_max_zoom() -> f32 {
    3.0
}

pub(crate) fn default_log_level() -> LogLevel {
    LogLevel::Info
}

pub(crate) fn default_cache_dir() -> String {
    ".cache".to_string()
}
