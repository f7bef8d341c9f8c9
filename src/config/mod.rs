//! Session configuration.
//!
//! All tunables are centralized here and loaded from TOML if present. Any
//! missing or invalid entries fall back to defaults so a host can always
//! start a session.

mod defaults;
mod io;
mod models;

pub use io::{load_config, parse_config, serialize_config};
pub use models::{LogLevel, MAX_PLAYBACK_RATE, MIN_PLAYBACK_RATE, SessionConfig};
