//! Word-level read-along synchronization.
//!
//! Given an audio narration and a precomputed word-index → timestep table,
//! this crate tracks the word currently being spoken as audio plays and
//! drives highlighting, viewport zoom and sentence-skip navigation. The host
//! shell owns the timer, the text renderer, the audio engine and the backing
//! stores; it feeds [`Message`]s into [`ReadAlongSession::reduce`] and
//! performs the returned [`Effect`]s, reporting I/O completions back as
//! further messages.

pub mod bookmark;
pub mod cancellation;
pub mod config;
pub mod logging;
pub mod navigator;
pub mod segment;
pub mod session;
pub mod sync_cache;
pub mod text_window;
pub mod viewport;

pub use session::{Effect, Message, ReadAlongSession};
