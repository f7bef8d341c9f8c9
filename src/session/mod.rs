//! Read-along session: the synchronization core behind a host shell.
//!
//! The host owns the timer, the renderer, the audio engine and the backing
//! stores. It feeds [`Message`]s into [`ReadAlongSession::reduce`] and
//! performs the returned [`Effect`]s; refill completions come back as
//! messages carrying the generation stamped on the request, so completions
//! that straddle a seek are detected and dropped.

mod messages;
mod state;
#[cfg(test)]
mod tests;
mod update;

pub use messages::Message;
pub use state::PlaybackLifecycle;
pub use update::{Effect, TaggedWord};

use crate::cancellation::CancellationToken;
use crate::config::SessionConfig;
use crate::segment::DocumentSegmenter;
use crate::sync_cache::SyncPathCache;
use crate::text_window::TextWindowCache;
use state::PlayheadState;
use tracing::info;

/// One reading session over one book. All state mutation happens inside
/// [`reduce`](Self::reduce) on the host's driver timeline.
pub struct ReadAlongSession {
    pub(in crate::session) book_id: String,
    pub(in crate::session) config: SessionConfig,
    pub(in crate::session) document: DocumentSegmenter,
    pub(in crate::session) sync: SyncPathCache,
    pub(in crate::session) text: TextWindowCache,
    pub(in crate::session) playhead: PlayheadState,
    /// Start of the sentence last reported via `Effect::SentenceBoundaries`.
    pub(in crate::session) last_sentence_start: Option<usize>,
    pub(in crate::session) io_token: CancellationToken,
    pub(in crate::session) closed: bool,
}

impl ReadAlongSession {
    pub fn new(book_id: impl Into<String>, config: SessionConfig) -> Self {
        let book_id = book_id.into();
        info!(book_id = %book_id, rate = config.playback_rate, "Opened read-along session");
        Self {
            document: DocumentSegmenter::new(),
            sync: SyncPathCache::new(config.sync_cache_size, config.sync_reload_threshold, 0),
            text: TextWindowCache::new(config.text_cache_chars, config.text_reload_chars),
            playhead: PlayheadState::new(config.playback_rate),
            last_sentence_start: None,
            io_token: CancellationToken::new(),
            closed: false,
            config,
            book_id,
        }
    }

    /// Token handed to host I/O tasks; cancelled when the session closes.
    pub fn io_token(&self) -> CancellationToken {
        self.io_token.clone()
    }

    pub fn book_id(&self) -> &str {
        &self.book_id
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn current_word(&self) -> Option<usize> {
        self.playhead.current_word
    }

    pub fn is_playing(&self) -> bool {
        self.playhead.is_playing()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}
