use crate::text_window::WordSpan;

mod navigation;
mod playback;
mod reducer;
mod refill;

/// Work the host must perform outside the reducer: I/O requests against the
/// backing stores, audio-engine commands, and render events.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Query the sync-path store: `query(book, limit, offset)`.
    FetchSyncPage {
        generation: u64,
        offset: usize,
        limit: usize,
    },
    /// Extract rendered text: `extract(char_offset, length)`.
    ExtractText {
        generation: u64,
        char_offset: usize,
        length: usize,
    },
    HighlightWord {
        word_index: usize,
        span: WordSpan,
    },
    /// Emitted after each highlight when the session has the zoom capability;
    /// the host resolves the word's bounding box and calls `viewport::fit`.
    ZoomToWord {
        word_index: usize,
    },
    SentenceBoundaries {
        prev: Option<usize>,
        curr: usize,
        next: usize,
    },
    /// Hand the renderer the section's segmented runs to wrap with ids.
    TagWords {
        section_id: String,
        words: Vec<TaggedWord>,
    },
    /// Fire-and-forget write of the last played word.
    PersistPosition {
        word_index: usize,
    },
    PlayAudio,
    PauseAudio,
    SeekAudio {
        seconds: f64,
    },
    SetAudioRate {
        rate: f32,
    },
    SaveConfig,
}

/// A segmented run the renderer wraps with its identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedWord {
    pub id: String,
    pub text: String,
    pub is_gap: bool,
}
