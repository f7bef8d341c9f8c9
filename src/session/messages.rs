/// Inputs from the host shell: user commands, timer ticks, audio-engine
/// notifications, and refill completions from the backing stores.
#[derive(Debug, Clone)]
pub enum Message {
    /// Rendered section text arrived; segment it and hand back tagged words.
    SectionLoaded {
        section_id: String,
        text: String,
    },
    Play,
    Pause,
    TogglePlayPause,
    SetRate(f32),
    /// One mapper tick of virtual time (20 ms of audio at rate 1.0).
    Tick,
    /// Authoritative elapsed time from the audio engine, for drift correction.
    SyncElapsed {
        seconds: f64,
    },
    SeekToWord {
        word_index: usize,
    },
    /// The reader tapped a tagged word; `id` is a `word-<n>` identifier.
    WordTapped {
        id: String,
    },
    SkipForward,
    SkipBackward,
    SyncPageLoaded {
        generation: u64,
        min_word_index: usize,
        timesteps: Vec<u64>,
    },
    SyncPageFailed {
        generation: u64,
    },
    TextChunkLoaded {
        generation: u64,
        text: String,
    },
    TextChunkFailed {
        generation: u64,
    },
    /// Persisted position read at session start, if any.
    PositionRestored {
        word_index: Option<usize>,
    },
    CloseSession,
}
