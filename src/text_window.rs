//! Sliding window over extracted document text, with derived word spans.
//!
//! Same refill shape as the sync cache, but the backing source is a live
//! character extraction of the rendered document rather than a table. While
//! appending characters the cache classifies them with the segmenter's word
//! predicate and records a span per run: gap→word transitions open a span,
//! word→gap transitions close the previous one. A run that crosses a refill
//! boundary is extended, not restarted; a run that has not closed yet is not
//! resolvable.

use crate::segment::is_word_char;
use std::collections::{BTreeMap, VecDeque};
use tracing::{debug, warn};

/// Char span of a run within the document, end exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordSpan {
    pub start: usize,
    pub end: usize,
}

/// Outcome of resolving an element index against the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanLookup {
    /// Not in the window, or still open; refill before reading.
    Unavailable,
    /// A separator run; never highlighted.
    Gap(WordSpan),
    Word(WordSpan),
}

/// An extraction request the host must satisfy against the rendered text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextFetch {
    pub generation: u64,
    pub char_offset: usize,
    pub length: usize,
}

#[derive(Debug, Clone, Copy)]
struct PendingExtract {
    generation: u64,
    retained: usize,
    length: usize,
}

#[derive(Debug, Clone, Copy)]
struct ClosedRun {
    start: usize,
    end: usize,
    is_word: bool,
}

#[derive(Debug, Clone, Copy)]
struct OpenRun {
    index: usize,
    is_word: bool,
    start: usize,
}

#[derive(Debug)]
pub struct TextWindowCache {
    /// Absolute char offset of the first buffered character.
    first_char_index: usize,
    buffer: VecDeque<char>,
    /// Next absolute char offset to extract.
    next_char_offset: usize,
    runs: BTreeMap<usize, ClosedRun>,
    open_run: Option<OpenRun>,
    /// Index assigned to the next new run.
    next_element_index: usize,
    cache_chars: usize,
    reload_chars: usize,
    generation: u64,
    in_flight: Option<PendingExtract>,
    exhausted: bool,
}

impl TextWindowCache {
    pub fn new(cache_chars: usize, reload_chars: usize) -> Self {
        let cache_chars = cache_chars.max(16);
        Self {
            first_char_index: 0,
            buffer: VecDeque::with_capacity(cache_chars),
            next_char_offset: 0,
            runs: BTreeMap::new(),
            open_run: None,
            next_element_index: 0,
            cache_chars,
            reload_chars: reload_chars.clamp(1, cache_chars / 2),
            generation: 0,
            in_flight: None,
            exhausted: false,
        }
    }

    pub fn lookup(&self, index: usize) -> SpanLookup {
        let Some(run) = self.runs.get(&index) else {
            return SpanLookup::Unavailable;
        };
        let window_end = self.first_char_index + self.buffer.len();
        if run.start < self.first_char_index || run.end > window_end {
            return SpanLookup::Unavailable;
        }
        let span = WordSpan {
            start: run.start,
            end: run.end,
        };
        if run.is_word {
            SpanLookup::Word(span)
        } else {
            SpanLookup::Gap(span)
        }
    }

    /// Span of `index`, when it is a fully-buffered word run.
    pub fn span_of(&self, index: usize) -> Option<WordSpan> {
        match self.lookup(index) {
            SpanLookup::Word(span) => Some(span),
            _ => None,
        }
    }

    /// Chars left in the window past the end of `span`.
    pub fn chars_after(&self, span: WordSpan) -> usize {
        (self.first_char_index + self.buffer.len()).saturating_sub(span.end)
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn reload_chars(&self) -> usize {
        self.reload_chars
    }

    /// Start an extraction unless one is outstanding or the document ended.
    pub fn begin_refill(&mut self) -> Option<TextFetch> {
        if self.in_flight.is_some() || self.exhausted {
            return None;
        }
        let retained = if self.buffer.is_empty() {
            0
        } else {
            self.reload_chars.min(self.buffer.len())
        };
        let length = self.cache_chars - retained;
        let fetch = TextFetch {
            generation: self.generation,
            char_offset: self.next_char_offset,
            length,
        };
        self.in_flight = Some(PendingExtract {
            generation: self.generation,
            retained,
            length,
        });
        debug!(
            char_offset = fetch.char_offset,
            length, retained, "Requesting text chunk"
        );
        Some(fetch)
    }

    /// Apply an extracted chunk: shift the retained suffix to the head, scan
    /// and append the new characters, and close the final run if the
    /// document ended. Returns false when the completion is stale.
    pub fn complete_refill(&mut self, generation: u64, text: &str) -> bool {
        let Some(pending) = self.in_flight else {
            debug!(generation, "Dropping text chunk with no refill outstanding");
            return false;
        };
        if pending.generation != generation || generation != self.generation {
            debug!(generation, current = self.generation, "Ignoring stale text chunk");
            return false;
        }
        self.in_flight = None;

        let drop_count = self.buffer.len().saturating_sub(pending.retained);
        for _ in 0..drop_count {
            self.buffer.pop_front();
        }
        self.first_char_index += drop_count;
        let floor = self.first_char_index;
        self.runs.retain(|_, run| run.start >= floor);

        let mut appended = 0usize;
        for ch in text.chars() {
            if appended == pending.length {
                warn!("Text source returned more than requested; truncating");
                break;
            }
            self.scan_char(ch);
            self.buffer.push_back(ch);
            self.next_char_offset += 1;
            appended += 1;
        }
        self.exhausted = appended < pending.length;
        if self.exhausted {
            // The document ended, so the final run has nothing left to close it.
            if let Some(run) = self.open_run.take() {
                self.runs.insert(
                    run.index,
                    ClosedRun {
                        start: run.start,
                        end: self.next_char_offset,
                        is_word: run.is_word,
                    },
                );
            }
        }
        debug!(
            first_char = self.first_char_index,
            len = self.buffer.len(),
            appended,
            exhausted = self.exhausted,
            "Applied text chunk"
        );
        true
    }

    fn scan_char(&mut self, ch: char) {
        let in_word = is_word_char(ch);
        let position = self.next_char_offset;
        match self.open_run {
            Some(run) if run.is_word == in_word => {}
            Some(run) => {
                self.runs.insert(
                    run.index,
                    ClosedRun {
                        start: run.start,
                        end: position,
                        is_word: run.is_word,
                    },
                );
                self.open_run = Some(OpenRun {
                    index: self.next_element_index,
                    is_word: in_word,
                    start: position,
                });
                self.next_element_index += 1;
            }
            None => {
                self.open_run = Some(OpenRun {
                    index: self.next_element_index,
                    is_word: in_word,
                    start: position,
                });
                self.next_element_index += 1;
            }
        }
    }

    /// Forget a failed request so the next tick can retry.
    pub fn abort_refill(&mut self, generation: u64) {
        if self
            .in_flight
            .map(|pending| pending.generation == generation)
            .unwrap_or(false)
        {
            self.in_flight = None;
        }
    }

    /// Retarget the window at a word start (seek support). `char_offset` is
    /// the document char offset where element `word_index` begins.
    pub fn reset_to(&mut self, word_index: usize, char_offset: usize) {
        self.buffer.clear();
        self.runs.clear();
        self.open_run = None;
        self.first_char_index = char_offset;
        self.next_char_offset = char_offset;
        self.next_element_index = word_index;
        self.generation = self.generation.wrapping_add(1);
        self.in_flight = None;
        self.exhausted = false;
    }
}
