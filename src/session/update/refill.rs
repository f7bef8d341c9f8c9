use super::super::ReadAlongSession;
use super::super::state::{PlaybackLifecycle, TIMESTEP_MS};
use super::Effect;
use crate::text_window::SpanLookup;
use std::time::Duration;
use tracing::{debug, info, warn};

impl ReadAlongSession {
    pub(super) fn handle_sync_page_loaded(
        &mut self,
        generation: u64,
        min_word_index: usize,
        timesteps: Vec<u64>,
        effects: &mut Vec<Effect>,
    ) {
        if !self.sync.complete_refill(generation, min_word_index, &timesteps) {
            return;
        }
        self.try_anchor_seek(effects);
    }

    pub(super) fn handle_sync_page_failed(&mut self, generation: u64) {
        debug!(generation, "Sync page fetch failed; the next tick retries");
        self.sync.abort_refill(generation);
    }

    pub(super) fn handle_text_chunk_loaded(
        &mut self,
        generation: u64,
        text: String,
        effects: &mut Vec<Effect>,
    ) {
        if !self.text.complete_refill(generation, &text) {
            return;
        }
        self.flush_pending_highlight(effects);
    }

    pub(super) fn handle_text_chunk_failed(&mut self, generation: u64) {
        debug!(generation, "Text chunk fetch failed; the next tick retries");
        self.text.abort_refill(generation);
    }

    /// While seeking, the playhead cannot be placed until the sync window
    /// covers the target word; once it does, anchor elapsed time at the
    /// target's timestep and resume or idle per the pre-seek state.
    fn try_anchor_seek(&mut self, effects: &mut Vec<Effect>) {
        let Some((target, resume)) = self.playhead.seeking_context() else {
            return;
        };
        let Some(timestep) = self.sync.timestep_at(target) else {
            if self.sync.is_exhausted() {
                warn!(word = target, "Seek target beyond the sync table; abandoning seek");
                self.playhead.lifecycle = PlaybackLifecycle::Idle;
            } else if let Some(fetch) = self.sync.begin_refill() {
                effects.push(Effect::FetchSyncPage {
                    generation: fetch.generation,
                    offset: fetch.offset,
                    limit: fetch.limit,
                });
            }
            return;
        };

        self.playhead.elapsed = Duration::from_millis(timestep * TIMESTEP_MS);
        self.playhead.current_word = Some(target);
        self.playhead.pending_highlight = true;
        self.playhead.lifecycle = if resume {
            PlaybackLifecycle::Playing
        } else {
            PlaybackLifecycle::Idle
        };
        info!(word = target, timestep, resume, "Anchored seek");
        effects.push(Effect::SeekAudio {
            seconds: (timestep * TIMESTEP_MS) as f64 / 1000.0,
        });
        if resume {
            effects.push(Effect::PlayAudio);
        }
        effects.push(Effect::PersistPosition { word_index: target });
        self.flush_pending_highlight(effects);
        self.maybe_refill_sync(effects);
    }

    /// Proactive refill: request the next sync page before the mapper runs
    /// into the window end, keeping the tick path non-blocking.
    pub(super) fn maybe_refill_sync(&mut self, effects: &mut Vec<Effect>) {
        let cursor = self
            .playhead
            .current_word
            .map(|word| word + 1)
            .unwrap_or(self.sync.first_word_index());
        if !self.sync.should_refill(cursor) {
            return;
        }
        if let Some(fetch) = self.sync.begin_refill() {
            effects.push(Effect::FetchSyncPage {
                generation: fetch.generation,
                offset: fetch.offset,
                limit: fetch.limit,
            });
        }
    }

    /// Proactive refill for the text window: fetch once the lookahead past
    /// the current word's span drops under the reload threshold.
    pub(super) fn maybe_refill_text(&mut self, effects: &mut Vec<Effect>) {
        let needed = if self.text.is_empty() {
            true
        } else {
            match self.playhead.current_word {
                Some(word) => match self.text.lookup(word) {
                    SpanLookup::Word(span) | SpanLookup::Gap(span) => {
                        self.text.chars_after(span) <= self.text.reload_chars()
                    }
                    SpanLookup::Unavailable => true,
                },
                None => false,
            }
        };
        if !needed {
            return;
        }
        if let Some(fetch) = self.text.begin_refill() {
            effects.push(Effect::ExtractText {
                generation: fetch.generation,
                char_offset: fetch.char_offset,
                length: fetch.length,
            });
        }
    }
}
