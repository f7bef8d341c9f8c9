use super::super::ReadAlongSession;
use super::super::state::PlaybackLifecycle;
use super::{Effect, TaggedWord};
use crate::navigator::SentenceNavigator;
use crate::segment::{parse_word_id, word_id};
use tracing::{debug, info, warn};

impl ReadAlongSession {
    pub(super) fn handle_section_loaded(
        &mut self,
        section_id: String,
        text: String,
        effects: &mut Vec<Effect>,
    ) {
        let segmentation = self.document.segment_section(&section_id, &text);
        let words: Vec<TaggedWord> = segmentation
            .words
            .iter()
            .map(|word| TaggedWord {
                id: word_id(word.index, word.is_gap),
                text: word.text.clone(),
                is_gap: word.is_gap,
            })
            .collect();
        info!(
            section = %section_id,
            words = words.len(),
            sentences = segmentation.sentences.len(),
            "Segmented section"
        );
        effects.push(Effect::TagWords { section_id, words });
    }

    pub(super) fn handle_seek_to_word(&mut self, word_index: usize, effects: &mut Vec<Effect>) {
        self.begin_seek(word_index, effects);
    }

    pub(super) fn handle_word_tapped(&mut self, id: String, effects: &mut Vec<Effect>) {
        match parse_word_id(&id) {
            Some((_, index)) => {
                info!(%id, index, "Word tapped; seeking");
                self.begin_seek(index, effects);
            }
            None => warn!(%id, "Ignoring tap with unrecognized identifier"),
        }
    }

    pub(super) fn handle_skip_forward(&mut self, effects: &mut Vec<Effect>) {
        let Some(word) = self.playhead.current_word else {
            return;
        };
        let target = SentenceNavigator::new(&self.document).skip_forward_target(word);
        match target {
            Some(target) => {
                info!(from = word, to = target, "Skipping to next sentence");
                self.begin_seek(target, effects);
            }
            None => debug!(word, "No next sentence to skip to"),
        }
    }

    pub(super) fn handle_skip_backward(&mut self, effects: &mut Vec<Effect>) {
        let Some(word) = self.playhead.current_word else {
            return;
        };
        let target = SentenceNavigator::new(&self.document).skip_backward_target(word);
        match target {
            Some(target) => {
                info!(from = word, to = target, "Skipping to sentence start");
                self.begin_seek(target, effects);
            }
            None => debug!(word, "No sentence boundary to skip to"),
        }
    }

    pub(super) fn handle_position_restored(
        &mut self,
        word_index: Option<usize>,
        effects: &mut Vec<Effect>,
    ) {
        match word_index {
            Some(index) => {
                info!(index, "Restoring last played word");
                self.begin_seek(index, effects);
            }
            None => debug!("No persisted position; starting from the top"),
        }
    }

    /// A jump invalidates the sliding windows' locality assumption: reset
    /// both caches at the target (bumping generations so in-flight refills
    /// become stale) and wait for the sync page to anchor the playhead.
    pub(super) fn begin_seek(&mut self, target: usize, effects: &mut Vec<Effect>) {
        let Some(char_offset) = self.document.char_offset_of(target) else {
            warn!(word = target, "Seek target is outside the segmented document");
            return;
        };
        let resume = match self.playhead.lifecycle {
            PlaybackLifecycle::Playing => true,
            PlaybackLifecycle::Seeking { resume, .. } => resume,
            PlaybackLifecycle::Idle => false,
        };
        if resume {
            effects.push(Effect::PauseAudio);
        }
        info!(word = target, char_offset, resume, "Seeking to word");
        self.playhead.lifecycle = PlaybackLifecycle::Seeking { target, resume };
        self.playhead.pending_highlight = false;
        self.sync.reset_to(target);
        self.text.reset_to(target, char_offset);
        if let Some(fetch) = self.sync.begin_refill() {
            effects.push(Effect::FetchSyncPage {
                generation: fetch.generation,
                offset: fetch.offset,
                limit: fetch.limit,
            });
        }
        if let Some(fetch) = self.text.begin_refill() {
            effects.push(Effect::ExtractText {
                generation: fetch.generation,
                char_offset: fetch.char_offset,
                length: fetch.length,
            });
        }
        self.emit_sentence_boundaries(target, effects);
    }

    /// Report prev/curr/next sentence starts whenever the containing
    /// sentence changes, so the host can drive its skip controls.
    pub(super) fn emit_sentence_boundaries(&mut self, word: usize, effects: &mut Vec<Effect>) {
        let Some(boundaries) = SentenceNavigator::new(&self.document).adjacent_starts(word) else {
            return;
        };
        if self.last_sentence_start != Some(boundaries.curr) {
            self.last_sentence_start = Some(boundaries.curr);
            effects.push(Effect::SentenceBoundaries {
                prev: boundaries.prev,
                curr: boundaries.curr,
                next: boundaries.next,
            });
        }
    }
}
