use super::super::ReadAlongSession;
use super::super::state::{PlaybackLifecycle, TICK};
use super::Effect;
use crate::config::{MAX_PLAYBACK_RATE, MIN_PLAYBACK_RATE};
use crate::text_window::SpanLookup;
use std::time::Duration;
use tracing::{debug, info};

impl ReadAlongSession {
    pub(super) fn handle_play(&mut self, effects: &mut Vec<Effect>) {
        match self.playhead.lifecycle {
            PlaybackLifecycle::Playing => {}
            PlaybackLifecycle::Seeking { target, .. } => {
                // Keep the seek in flight but resume once it anchors.
                self.playhead.lifecycle = PlaybackLifecycle::Seeking {
                    target,
                    resume: true,
                };
            }
            PlaybackLifecycle::Idle => {
                info!(word = ?self.playhead.current_word, "Starting playback");
                self.playhead.lifecycle = PlaybackLifecycle::Playing;
                effects.push(Effect::PlayAudio);
                self.maybe_refill_sync(effects);
                self.maybe_refill_text(effects);
            }
        }
    }

    pub(super) fn handle_pause(&mut self, effects: &mut Vec<Effect>) {
        match self.playhead.lifecycle {
            PlaybackLifecycle::Idle => {}
            PlaybackLifecycle::Seeking { target, resume } => {
                // Audio was already paused when the seek began; just stop
                // the anchor from resuming it.
                if resume {
                    self.playhead.lifecycle = PlaybackLifecycle::Seeking {
                        target,
                        resume: false,
                    };
                }
            }
            PlaybackLifecycle::Playing => {
                info!(word = ?self.playhead.current_word, "Pausing playback");
                self.playhead.lifecycle = PlaybackLifecycle::Idle;
                effects.push(Effect::PauseAudio);
                if let Some(word_index) = self.playhead.current_word {
                    effects.push(Effect::PersistPosition { word_index });
                }
            }
        }
    }

    pub(super) fn handle_toggle_play_pause(&mut self, effects: &mut Vec<Effect>) {
        match self.playhead.lifecycle {
            PlaybackLifecycle::Playing => self.handle_pause(effects),
            PlaybackLifecycle::Idle => self.handle_play(effects),
            PlaybackLifecycle::Seeking { resume, .. } => {
                if resume {
                    self.handle_pause(effects);
                } else {
                    self.handle_play(effects);
                }
            }
        }
    }

    pub(super) fn handle_set_rate(&mut self, rate: f32, effects: &mut Vec<Effect>) {
        if !rate.is_finite() {
            return;
        }
        let clamped = rate.clamp(MIN_PLAYBACK_RATE, MAX_PLAYBACK_RATE);
        if (clamped - self.playhead.rate).abs() > f32::EPSILON {
            self.playhead.rate = clamped;
            self.config.playback_rate = clamped;
            info!(rate = clamped, "Adjusted playback rate");
            effects.push(Effect::SetAudioRate { rate: clamped });
            effects.push(Effect::SaveConfig);
        }
    }

    /// Re-anchor virtual elapsed time from the audio engine's own clock.
    pub(super) fn handle_sync_elapsed(&mut self, seconds: f64) {
        if self.playhead.is_playing() && seconds.is_finite() && seconds >= 0.0 {
            self.playhead.elapsed = Duration::from_secs_f64(seconds);
        }
    }

    /// One mapper tick: advance virtual time, resolve it to a word index via
    /// the sync window, and fire side effects only on a word transition.
    pub(super) fn handle_tick(&mut self, effects: &mut Vec<Effect>) {
        if !self.playhead.is_playing() {
            return;
        }

        self.playhead.elapsed +=
            Duration::from_secs_f64(TICK.as_secs_f64() * self.playhead.rate as f64);
        let step = self.playhead.audio_step();

        // Advance at most one word per tick: ties on equal timesteps resolve
        // over consecutive ticks, and a window miss simply waits for refill.
        let candidate = self
            .playhead
            .current_word
            .map(|word| word + 1)
            .unwrap_or(self.sync.first_word_index());
        if let Some(timestep) = self.sync.timestep_at(candidate) {
            if timestep <= step {
                self.playhead.current_word = Some(candidate);
                self.playhead.pending_highlight = true;
                debug!(word = candidate, timestep, step, "Advanced playhead");
                effects.push(Effect::PersistPosition {
                    word_index: candidate,
                });
                self.emit_sentence_boundaries(candidate, effects);
            }
        }

        self.flush_pending_highlight(effects);
        self.maybe_refill_sync(effects);
        self.maybe_refill_text(effects);
    }

    /// Emit the deferred highlight once its span is resolvable. A gap element
    /// produces no highlight; the previous word keeps it.
    pub(super) fn flush_pending_highlight(&mut self, effects: &mut Vec<Effect>) {
        if !self.playhead.pending_highlight {
            return;
        }
        let Some(word_index) = self.playhead.current_word else {
            self.playhead.pending_highlight = false;
            return;
        };
        let lookup = self.text.lookup(word_index);
        match lookup {
            SpanLookup::Word(span) => {
                self.playhead.pending_highlight = false;
                effects.push(Effect::HighlightWord { word_index, span });
                if self.config.zoom_enabled {
                    effects.push(Effect::ZoomToWord { word_index });
                }
            }
            SpanLookup::Gap(_) => {
                self.playhead.pending_highlight = false;
            }
            SpanLookup::Unavailable => {
                // Not ready this tick; the highlight catches up after refill.
                if let Some(fetch) = self.text.begin_refill() {
                    effects.push(Effect::ExtractText {
                        generation: fetch.generation,
                        char_offset: fetch.char_offset,
                        length: fetch.length,
                    });
                }
            }
        }
    }

    pub(super) fn handle_close_session(&mut self, effects: &mut Vec<Effect>) {
        info!(book_id = %self.book_id, "Closing read-along session");
        if let Some(word_index) = self.playhead.current_word {
            effects.push(Effect::PersistPosition { word_index });
        }
        if self.playhead.is_playing() {
            effects.push(Effect::PauseAudio);
        }
        self.playhead.lifecycle = PlaybackLifecycle::Idle;
        self.io_token.cancel();
        self.closed = true;
    }
}
