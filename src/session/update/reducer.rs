use super::super::ReadAlongSession;
use super::super::messages::Message;
use super::Effect;
use tracing::debug;

impl ReadAlongSession {
    /// Advance the session with one message, returning the work the host
    /// must perform. Inert after `CloseSession`.
    pub fn reduce(&mut self, message: Message) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.closed {
            debug!("Session closed; dropping message");
            return effects;
        }

        match message {
            Message::SectionLoaded { section_id, text } => {
                self.handle_section_loaded(section_id, text, &mut effects)
            }
            Message::Play => self.handle_play(&mut effects),
            Message::Pause => self.handle_pause(&mut effects),
            Message::TogglePlayPause => self.handle_toggle_play_pause(&mut effects),
            Message::SetRate(rate) => self.handle_set_rate(rate, &mut effects),
            Message::Tick => self.handle_tick(&mut effects),
            Message::SyncElapsed { seconds } => self.handle_sync_elapsed(seconds),
            Message::SeekToWord { word_index } => {
                self.handle_seek_to_word(word_index, &mut effects)
            }
            Message::WordTapped { id } => self.handle_word_tapped(id, &mut effects),
            Message::SkipForward => self.handle_skip_forward(&mut effects),
            Message::SkipBackward => self.handle_skip_backward(&mut effects),
            Message::SyncPageLoaded {
                generation,
                min_word_index,
                timesteps,
            } => self.handle_sync_page_loaded(generation, min_word_index, timesteps, &mut effects),
            Message::SyncPageFailed { generation } => self.handle_sync_page_failed(generation),
            Message::TextChunkLoaded { generation, text } => {
                self.handle_text_chunk_loaded(generation, text, &mut effects)
            }
            Message::TextChunkFailed { generation } => self.handle_text_chunk_failed(generation),
            Message::PositionRestored { word_index } => {
                self.handle_position_restored(word_index, &mut effects)
            }
            Message::CloseSession => self.handle_close_session(&mut effects),
        }

        effects
    }
}
