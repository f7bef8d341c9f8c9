use super::TIMESTEP_MS;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackLifecycle {
    Idle,
    Playing,
    /// Waiting for the sync window covering `target` before anchoring.
    Seeking { target: usize, resume: bool },
}

/// Virtual playhead: elapsed audio time plus the resolved word index.
/// `current_word` of `None` means no word has been reached yet.
#[derive(Debug)]
pub struct PlayheadState {
    pub(in crate::session) lifecycle: PlaybackLifecycle,
    pub(in crate::session) elapsed: Duration,
    pub(in crate::session) rate: f32,
    pub(in crate::session) current_word: Option<usize>,
    /// A word transition happened but its span was not yet resolvable; the
    /// highlight catches up on a later tick or refill completion.
    pub(in crate::session) pending_highlight: bool,
}

impl PlayheadState {
    pub(in crate::session) fn new(rate: f32) -> Self {
        Self {
            lifecycle: PlaybackLifecycle::Idle,
            elapsed: Duration::ZERO,
            rate,
            current_word: None,
            pending_highlight: false,
        }
    }

    pub(in crate::session) fn is_playing(&self) -> bool {
        matches!(self.lifecycle, PlaybackLifecycle::Playing)
    }

    pub(in crate::session) fn seeking_context(&self) -> Option<(usize, bool)> {
        match self.lifecycle {
            PlaybackLifecycle::Seeking { target, resume } => Some((target, resume)),
            _ => None,
        }
    }

    /// Current audio step: elapsed time in whole timesteps.
    pub(in crate::session) fn audio_step(&self) -> u64 {
        (self.elapsed.as_millis() / TIMESTEP_MS as u128) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audio_step_floors_elapsed_time() {
        let mut playhead = PlayheadState::new(1.0);
        assert_eq!(playhead.audio_step(), 0);
        playhead.elapsed = Duration::from_millis(19);
        assert_eq!(playhead.audio_step(), 0);
        playhead.elapsed = Duration::from_millis(100);
        assert_eq!(playhead.audio_step(), 5);
        playhead.elapsed = Duration::from_millis(119);
        assert_eq!(playhead.audio_step(), 5);
    }
}
