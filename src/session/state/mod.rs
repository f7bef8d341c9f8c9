mod constants;
mod playhead;

pub(crate) use constants::*;
pub use playhead::PlaybackLifecycle;
pub(in crate::session) use playhead::PlayheadState;
