//! Cooperative cancellation for host I/O tasks.
//!
//! The session hands its token to refill and persistence tasks; closing the
//! session cancels the token so late completions do no further work.

use anyhow::{Result, anyhow};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Bail out of a task between I/O steps once the session has closed.
    pub fn check_cancelled(&self, task: &'static str) -> Result<()> {
        if self.is_cancelled() {
            return Err(anyhow!("session closed while running task={task}"));
        }
        Ok(())
    }
}
