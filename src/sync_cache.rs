//! Sliding window over the paginated word-index → audio-timestep table.
//!
//! The cache never performs I/O itself: `begin_refill` hands the host a page
//! request, `complete_refill` applies the page on the reduce timeline, and a
//! generation counter drops completions that arrive after a seek. At most one
//! refill is outstanding per cache; a request made while one is in flight is
//! dropped and the next tick re-requests if still needed.

use std::collections::VecDeque;
use tracing::{debug, warn};

/// A page request the host must satisfy against the backing store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncFetch {
    pub generation: u64,
    pub offset: usize,
    pub limit: usize,
}

#[derive(Debug, Clone, Copy)]
struct PendingFetch {
    generation: u64,
    retained: usize,
    limit: usize,
}

#[derive(Debug)]
pub struct SyncPathCache {
    first_word_index: usize,
    window: VecDeque<u64>,
    /// Next word index to fetch from the backing store.
    offset: usize,
    cache_size: usize,
    reload_threshold: usize,
    generation: u64,
    in_flight: Option<PendingFetch>,
    exhausted: bool,
}

impl SyncPathCache {
    pub fn new(cache_size: usize, reload_threshold: usize, start_word: usize) -> Self {
        let cache_size = cache_size.max(2);
        Self {
            first_word_index: start_word,
            window: VecDeque::with_capacity(cache_size),
            offset: start_word,
            cache_size,
            reload_threshold: reload_threshold.clamp(1, cache_size / 2),
            generation: 0,
            in_flight: None,
            exhausted: false,
        }
    }

    /// Timestep at which `word` begins being spoken, if the window covers it.
    pub fn timestep_at(&self, word: usize) -> Option<u64> {
        let slot = word.checked_sub(self.first_word_index)?;
        self.window.get(slot).copied()
    }

    /// Highest word index the window currently covers.
    pub fn last_loaded(&self) -> Option<usize> {
        (!self.window.is_empty()).then(|| self.first_word_index + self.window.len() - 1)
    }

    pub fn first_word_index(&self) -> usize {
        self.first_word_index
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True when the read cursor is close enough to the window end to warrant
    /// a refill.
    pub fn should_refill(&self, cursor: usize) -> bool {
        if self.exhausted {
            return false;
        }
        if self.window.is_empty() {
            return true;
        }
        cursor + self.reload_threshold >= self.first_word_index + self.window.len()
    }

    /// Start a refill unless one is already outstanding or the table ended.
    pub fn begin_refill(&mut self) -> Option<SyncFetch> {
        if self.in_flight.is_some() || self.exhausted {
            return None;
        }
        let retained = if self.window.is_empty() {
            0
        } else {
            self.reload_threshold.min(self.window.len())
        };
        let limit = self.cache_size - retained;
        let fetch = SyncFetch {
            generation: self.generation,
            offset: self.offset,
            limit,
        };
        self.in_flight = Some(PendingFetch {
            generation: self.generation,
            retained,
            limit,
        });
        debug!(offset = fetch.offset, limit, retained, "Requesting sync page");
        Some(fetch)
    }

    /// Apply a completed page: shift the retained tail to the head, append
    /// the page, and resize to exactly fit the data the store returned.
    /// Returns false when the completion is stale.
    pub fn complete_refill(&mut self, generation: u64, min_word_index: usize, timesteps: &[u64]) -> bool {
        let Some(pending) = self.in_flight else {
            debug!(generation, "Dropping sync page with no refill outstanding");
            return false;
        };
        if pending.generation != generation || generation != self.generation {
            debug!(generation, current = self.generation, "Ignoring stale sync page");
            return false;
        }
        self.in_flight = None;
        if min_word_index != self.offset {
            warn!(
                min_word_index,
                expected = self.offset,
                "Sync store returned an unexpected page start"
            );
        }
        while self.window.len() > pending.retained {
            self.window.pop_front();
        }
        let fetched = timesteps.len().min(pending.limit);
        self.window.extend(timesteps.iter().copied().take(pending.limit));
        self.first_word_index = self.offset - pending.retained;
        self.offset += fetched;
        self.exhausted = fetched < pending.limit;
        debug!(
            first_word = self.first_word_index,
            len = self.window.len(),
            exhausted = self.exhausted,
            "Applied sync page"
        );
        true
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

    /// Discard the window and retarget the cache at `word` (seek support).
    /// In-flight completions for the old window become stale.
    pub fn reset_to(&mut self, word: usize) {
        self.window.clear();
        self.first_word_index = word;
        self.offset = word;
        self.generation = self.generation.wrapping_add(1);
        self.in_flight = None;
        self.exhausted = false;
    }
}
