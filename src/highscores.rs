//! High score tracking
//!
//! Persisted as a single integer. The store is consulted only when a run
//! ends: read, compare, write back if beaten.

use crate::persistence::{KeyValueStore, keys, load_parsed};

/// Best score seen, cached in memory so a broken store never loses it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighScore {
    best: u64,
}

impl HighScore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the stored best (0 if missing or unreadable)
    pub fn load(store: &impl KeyValueStore) -> Self {
        let best = load_parsed(store, keys::HIGH_SCORE).unwrap_or(0);
        log::info!("High score: {best}");
        Self { best }
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    /// Submit a finished run's score. Returns true on a new high score.
    ///
    /// If the store cannot be written the new best is still kept in memory
    /// for the rest of the visit.
    pub fn submit(&mut self, store: &mut impl KeyValueStore, score: u64) -> bool {
        let stored: u64 = load_parsed(&*store, keys::HIGH_SCORE).unwrap_or(0);
        let best = stored.max(self.best);
        if score <= best {
            self.best = best;
            return false;
        }

        self.best = score;
        match store.set(keys::HIGH_SCORE, &score.to_string()) {
            Ok(()) => log::info!("New high score saved: {score}"),
            Err(e) => log::warn!("New high score {score} kept in memory only: {e}"),
        }
        true
    }
}
