/*!
 * Interpretation caching for one enhancement run.
 *
 * Repeated lyric lines are interpreted once per output mode. The cache is
 * owned by the run that created it; clones share the same storage.
 */

use log::debug;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::OutputMode;
use super::interpretation::Interpretation;

type CacheKey = (OutputMode, String);

/// Interpretation cache keyed by output mode and cleaned phrase
#[derive(Debug, Clone, Default)]
pub struct InterpretationCache {
    entries: Arc<RwLock<HashMap<CacheKey, Interpretation>>>,
    hits: Arc<AtomicUsize>,
    misses: Arc<AtomicUsize>,
}

impl InterpretationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a cached interpretation, counting the hit or miss
    pub fn get(&self, mode: OutputMode, text: &str) -> Option<Interpretation> {
        let found = self.entries.read().get(&(mode, text.to_string())).cloned();
        match found {
            Some(_) => self.hits.fetch_add(1, Ordering::Relaxed),
            None => self.misses.fetch_add(1, Ordering::Relaxed),
        };
        found
    }

    /// Store `interpretation` unless the key is already present.
    ///
    /// Returns the value held by the cache afterwards, which is the earlier
    /// one when two writers race on the same key.
    pub fn insert_if_absent(&self, mode: OutputMode, text: &str, interpretation: Interpretation) -> Interpretation {
        let mut entries = self.entries.write();
        let stored = entries.entry((mode, text.to_string())).or_insert_with(|| {
            debug!("Cached interpretation for '{}' ({})", text, mode);
            interpretation
        });
        stored.clone()
    }

    pub fn contains(&self, mode: OutputMode, text: &str) -> bool {
        self.entries.read().contains_key(&(mode, text.to_string()))
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Hits, misses and hit rate in percent
    pub fn stats(&self) -> (usize, usize, f64) {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let rate = if total > 0 { hits as f64 * 100.0 / total as f64 } else { 0.0 };
        (hits, misses, rate)
    }
}
