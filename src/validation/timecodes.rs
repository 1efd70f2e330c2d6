/*!
 * Timing checks over a subtitle timeline.
 *
 * Every check scans the whole timeline; none stops at the first finding.
 * - Overlaps: every pair of entries sharing an instant
 * - Non-sequential: adjacent entries where one ends after the next starts
 * - Durations: entries too short to read or long enough to look stuck
 * - Gaps: long silences between adjacent entries
 */

use log::debug;

use crate::app_config::ValidationConfig;
use crate::subtitle_processor::SubtitleEntry;

/// Two entries involved in one finding
#[derive(Debug, Clone, PartialEq)]
pub struct EntryPair {
    /// Earlier entry in file order
    pub first: SubtitleEntry,
    /// Later entry in file order
    pub second: SubtitleEntry,
    /// Seconds of overlap or gap, depending on the check
    pub delta: f64,
}

impl EntryPair {
    fn new(first: &SubtitleEntry, second: &SubtitleEntry, delta: f64) -> Self {
        Self {
            first: first.clone(),
            second: second.clone(),
            delta,
        }
    }
}

/// Timing checks parameterized by the configured thresholds
#[derive(Debug, Clone)]
pub struct TimecodeValidator {
    config: ValidationConfig,
}

impl TimecodeValidator {
    /// Create a new validator with default thresholds
    pub fn new() -> Self {
        Self::with_config(ValidationConfig::default())
    }

    /// Create a new validator with custom thresholds
    pub fn with_config(config: ValidationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// All overlapping pairs `(i, j)` with `i < j`.
    ///
    /// `delta` is `max(0, first.end - second.start)`.
    pub fn find_overlaps(&self, entries: &[SubtitleEntry]) -> Vec<EntryPair> {
        let mut pairs = Vec::new();
        for (i, a) in entries.iter().enumerate() {
            for b in &entries[i + 1..] {
                if a.overlaps_with(b) {
                    pairs.push(EntryPair::new(a, b, (a.end - b.start).max(0.0)));
                }
            }
        }
        debug!("Overlap scan: {} pair(s) across {} entries", pairs.len(), entries.len());
        pairs
    }

    /// Adjacent pairs where the first ends after the second starts
    pub fn find_non_sequential(&self, entries: &[SubtitleEntry]) -> Vec<EntryPair> {
        entries
            .windows(2)
            .filter(|w| w[0].end > w[1].start)
            .map(|w| EntryPair::new(&w[0], &w[1], w[0].end - w[1].start))
            .collect()
    }

    /// Entries whose duration is below the minimum
    pub fn find_too_short<'a>(&self, entries: &'a [SubtitleEntry]) -> Vec<&'a SubtitleEntry> {
        entries
            .iter()
            .filter(|e| e.duration() < self.config.min_duration_secs)
            .collect()
    }

    /// Entries whose duration exceeds the maximum
    pub fn find_too_long<'a>(&self, entries: &'a [SubtitleEntry]) -> Vec<&'a SubtitleEntry> {
        entries
            .iter()
            .filter(|e| e.duration() > self.config.max_duration_secs)
            .collect()
    }

    /// Adjacent pairs separated by more than the allowed gap
    pub fn find_large_gaps(&self, entries: &[SubtitleEntry]) -> Vec<EntryPair> {
        entries
            .windows(2)
            .filter_map(|w| {
                let gap = w[1].start - w[0].end;
                (gap > self.config.max_gap_secs).then(|| EntryPair::new(&w[0], &w[1], gap))
            })
            .collect()
    }
}

impl Default for TimecodeValidator {
    fn default() -> Self {
        Self::new()
    }
}
