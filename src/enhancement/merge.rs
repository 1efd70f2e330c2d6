/*!
 * Enhancement merge layer.
 *
 * Every entry becomes a three-line entry built from the interpretation of its
 * cleaned text. Interpretations are fetched once per unique phrase, possibly
 * concurrently, and a failed lookup degrades to placeholder lines instead of
 * failing the run.
 */

use futures::stream::{self, StreamExt};
use log::{debug, info, warn};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::OutputMode;
use super::cache::InterpretationCache;
use super::interpretation::Interpretation;
use super::interpreter::Interpreter;
use crate::highlight;
use crate::subtitle_processor::SubtitleEntry;

/// Builds enhanced entries for one run
pub struct EnhancementMerger {
    interpreter: Arc<dyn Interpreter>,
    cache: InterpretationCache,
    mode: OutputMode,
    concurrency: usize,
}

impl EnhancementMerger {
    /// Create a merger with a fresh cache and sequential lookups
    pub fn new(interpreter: Arc<dyn Interpreter>, mode: OutputMode) -> Self {
        Self {
            interpreter,
            cache: InterpretationCache::new(),
            mode,
            concurrency: 1,
        }
    }

    /// Allow up to `concurrency` lookups in flight
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Use an existing cache
    pub fn with_cache(mut self, cache: InterpretationCache) -> Self {
        self.cache = cache;
        self
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn cache(&self) -> &InterpretationCache {
        &self.cache
    }

    /// Distinct non-empty cleaned phrases in order of first appearance
    pub fn unique_spans(entries: &[SubtitleEntry]) -> Vec<String> {
        let mut seen = HashSet::new();
        entries
            .iter()
            .map(SubtitleEntry::plain_text)
            .filter(|text| !text.is_empty())
            .filter(|text| seen.insert(text.clone()))
            .collect()
    }

    /// Interpretation of `text`, from the cache or the interpreter.
    ///
    /// Never fails: interpreter errors yield `Interpretation::degraded`.
    pub async fn lookup(&self, text: &str) -> Interpretation {
        if text.is_empty() {
            return Interpretation::empty();
        }
        if let Some(cached) = self.cache.get(self.mode, text) {
            return cached;
        }

        let interpretation = match self.interpreter.interpret(text, self.mode).await {
            Ok(interpretation) => interpretation,
            Err(e) => {
                warn!("Interpretation failed for '{}': {}", text, e);
                Interpretation::degraded(text)
            }
        };
        self.cache.insert_if_absent(self.mode, text, interpretation)
    }

    /// Look up every span, reporting `(done, total)` after each one
    pub async fn prefetch(&self, spans: &[String], progress: impl Fn(usize, usize)) {
        let total = spans.len();
        let done = AtomicUsize::new(0);

        stream::iter(spans.iter())
            .map(|span| self.lookup(span))
            .buffer_unordered(self.concurrency)
            .for_each(|_| {
                let current = done.fetch_add(1, Ordering::SeqCst) + 1;
                progress(current, total);
                async {}
            })
            .await;
    }

    /// Pinyin line, highlighting the romanization of the highlighted unit.
    ///
    /// Without a highlight or a breakdown this is the phrase romanization.
    /// Only the first unit equal to the highlighted unit is wrapped; later repeats
    /// stay plain so the line carries a single highlight.
    pub fn romanization_line(interpretation: &Interpretation, highlighted: Option<&str>) -> String {
        let Some(unit) = highlighted.filter(|_| !interpretation.breakdown.is_empty()) else {
            return interpretation.romanization.clone();
        };

        let mut wrapped = false;
        interpretation
            .breakdown
            .iter()
            .map(|detail| {
                if !wrapped && detail.unit == unit {
                    wrapped = true;
                    highlight::wrap(&detail.romanization)
                } else {
                    detail.romanization.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Display lines of `entry` for `mode`
    pub fn format_lines(mode: OutputMode, entry: &SubtitleEntry, interpretation: &Interpretation) -> Vec<String> {
        let highlighted = entry.highlighted_unit();
        let romanization = Self::romanization_line(interpretation, highlighted.as_deref());

        match mode {
            OutputMode::Full | OutputMode::Emoji => vec![
                entry.text.clone(),
                romanization,
                format!("({})", interpretation.translation),
            ],
            OutputMode::Learn => {
                let third = match (&interpretation.tip, &interpretation.literal_gloss) {
                    (Some(tip), _) if !tip.trim().is_empty() => tip.clone(),
                    (_, Some(gloss)) if !gloss.trim().is_empty() => format!("({})", gloss),
                    _ => format!("({})", interpretation.translation),
                };
                vec![romanization, entry.text.clone(), third]
            }
        }
    }

    /// Enhanced copy of `entry`, keeping its index and timing
    pub fn merge_entry(&self, entry: &SubtitleEntry, interpretation: &Interpretation) -> SubtitleEntry {
        SubtitleEntry::new(
            entry.index,
            entry.start,
            entry.end,
            Self::format_lines(self.mode, entry, interpretation).join("\n"),
        )
    }

    /// Enhance every entry, fetching interpretations for unique phrases first
    pub async fn enhance(&self, entries: &[SubtitleEntry], progress: impl Fn(usize, usize)) -> Vec<SubtitleEntry> {
        let spans = Self::unique_spans(entries);
        info!(
            "Interpreting {} unique phrase(s) across {} entries ({} mode)",
            spans.len(),
            entries.len(),
            self.mode
        );
        self.prefetch(&spans, progress).await;

        let mut enhanced = Vec::with_capacity(entries.len());
        for entry in entries {
            let interpretation = self.lookup(&entry.plain_text()).await;
            enhanced.push(self.merge_entry(entry, &interpretation));
        }

        let (hits, misses, rate) = self.cache.stats();
        debug!("Interpretation cache: {} hits, {} misses ({:.1}%)", hits, misses, rate);
        enhanced
    }
}

/// Default output path for an enhanced subtitle file.
///
/// The mode suffix goes before the final extension: `song.test.srt` becomes
/// `song.test.enhanced.srt`.
pub fn derive_output_path(input: &Path, mode: OutputMode) -> PathBuf {
    let stem = input.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    let extension = input
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "srt".to_string());
    input.with_file_name(format!("{}{}.{}", stem, mode.suffix(), extension))
}
