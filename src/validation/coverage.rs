/*!
 * Word coverage of a timeline against an expected word list.
 */

use std::collections::HashSet;

use crate::subtitle_processor::SubtitleEntry;

/// Punctuation removed from the edges of every word before comparison
const EDGE_PUNCTUATION: &[char] = &['.', ',', '!', '?', ';', ':'];

/// Outcome of comparing found words to expected words
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordCoverage {
    /// Expected words never found, sorted
    pub missing: Vec<String>,
    /// Found words not expected, in order of appearance with duplicates
    pub extra: Vec<String>,
}

impl WordCoverage {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Lower-cased, punctuation-trimmed words of every entry's plain text
pub fn collect_words(entries: &[SubtitleEntry]) -> Vec<String> {
    entries
        .iter()
        .flat_map(|entry| {
            entry
                .plain_text()
                .to_lowercase()
                .split_whitespace()
                .map(|w| w.trim_matches(EDGE_PUNCTUATION).to_string())
                .filter(|w| !w.is_empty())
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Compare the words of `entries` with `expected` (case-insensitive)
pub fn check_coverage(entries: &[SubtitleEntry], expected: &[String]) -> WordCoverage {
    let expected: HashSet<String> = expected.iter().map(|w| w.to_lowercase()).collect();
    let found = collect_words(entries);
    let found_set: HashSet<&str> = found.iter().map(String::as_str).collect();

    let mut missing: Vec<String> = expected
        .iter()
        .filter(|w| !found_set.contains(w.as_str()))
        .cloned()
        .collect();
    missing.sort();

    let extra = found.into_iter().filter(|w| !expected.contains(w)).collect();

    WordCoverage { missing, extra }
}
