/*!
 * Pinyin and translation enhancement of Chinese subtitles.
 *
 * - `interpretation`: what the language model says about one phrase
 * - `cache`: per-run interpretation cache keyed by mode and phrase
 * - `prompts`: prompt templates and tolerant response parsing
 * - `interpreter`: the `Interpreter` seam and its LLM-backed implementation
 * - `merge`: builds the multi-line enhanced entries
 */

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod cache;
pub mod interpretation;
pub mod interpreter;
pub mod merge;
pub mod prompts;

pub use cache::InterpretationCache;
pub use interpretation::{Interpretation, UnitDetail};
pub use interpreter::{Interpreter, LlmInterpreter};
pub use merge::{EnhancementMerger, derive_output_path};

/// Layout of the enhanced subtitle lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Chinese, pinyin, English translation
    #[default]
    Full,
    /// Chinese, pinyin, emoji hint
    Emoji,
    /// Pinyin first, Chinese, then a memory tip
    Learn,
}

impl OutputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Emoji => "emoji",
            Self::Learn => "learn",
        }
    }

    /// Suffix inserted before the subtitle extension of derived output files
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Full => ".enhanced",
            Self::Emoji => ".emoji",
            Self::Learn => ".learn",
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "emoji" => Ok(Self::Emoji),
            "learn" => Ok(Self::Learn),
            _ => Err(anyhow::anyhow!("Invalid output mode: {}", s)),
        }
    }
}
