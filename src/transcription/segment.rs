/*!
 * Timed transcript segments produced by the speech recognizer.
 */

use serde::{Deserialize, Serialize};

// @struct: One recognized sub-word unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    // @field: Start time in seconds
    pub start: f64,

    // @field: End time in seconds
    pub end: f64,

    // @field: Recognized text as emitted by the model (may carry spaces)
    pub surface: String,
}

impl Token {
    pub fn new(start: f64, end: f64, surface: impl Into<String>) -> Self {
        Token {
            start,
            end,
            surface: surface.into(),
        }
    }

    /// Surface form without surrounding whitespace
    pub fn trimmed_surface(&self) -> &str {
        self.surface.trim()
    }
}

// @struct: One recognized utterance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    // @field: Start time in seconds
    pub start: f64,

    // @field: End time in seconds
    pub end: f64,

    // @field: Display text
    pub text: String,

    // @field: Word-level timing, when the recognizer produced it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens: Option<Vec<Token>>,
}

impl Segment {
    /// Create a segment without word-level timing
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Segment {
            start,
            end,
            text: text.into(),
            tokens: None,
        }
    }

    /// Create a segment carrying word-level timing
    pub fn with_tokens(start: f64, end: f64, text: impl Into<String>, tokens: Vec<Token>) -> Self {
        Segment {
            start,
            end,
            text: text.into(),
            tokens: Some(tokens),
        }
    }

    /// Whether at least one token is attached
    pub fn has_tokens(&self) -> bool {
        self.tokens.as_ref().is_some_and(|tokens| !tokens.is_empty())
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Tokens that fall outside the segment range.
    ///
    /// Recognizers do not strictly enforce containment, so this is only used
    /// for diagnostics.
    pub fn stray_token_count(&self) -> usize {
        self.tokens
            .as_ref()
            .map(|tokens| {
                tokens
                    .iter()
                    .filter(|t| t.start < self.start || t.end > self.end)
                    .count()
            })
            .unwrap_or(0)
    }
}
