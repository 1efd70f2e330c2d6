use serde::{Deserialize, Serialize};

/// Marker used wherever the language model could not provide a value
pub const UNKNOWN: &str = "?";

/// Romanization and gloss of one character or word
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitDetail {
    /// Literal form as it appears in the phrase
    pub unit: String,
    pub romanization: String,
    pub gloss: String,
}

impl UnitDetail {
    pub fn new(unit: impl Into<String>, romanization: impl Into<String>, gloss: impl Into<String>) -> Self {
        Self {
            unit: unit.into(),
            romanization: romanization.into(),
            gloss: gloss.into(),
        }
    }
}

/// What the language model says about one cleaned phrase
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Interpretation {
    /// Pinyin of the whole phrase
    pub romanization: String,
    /// Translation, or emoji hint in emoji mode
    pub translation: String,
    /// Per-unit breakdown in phrase order
    pub breakdown: Vec<UnitDetail>,
    /// Word-by-word gloss (learn mode)
    pub literal_gloss: Option<String>,
    /// Sing-along memory tip (learn mode)
    pub tip: Option<String>,
}

impl Interpretation {
    /// Interpretation of an empty phrase
    pub fn empty() -> Self {
        Self::default()
    }

    /// Stand-in used when the language model fails for `text`.
    ///
    /// The romanization line shows the phrase itself and every other field
    /// is `?`, one breakdown unit per non-whitespace character.
    pub fn degraded(text: &str) -> Self {
        Self {
            romanization: text.to_string(),
            translation: UNKNOWN.to_string(),
            breakdown: text
                .chars()
                .filter(|c| !c.is_whitespace())
                .map(|c| UnitDetail::new(c.to_string(), UNKNOWN, UNKNOWN))
                .collect(),
            literal_gloss: None,
            tip: None,
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.translation == UNKNOWN && self.breakdown.iter().all(|u| u.romanization == UNKNOWN)
    }

    /// First unit whose literal form equals `unit` exactly
    pub fn find_unit(&self, unit: &str) -> Option<&UnitDetail> {
        self.breakdown.iter().find(|u| u.unit == unit)
    }
}
