/*!
 * Prompt templates for phrase interpretation and parsing of the replies.
 *
 * The model is asked for a single JSON object. Replies are parsed leniently:
 * `<think>` blocks, markdown code fences and prose around the object are
 * ignored.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use super::OutputMode;
use super::interpretation::{Interpretation, UnitDetail};
use crate::errors::ProviderError;

static THINK_BLOCK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<think>.*?</think>").unwrap());

/// Shared template for full and emoji modes; `{style}` is the mode's instruction
pub const PHRASE_TEMPLATE: &str = r#"Analyze this Chinese phrase for a children's learning song.

Chinese: {text}

{style}

Rules:
- Use standard pinyin with tone marks (ā á ǎ à, ē é ě è, ī í ǐ ì, ō ó ǒ ò, ū ú ǔ ù, ǖ ǘ ǚ ǜ)
- word_details should have one entry per Chinese character
- Keep translations brief and child-friendly

Reply with a single JSON object:
{"pinyin": "...", "english": "...", "word_details": [{"char": "...", "pinyin": "...", "english": "..."}]}

/no_think"#;

pub const FULL_STYLE: &str = "For english fields: use simple 2-5 word translations.
Use simple words appropriate for children learning Chinese.";

pub const EMOJI_STYLE: &str = r#"For english fields: use 1-2 emojis + optional 1-2 word hint.
Examples: "☀️ sunshine", "❤️ love", "😊 happy", "🌧️ rain"
Keep it visual and minimal for children."#;

/// Pinyin-first pedagogy template for learn mode
pub const LEARN_TEMPLATE: &str = r#"You are a Chinese language teacher creating sing-along lyrics.

Analyze this Chinese phrase and create the BEST learning format:

Chinese: {text}

Design your response to help a child:
1. SING the pinyin correctly (spaced clearly, with tone marks)
2. UNDERSTAND what each word means (literal word-by-word gloss)
3. REMEMBER it (a fun tip, rhyme, or emoji memory hook)

Rules for pinyin_spaced:
- Space between each syllable: "nǐ hǎo" not "nǐhǎo"
- Always use tone marks

Rules for literal_gloss:
- Match the pinyin word order exactly
- Use simple words a child knows

Rules for sing_along_tip:
- Make it memorable! Use emojis, rhymes, or fun associations
- Keep it SHORT (fits on one line)

Reply with a single JSON object:
{"pinyin_spaced": "...", "literal_gloss": "...", "natural_english": "...", "sing_along_tip": "...", "word_details": [{"char": "...", "pinyin": "...", "english": "..."}]}

/no_think"#;

/// Build the user prompt for `text` in `mode`
pub fn build_prompt(mode: OutputMode, text: &str) -> String {
    match mode {
        OutputMode::Full => PHRASE_TEMPLATE.replace("{style}", FULL_STYLE).replace("{text}", text),
        OutputMode::Emoji => PHRASE_TEMPLATE.replace("{style}", EMOJI_STYLE).replace("{text}", text),
        OutputMode::Learn => LEARN_TEMPLATE.replace("{text}", text),
    }
}

#[derive(Debug, Deserialize)]
struct RawUnit {
    #[serde(default, rename = "char")]
    unit: String,
    #[serde(default)]
    pinyin: String,
    #[serde(default)]
    english: String,
}

#[derive(Debug, Deserialize)]
struct RawInterpretation {
    #[serde(default)]
    pinyin: Option<String>,
    #[serde(default)]
    pinyin_spaced: Option<String>,
    #[serde(default)]
    english: Option<String>,
    #[serde(default)]
    natural_english: Option<String>,
    #[serde(default)]
    literal_gloss: Option<String>,
    #[serde(default)]
    sing_along_tip: Option<String>,
    #[serde(default)]
    word_details: Vec<RawUnit>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Slice out the JSON object embedded in a model reply
pub fn extract_json_object(reply: &str) -> Option<&str> {
    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    (end > start).then(|| &reply[start..=end])
}

/// Parse a model reply into an `Interpretation`.
///
/// A reply without a usable pinyin field is a `ParseError`.
pub fn parse_interpretation(mode: OutputMode, reply: &str) -> Result<Interpretation, ProviderError> {
    let cleaned = THINK_BLOCK.replace_all(reply, "");
    let json = extract_json_object(&cleaned)
        .ok_or_else(|| ProviderError::ParseError("No JSON object in model reply".to_string()))?;
    let raw: RawInterpretation = serde_json::from_str(json)
        .map_err(|e| ProviderError::ParseError(format!("Invalid interpretation JSON: {}", e)))?;

    let romanization = match mode {
        OutputMode::Learn => non_empty(raw.pinyin_spaced).or(non_empty(raw.pinyin)),
        OutputMode::Full | OutputMode::Emoji => {
            non_empty(raw.pinyin).or(non_empty(raw.pinyin_spaced))
        }
    }
    .ok_or_else(|| ProviderError::ParseError("Model reply has no pinyin".to_string()))?;

    let translation = non_empty(raw.english).or(non_empty(raw.natural_english)).unwrap_or_default();

    Ok(Interpretation {
        romanization,
        translation,
        breakdown: raw
            .word_details
            .into_iter()
            .filter(|u| !u.unit.trim().is_empty())
            .map(|u| UnitDetail::new(u.unit.trim(), u.pinyin.trim(), u.english.trim()))
            .collect(),
        literal_gloss: non_empty(raw.literal_gloss),
        tip: non_empty(raw.sing_along_tip),
    })
}
