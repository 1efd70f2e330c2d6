use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for the recognizer language hint
///
/// Recognizers accept ISO 639-1 codes (`zh`, `en`), while users often type
/// ISO 639-2 codes (`zho`, `chi`). These helpers validate and normalize both.
/// Kind of code that was recognized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageCodeType {
    /// ISO 639-1 (2-letter) code
    Part1,
    /// ISO 639-2/T (3-letter) code
    Part2T,
    /// ISO 639-2/B (3-letter) code
    Part2B,
}

/// Bibliographic ISO 639-2/B codes that differ from their terminology form
const PART2B_TO_PART2T: &[(&str, &str)] = &[
    ("chi", "zho"),
    ("fre", "fra"),
    ("ger", "deu"),
    ("dut", "nld"),
    ("gre", "ell"),
    ("cze", "ces"),
    ("ice", "isl"),
    ("alb", "sqi"),
    ("arm", "hye"),
    ("baq", "eus"),
    ("bur", "mya"),
    ("per", "fas"),
    ("geo", "kat"),
    ("may", "msa"),
    ("mac", "mkd"),
    ("rum", "ron"),
    ("slo", "slk"),
    ("wel", "cym"),
    ("tib", "bod"),
];

fn part2b_to_part2t(code: &str) -> Option<&'static str> {
    PART2B_TO_PART2T
        .iter()
        .find(|(b, _)| *b == code)
        .map(|(_, t)| *t)
}

fn lookup(code: &str) -> Option<(Language, LanguageCodeType)> {
    let normalized_code = code.trim().to_lowercase();

    match normalized_code.len() {
        2 => Language::from_639_1(&normalized_code).map(|l| (l, LanguageCodeType::Part1)),
        3 => {
            if let Some(lang) = Language::from_639_3(&normalized_code) {
                return Some((lang, LanguageCodeType::Part2T));
            }
            part2b_to_part2t(&normalized_code)
                .and_then(Language::from_639_3)
                .map(|l| (l, LanguageCodeType::Part2B))
        }
        _ => None,
    }
}

/// Validate if a language code is a valid ISO 639-1 or ISO 639-2 code
pub fn validate_language_code(code: &str) -> Result<LanguageCodeType> {
    lookup(code)
        .map(|(_, kind)| kind)
        .ok_or_else(|| anyhow!("Invalid language code: {}", code))
}

/// Normalize a language code to the form recognizers expect.
///
/// Returns the ISO 639-1 code when one exists, the ISO 639-3 code otherwise.
pub fn normalize_for_recognizer(code: &str) -> Result<String> {
    let (lang, _) = lookup(code).ok_or_else(|| anyhow!("Cannot normalize invalid language code: {}", code))?;

    Ok(match lang.to_639_1() {
        Some(part1) => part1.to_string(),
        None => lang.to_639_3().to_string(),
    })
}

/// Check if two language codes represent the same language
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    match (lookup(code1), lookup(code2)) {
        (Some((a, _)), Some((b, _))) => a == b,
        _ => false,
    }
}

/// Get the English language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    let (lang, _) = lookup(code).ok_or_else(|| anyhow!("Failed to get language from code: {}", code))?;
    Ok(lang.to_name().to_string())
}
