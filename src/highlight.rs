/*!
 * Karaoke highlight markup.
 *
 * Highlighted text uses the player-compatible `<font color="#00ff00">...</font>`
 * tag. Only the first occurrence of a surface form within a line is wrapped.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Colour used for the active word
pub const HIGHLIGHT_COLOR: &str = "#00ff00";

static TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

static HIGHLIGHT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<font[^>]*>([^<]+)</font>").unwrap());

/// Wrap a string in the highlight tag
pub fn wrap(text: &str) -> String {
    format!("<font color=\"{}\">{}</font>", HIGHLIGHT_COLOR, text)
}

/// Wrap the first occurrence of `surface` in `text`.
///
/// Returns the text unchanged if `surface` is empty or absent.
pub fn wrap_first(text: &str, surface: &str) -> String {
    if surface.is_empty() || !text.contains(surface) {
        return text.to_string();
    }
    text.replacen(surface, &wrap(surface), 1)
}

/// Remove every markup tag from a line
pub fn strip_tags(text: &str) -> String {
    TAG_REGEX.replace_all(text, "").into_owned()
}

/// Return the content of the first highlight tag, if any
pub fn extract_highlight(text: &str) -> Option<String> {
    HIGHLIGHT_REGEX
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Whether the line carries any markup
pub fn has_markup(text: &str) -> bool {
    TAG_REGEX.is_match(text)
}
