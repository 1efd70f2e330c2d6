/*!
 * Timestamp codec for the two subtitle formats.
 *
 * - Block (SRT) timestamps: `HH:MM:SS,mmm`
 * - Line (LRC) timestamps: `[MM:SS.ss]`
 *
 * All times are non-negative seconds stored as `f64`.
 */

use crate::errors::SubtitleError;

/// Convert seconds to whole milliseconds, truncating.
///
/// The tiny bias keeps values such as `4.97` from landing on `4969` because of
/// binary floating point representation.
fn truncate_to_millis(seconds: f64) -> u64 {
    if !seconds.is_finite() || seconds <= 0.0 {
        return 0;
    }
    (seconds * 1000.0 + 1e-6).floor() as u64
}

/// Format seconds as an SRT timestamp (HH:MM:SS,mmm)
pub fn encode_block_timestamp(seconds: f64) -> String {
    let ms = truncate_to_millis(seconds);
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let secs = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis)
}

/// Format seconds as an LRC timestamp (`[MM:SS.ss]`)
pub fn encode_line_timestamp(seconds: f64) -> String {
    let seconds = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
    let minutes = (seconds / 60.0).floor() as u64;
    let secs = seconds % 60.0;

    format!("[{:02}:{:05.2}]", minutes, secs)
}

/// Parse an SRT timestamp into seconds.
///
/// Accepts either `,` or `.` before the milliseconds.
pub fn decode_block_timestamp(timestamp: &str) -> Result<f64, SubtitleError> {
    let normalized = timestamp.trim().replace(',', ".");
    let parts: Vec<&str> = normalized.split(':').collect();

    if parts.len() < 3 {
        return Err(SubtitleError::MalformedTimestamp(timestamp.to_string()));
    }

    let malformed = || SubtitleError::MalformedTimestamp(timestamp.to_string());
    let hours: u64 = parts[0].trim().parse().map_err(|_| malformed())?;
    let minutes: u64 = parts[1].trim().parse().map_err(|_| malformed())?;
    let secs: f64 = parts[2].trim().parse().map_err(|_| malformed())?;

    if !secs.is_finite() || secs < 0.0 {
        return Err(malformed());
    }

    let whole = hours
        .checked_mul(3600)
        .zip(minutes.checked_mul(60))
        .and_then(|(h, m)| h.checked_add(m))
        .ok_or_else(malformed)?;

    Ok(whole as f64 + secs)
}
