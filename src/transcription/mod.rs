/*!
 * Audio to subtitle entries.
 *
 * - `segment`: timed segments and tokens returned by the recognizer
 * - `synthesizer`: segment to subtitle entry rendering (plain or karaoke)
 * - `whisper`: the `Transcriber` trait and the external whisper backend
 */

pub mod segment;
pub mod synthesizer;
pub mod whisper;

pub use segment::{Segment, Token};
pub use synthesizer::{SubtitleSynthesizer, SynthesisMode};
pub use whisper::{Transcriber, WhisperCli, parse_whisper_json};

use std::path::Path;

use crate::errors::TranscriptionError;
use crate::subtitle_processor::SubtitleEntry;

/// Recognize, refine, then render `audio` as subtitle entries
pub async fn transcribe_to_entries<T: Transcriber + ?Sized>(
    transcriber: &T,
    audio: &Path,
    language: &str,
    mode: SynthesisMode,
) -> Result<Vec<SubtitleEntry>, TranscriptionError> {
    let segments = transcriber.transcribe(audio, language).await?;
    let segments = transcriber.refine(audio, segments).await?;
    Ok(SubtitleSynthesizer::new(mode).synthesize(&segments))
}
