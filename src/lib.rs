/*!
 * # baobao - Chinese song subtitles for language learners
 *
 * Turns Chinese song audio into time-synced subtitles and enriches them with
 * pinyin and translations.
 *
 * ## Features
 *
 * - Transcription through an external whisper recognizer (stable-ts or openai-whisper)
 * - SRT and LRC output, with optional karaoke word highlighting
 * - Pinyin and translation lines from a local Ollama model, in full, emoji or learn layout
 * - Timeline validation: overlaps, ordering, durations, gaps and word coverage
 * - Playback with subtitles through mpv
 *
 * ## Architecture
 *
 * - `timecode`: SRT and LRC timestamp codec
 * - `highlight`: the single place that reads and writes highlight markup
 * - `subtitle_processor`: subtitle entries, SRT parsing and serialization
 * - `transcription`: segments, the recognizer seam and subtitle synthesis
 * - `validation`: timeline checks and the validation report
 * - `enhancement`: phrase interpretation, caching and the merge layer
 * - `providers`: language model clients (`ollama`, `mock`)
 * - `app_config`, `app_controller`, `file_utils`, `language_utils`, `player`, `errors`
 */

#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

pub mod app_config;
pub mod app_controller;
pub mod enhancement;
pub mod errors;
pub mod file_utils;
pub mod highlight;
pub mod language_utils;
pub mod player;
pub mod providers;
pub mod subtitle_processor;
pub mod timecode;
pub mod transcription;
pub mod validation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, SubtitleFormat, TranscribeOptions};
pub use enhancement::{EnhancementMerger, Interpretation, OutputMode};
pub use errors::{AppError, ProviderError, SubtitleError, TranscriptionError};
pub use subtitle_processor::{SubtitleCollection, SubtitleEntry};
pub use transcription::{Segment, SubtitleSynthesizer, SynthesisMode, Token};
pub use validation::{TimelineValidator, ValidationReport};
