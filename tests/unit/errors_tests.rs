/*!
 * Tests for error types and conversions
 */

use std::path::PathBuf;

use baobao::errors::{AppError, ProviderError, SubtitleError, TranscriptionError};
use baobao::timecode;

#[test]
fn test_providerError_modelNotFound_shouldListAvailableModels() {
    let error = ProviderError::ModelNotFound {
        model: "qwen3:4b".to_string(),
        available: "llama3:8b, mistral:7b".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("qwen3:4b"));
    assert!(display.contains("llama3:8b, mistral:7b"));
}

#[test]
fn test_subtitleError_fromBadTimestamp_shouldQuoteInput() {
    let error = timecode::decode_block_timestamp("00:xx:01,000").unwrap_err();

    assert_eq!(error, SubtitleError::MalformedTimestamp("00:xx:01,000".to_string()));
    assert!(error.to_string().contains("00:xx:01,000"));
}

#[test]
fn test_transcriptionError_timeout_shouldMentionSeconds() {
    let error = TranscriptionError::Timeout(3600);
    assert!(error.to_string().contains("3600 seconds"));
}

#[test]
fn test_appError_fromTypedErrors_shouldWrap() {
    let app: AppError = ProviderError::ConnectionError("refused".to_string()).into();
    assert!(matches!(app, AppError::Provider(_)));
    assert!(app.to_string().contains("refused"));

    let app: AppError = SubtitleError::MissingInput(PathBuf::from("song.srt")).into();
    assert!(matches!(app, AppError::Subtitle(_)));

    let app: AppError = TranscriptionError::MissingInput(PathBuf::from("song.mp3")).into();
    assert!(app.to_string().starts_with("Transcription error"));
}

#[test]
fn test_appError_fromAnyhowAndIo_shouldKeepMessage() {
    let app: AppError = anyhow::anyhow!("something odd").into();
    assert!(matches!(app, AppError::Unknown(ref m) if m == "something odd"));

    let app: AppError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
    assert!(matches!(app, AppError::File(ref m) if m.contains("gone")));
}
