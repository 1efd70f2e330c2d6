/*!
 * Common test utilities for the baobao test suite
 */

use anyhow::Result;
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use baobao::errors::TranscriptionError;
use baobao::transcription::{Segment, Token, Transcriber};

/// Route library logs through env_logger while tests run
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Three-line chorus used across the workflow tests
pub const CHORUS_SRT: &str = "1
00:00:04,970 --> 00:00:08,760
你是我的陽光

2
00:00:09,000 --> 00:00:11,500
我愛你

3
00:00:12,000 --> 00:00:15,000
你是我的陽光
";

/// Creates the chorus subtitle file in the given directory
pub fn create_test_subtitle(dir: &Path, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, CHORUS_SRT)
}

/// Creates an empty stand-in audio file
pub fn create_test_audio(dir: &Path, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, "")
}

/// Recognizer that replays fixed segments instead of running whisper
#[derive(Debug, Default)]
pub struct ScriptedTranscriber {
    pub fail: bool,
}

impl ScriptedTranscriber {
    pub fn failing() -> Self {
        Self { fail: true }
    }

    pub fn segments() -> Vec<Segment> {
        vec![
            Segment::with_tokens(
                4.97,
                8.76,
                "你是我的陽光",
                vec![
                    Token::new(4.97, 5.6, "你"),
                    Token::new(5.6, 6.2, "是"),
                    Token::new(6.2, 7.1, "我的"),
                    Token::new(7.1, 8.76, "陽光"),
                ],
            ),
            Segment::new(9.0, 11.5, "我愛你"),
        ]
    }
}

#[async_trait]
impl Transcriber for ScriptedTranscriber {
    async fn transcribe(&self, audio: &Path, _language: &str) -> Result<Vec<Segment>, TranscriptionError> {
        if self.fail {
            return Err(TranscriptionError::CommandFailed(format!("scripted failure for {}", audio.display())));
        }
        Ok(Self::segments())
    }
}
