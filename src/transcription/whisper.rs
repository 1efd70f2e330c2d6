/*!
 * Speech recognition through an external whisper executable.
 *
 * Both stable-ts and openai-whisper can write a JSON document of the shape
 * `{"segments": [{"start", "end", "text", "words": [{"word", "start", "end"}]}]}`,
 * which is what this backend reads back.
 */

use async_trait::async_trait;
use log::{debug, error, info, warn};
use serde::Deserialize;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;

use crate::app_config::{AsrBackend, TranscriptionConfig};
use crate::errors::TranscriptionError;
use crate::language_utils;
use crate::transcription::segment::{Segment, Token};

/// A speech recognizer that turns audio into timed segments
#[async_trait]
pub trait Transcriber: Send + Sync + Debug {
    /// Recognize `audio` using `language` as a hint
    async fn transcribe(&self, audio: &Path, language: &str) -> Result<Vec<Segment>, TranscriptionError>;

    /// Tighten segment timing.
    ///
    /// Must not change the number or order of segments.
    async fn refine(&self, _audio: &Path, segments: Vec<Segment>) -> Result<Vec<Segment>, TranscriptionError> {
        Ok(segments)
    }
}

#[derive(Debug, Deserialize)]
struct WhisperDocument {
    #[serde(default)]
    segments: Vec<WhisperSegment>,
}

#[derive(Debug, Deserialize)]
struct WhisperSegment {
    start: f64,
    end: f64,
    #[serde(default)]
    text: String,
    #[serde(default)]
    words: Option<Vec<WhisperWord>>,
}

#[derive(Debug, Deserialize)]
struct WhisperWord {
    word: String,
    start: f64,
    end: f64,
}

/// Parse recognizer JSON output into segments.
///
/// Segment text is trimmed. Word timing is kept only when `word_level` is set.
pub fn parse_whisper_json(content: &str, word_level: bool) -> Result<Vec<Segment>, TranscriptionError> {
    let document: WhisperDocument = serde_json::from_str(content)
        .map_err(|e| TranscriptionError::ParseError(e.to_string()))?;

    Ok(document
        .segments
        .into_iter()
        .map(|seg| {
            let tokens = if word_level {
                seg.words
                    .filter(|words| !words.is_empty())
                    .map(|words| words.into_iter().map(|w| Token::new(w.start, w.end, w.word)).collect())
            } else {
                None
            };
            Segment {
                start: seg.start,
                end: seg.end,
                text: seg.text.trim().to_string(),
                tokens,
            }
        })
        .collect())
}

/// Recognizer driven as a child process
#[derive(Debug, Clone)]
pub struct WhisperCli {
    config: TranscriptionConfig,
}

impl WhisperCli {
    pub fn new(config: TranscriptionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TranscriptionConfig {
        &self.config
    }

    /// Check whether the configured executable can be launched
    pub async fn is_available(&self) -> bool {
        Command::new(self.config.command())
            .arg("--help")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|status| status.success())
            .unwrap_or(false)
    }

    /// Command-line arguments for one run
    pub fn build_args(&self, audio: &Path, language: &str, output_dir: &Path) -> Vec<String> {
        let cfg = &self.config;
        let audio = audio.to_string_lossy().to_string();
        let beam = cfg.beam_size.to_string();
        let mut args = vec![audio.clone()];

        match cfg.backend {
            AsrBackend::StableTs => {
                let stem = Path::new(&audio)
                    .file_stem()
                    .map(|s| s.to_string_lossy().to_string())
                    .unwrap_or_else(|| "transcript".to_string());
                let output = output_dir.join(format!("{}.json", stem));
                args.extend([
                    "--model".to_string(),
                    cfg.model.to_string(),
                    "--language".to_string(),
                    language.to_string(),
                    "--output".to_string(),
                    output.to_string_lossy().to_string(),
                    "--beam_size".to_string(),
                    beam.clone(),
                    "--best_of".to_string(),
                    beam,
                    "--vad".to_string(),
                    if cfg.vad { "True" } else { "False" }.to_string(),
                    "--word_level".to_string(),
                    if cfg.word_level { "True" } else { "False" }.to_string(),
                    "--overwrite".to_string(),
                ]);
                if cfg.refine_timestamps {
                    args.push("--refine".to_string());
                }
            }
            AsrBackend::Whisper => {
                args.extend([
                    "--model".to_string(),
                    cfg.model.to_string(),
                    "--language".to_string(),
                    language.to_string(),
                    "--output_dir".to_string(),
                    output_dir.to_string_lossy().to_string(),
                    "--output_format".to_string(),
                    "json".to_string(),
                    "--beam_size".to_string(),
                    beam.clone(),
                    "--best_of".to_string(),
                    beam,
                    "--condition_on_previous_text".to_string(),
                    "True".to_string(),
                    "--word_timestamps".to_string(),
                    if cfg.word_level { "True" } else { "False" }.to_string(),
                    "--verbose".to_string(),
                    "False".to_string(),
                ]);
            }
        }

        args
    }

    async fn run(&self, args: &[String]) -> Result<(), TranscriptionError> {
        let command_name = self.config.command();
        let mut cmd = Command::new(&command_name);
        cmd.args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        debug!("Executing command: {} {}", command_name, args.join(" "));

        let child = cmd.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TranscriptionError::BackendUnavailable(format!("'{}' not found on PATH", command_name))
            } else {
                TranscriptionError::Io(e)
            }
        })?;

        let started = Instant::now();
        let limit = Duration::from_secs(self.config.timeout_secs);
        let output = match tokio::time::timeout(limit, child.wait_with_output()).await {
            Ok(result) => result?,
            Err(_) => {
                error!("{} timed out after {}s", command_name, self.config.timeout_secs);
                return Err(TranscriptionError::Timeout(self.config.timeout_secs));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let tail: Vec<&str> = stderr.lines().filter(|l| !l.trim().is_empty()).collect();
            let tail = tail[tail.len().saturating_sub(5)..].join("\n");
            error!("{} exited with {}", command_name, output.status);
            return Err(TranscriptionError::CommandFailed(format!(
                "{} exited with {}: {}",
                command_name, output.status, tail
            )));
        }

        info!("Recognizer finished in {:.1}s", started.elapsed().as_secs_f64());
        Ok(())
    }

    fn find_json_output(dir: &Path) -> Result<PathBuf, TranscriptionError> {
        let mut found: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json")))
            .collect();
        found.sort();

        found.into_iter().next().ok_or_else(|| {
            TranscriptionError::ParseError(format!("no JSON output written to {}", dir.display()))
        })
    }
}

#[async_trait]
impl Transcriber for WhisperCli {
    async fn transcribe(&self, audio: &Path, language: &str) -> Result<Vec<Segment>, TranscriptionError> {
        if !audio.exists() {
            return Err(TranscriptionError::MissingInput(audio.to_path_buf()));
        }

        let language = language_utils::normalize_for_recognizer(language).unwrap_or_else(|e| {
            warn!("{}, passing language hint through unchanged", e);
            language.to_string()
        });

        info!(
            "Transcribing {} with {} ({} model, language {})",
            audio.display(),
            self.config.command(),
            self.config.model,
            language
        );

        let work_dir = tempfile::tempdir()?;
        let args = self.build_args(audio, &language, work_dir.path());
        self.run(&args).await?;

        let json_path = Self::find_json_output(work_dir.path())?;
        let content = tokio::fs::read_to_string(&json_path).await?;
        let segments = parse_whisper_json(&content, self.config.word_level)?;

        let stray: usize = segments.iter().map(|s| s.stray_token_count()).sum();
        if stray > 0 {
            debug!("{} token(s) fall outside their segment range", stray);
        }
        info!("Found {} segments", segments.len());

        Ok(segments)
    }
}
