use anyhow::{Context, Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use crate::app_config::Config;
use crate::enhancement::{EnhancementMerger, Interpreter, LlmInterpreter, derive_output_path};
use crate::errors::TranscriptionError;
use crate::file_utils::FileManager;
use crate::player::Player;
use crate::providers::ollama::Ollama;
use crate::subtitle_processor::SubtitleCollection;
use crate::transcription::{SynthesisMode, Transcriber, WhisperCli, transcribe_to_entries};
use crate::validation::{TimelineValidator, ValidationReport};

// @module: Application controller for the transcription, enhancement and validation workflows

/// On-disk subtitle format of a transcription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubtitleFormat {
    #[default]
    Srt,
    Lrc,
}

impl SubtitleFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Srt => "srt",
            Self::Lrc => "lrc",
        }
    }
}

/// Options of a single transcription
#[derive(Debug, Clone, Default)]
pub struct TranscribeOptions {
    // @field: Output path, defaults to the audio path with the format's extension
    pub output: Option<PathBuf>,
    pub format: SubtitleFormat,
    // @field: One entry per word with the word highlighted (SRT only)
    pub karaoke: bool,
}

/// Outcome of a batch transcription
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchSummary {
    pub succeeded: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }
}

fn progress_style(unit: &str) -> ProgressStyle {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{spinner:.green}} [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} {} ({{percent}}%) {{msg}}",
            unit
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓▒░")
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a controller with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Invalid configuration")?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Recognizer described by the configuration
    pub fn transcriber(&self) -> WhisperCli {
        WhisperCli::new(self.config.transcription.clone())
    }

    /// Transcribe `audio` with the configured recognizer
    pub async fn transcribe(&self, audio: &Path, options: &TranscribeOptions) -> Result<PathBuf> {
        let transcriber = self.transcriber();
        if !transcriber.is_available().await {
            warn!(
                "{} did not answer --help, is it installed?",
                transcriber.config().command()
            );
        }
        self.transcribe_with(&transcriber, audio, options).await
    }

    /// Transcribe `audio` with `transcriber` and write the subtitle file
    pub async fn transcribe_with<T: Transcriber + ?Sized>(
        &self,
        transcriber: &T,
        audio: &Path,
        options: &TranscribeOptions,
    ) -> Result<PathBuf> {
        if !audio.is_file() {
            return Err(TranscriptionError::MissingInput(audio.to_path_buf()).into());
        }

        let mode = match (options.karaoke, options.format) {
            (true, SubtitleFormat::Srt) => SynthesisMode::WordHighlight,
            (true, SubtitleFormat::Lrc) => {
                warn!("Karaoke highlighting applies to SRT only, writing plain LRC");
                SynthesisMode::Simple
            }
            (false, _) => SynthesisMode::Simple,
        };

        let start_time = Instant::now();
        let entries = transcribe_to_entries(transcriber, audio, &self.config.transcription.language, mode).await?;
        let collection = SubtitleCollection::from_entries(audio.to_path_buf(), entries);

        let output = options
            .output
            .clone()
            .unwrap_or_else(|| FileManager::transcript_path(audio, options.format.extension()));
        match options.format {
            SubtitleFormat::Srt => collection.write_to_srt(&output)?,
            SubtitleFormat::Lrc => collection.write_to_lrc(&output)?,
        }

        info!(
            "Wrote {} entries to {} in {:.1}s",
            collection.entries.len(),
            output.display(),
            start_time.elapsed().as_secs_f64()
        );
        Ok(output)
    }

    /// Transcribe every file in `dir` matching `pattern` with the configured recognizer
    pub async fn batch(&self, dir: &Path, pattern: &str) -> Result<BatchSummary> {
        let transcriber = self.transcriber();
        self.batch_with(&transcriber, dir, pattern).await
    }

    /// Transcribe every matching file to SRT; one failure does not stop the batch
    pub async fn batch_with<T: Transcriber + ?Sized>(
        &self,
        transcriber: &T,
        dir: &Path,
        pattern: &str,
    ) -> Result<BatchSummary> {
        let files = FileManager::find_files_matching(dir, pattern)?;
        if files.is_empty() {
            return Err(anyhow!("No files matching '{}' in {}", pattern, dir.display()));
        }

        info!("Batch transcription of {} file(s), model {}", files.len(), self.config.transcription.model);
        let progress_bar = ProgressBar::new(files.len() as u64);
        progress_bar.set_style(progress_style("files"));

        let options = TranscribeOptions::default();
        let mut summary = BatchSummary::default();
        for audio in files {
            let name = audio.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
            progress_bar.set_message(name);

            match self.transcribe_with(transcriber, &audio, &options).await {
                Ok(_) => summary.succeeded.push(audio),
                Err(e) => {
                    error!("Failed: {}: {:#}", audio.display(), e);
                    summary.failed.push((audio, format!("{:#}", e)));
                }
            }
            progress_bar.inc(1);
        }
        progress_bar.finish_and_clear();

        info!(
            "Batch complete: {} success, {} failed",
            summary.succeeded.len(),
            summary.failed.len()
        );
        Ok(summary)
    }

    /// Enhance `srt` through the configured language model service
    pub async fn enhance(&self, srt: &Path, output: Option<PathBuf>) -> Result<PathBuf> {
        let cfg = &self.config.enhancement;
        info!(
            "Enhancing with {} ({}), {} mode",
            cfg.provider.display_name(),
            cfg.model,
            cfg.output_mode
        );
        let interpreter = LlmInterpreter::from_config(Ollama::from_config(cfg), cfg);
        self.enhance_with(Arc::new(interpreter), srt, output).await
    }

    /// Enhance `srt` with `interpreter` and write the result.
    ///
    /// An unreachable service or missing model stops the run before any
    /// entry is processed; later per-phrase failures only degrade lines.
    pub async fn enhance_with(
        &self,
        interpreter: Arc<dyn Interpreter>,
        srt: &Path,
        output: Option<PathBuf>,
    ) -> Result<PathBuf> {
        let cfg = &self.config.enhancement;
        let collection = SubtitleCollection::from_srt_file(srt)?;

        if cfg.check_connection {
            interpreter
                .check_ready()
                .await
                .context("Cannot use the language model service (is `ollama serve` running?)")?;
        }

        let merger = EnhancementMerger::new(interpreter, cfg.output_mode).with_concurrency(cfg.concurrent_requests);
        let progress_bar = ProgressBar::new(0);
        progress_bar.set_style(progress_style("phrases"));
        progress_bar.set_message("Interpreting");

        let pb = progress_bar.clone();
        let enhanced = merger
            .enhance(&collection.entries, move |done, total| {
                pb.set_length(total as u64);
                pb.set_position(done as u64);
            })
            .await;
        progress_bar.finish_and_clear();

        let output = output.unwrap_or_else(|| derive_output_path(srt, cfg.output_mode));
        SubtitleCollection::from_entries(srt.to_path_buf(), enhanced).write_to_srt(&output)?;
        info!("Wrote enhanced subtitles to {}", output.display());
        Ok(output)
    }

    /// Parse `srt` and validate its timeline
    pub fn validate(&self, srt: &Path, expected_words: Option<&[String]>) -> Result<ValidationReport> {
        let collection = SubtitleCollection::from_srt_file(srt)?;
        let validator = TimelineValidator::with_config(self.config.validation.clone());
        Ok(validator.validate(&collection.entries, expected_words))
    }

    /// Play `audio` with its subtitles in mpv
    pub async fn play(&self, audio: &Path, subtitle: Option<&Path>) -> Result<PathBuf> {
        Player::default().play(audio, subtitle).await
    }
}
