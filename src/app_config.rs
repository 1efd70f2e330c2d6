use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::enhancement::OutputMode;

/// Application configuration module
/// This module handles loading, validating and saving the settings for
/// transcription, enhancement and timeline validation.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Speech recognition settings
    #[serde(default)]
    pub transcription: TranscriptionConfig,

    /// Pinyin/translation enhancement settings
    #[serde(default)]
    pub enhancement: EnhancementConfig,

    /// Timeline validation thresholds
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Speech recognition backend
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum AsrBackend {
    // @backend: stable-ts (whisper with timestamp refinement)
    #[default]
    StableTs,
    // @backend: openai-whisper CLI
    Whisper,
}

impl AsrBackend {
    // @returns: Executable name used when no override is configured
    pub fn default_command(&self) -> &'static str {
        match self {
            Self::StableTs => "stable-ts",
            Self::Whisper => "whisper",
        }
    }
}

impl std::fmt::Display for AsrBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.default_command())
    }
}

/// Whisper model size
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
pub enum ModelSize {
    #[serde(rename = "tiny")]
    Tiny,
    #[serde(rename = "base")]
    Base,
    #[serde(rename = "small")]
    Small,
    #[serde(rename = "medium")]
    Medium,
    #[default]
    #[serde(rename = "large-v3")]
    LargeV3,
}

impl ModelSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tiny => "tiny",
            Self::Base => "base",
            Self::Small => "small",
            Self::Medium => "medium",
            Self::LargeV3 => "large-v3",
        }
    }
}

impl std::fmt::Display for ModelSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ModelSize {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "tiny" => Ok(Self::Tiny),
            "base" => Ok(Self::Base),
            "small" => Ok(Self::Small),
            "medium" => Ok(Self::Medium),
            "large-v3" | "large" => Ok(Self::LargeV3),
            _ => Err(anyhow!("Invalid model size: {}", s)),
        }
    }
}

/// Language model provider type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    // @provider: Ollama
    #[default]
    Ollama,
}

impl LlmProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Ollama => "Ollama",
        }
    }
}

/// Speech recognition configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranscriptionConfig {
    /// Recognizer implementation to drive
    #[serde(default)]
    pub backend: AsrBackend,

    /// Override for the recognizer executable
    #[serde(default)]
    pub command: Option<String>,

    /// Model size
    #[serde(default)]
    pub model: ModelSize,

    /// Language hint (ISO 639 code)
    #[serde(default = "default_language")]
    pub language: String,

    /// Voice activity detection (helps with music)
    #[serde(default = "default_true")]
    pub vad: bool,

    /// Beam width, also used as best-of
    #[serde(default = "default_beam_size")]
    pub beam_size: u32,

    /// Tighten timestamps after recognition
    #[serde(default = "default_true")]
    pub refine_timestamps: bool,

    /// Keep word-level timing for karaoke output
    #[serde(default = "default_true")]
    pub word_level: bool,

    /// Maximum seconds the recognizer may run
    #[serde(default = "default_transcription_timeout_secs")]
    pub timeout_secs: u64,
}

impl TranscriptionConfig {
    // @returns: Executable to launch
    pub fn command(&self) -> String {
        self.command
            .clone()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| self.backend.default_command().to_string())
    }
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            backend: AsrBackend::default(),
            command: None,
            model: ModelSize::default(),
            language: default_language(),
            vad: true,
            beam_size: default_beam_size(),
            refine_timestamps: true,
            word_level: true,
            timeout_secs: default_transcription_timeout_secs(),
        }
    }
}

/// Enhancement service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EnhancementConfig {
    /// Language model provider
    #[serde(default)]
    pub provider: LlmProvider,

    /// Service endpoint URL
    #[serde(default = "default_ollama_endpoint")]
    pub endpoint: String,

    /// Model name
    #[serde(default = "default_llm_model")]
    pub model: String,

    /// Output layout
    #[serde(default)]
    pub output_mode: OutputMode,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retry count for failed requests
    #[serde(default = "default_retry_count")]
    pub max_retries: u32,

    /// Backoff multiplier for retries (in milliseconds)
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    /// Maximum number of concurrent requests
    #[serde(default = "default_concurrent_requests")]
    pub concurrent_requests: usize,

    /// Temperature parameter for text generation (0.0 to 1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Verify the service and model before enhancing
    #[serde(default = "default_true")]
    pub check_connection: bool,
}

impl Default for EnhancementConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::default(),
            endpoint: default_ollama_endpoint(),
            model: default_llm_model(),
            output_mode: OutputMode::default(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_retry_count(),
            retry_backoff_ms: default_retry_backoff_ms(),
            concurrent_requests: default_concurrent_requests(),
            temperature: default_temperature(),
            check_connection: true,
        }
    }
}

/// Timeline validation thresholds
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ValidationConfig {
    /// Entries shorter than this may flash on screen
    #[serde(default = "default_min_duration_secs")]
    pub min_duration_secs: f64,

    /// Entries longer than this may look stuck
    #[serde(default = "default_max_duration_secs")]
    pub max_duration_secs: f64,

    /// Silence between adjacent entries worth reporting
    #[serde(default = "default_max_gap_secs")]
    pub max_gap_secs: f64,

    /// Number of example pairs kept per issue
    #[serde(default = "default_example_limit")]
    pub example_limit: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_duration_secs: default_min_duration_secs(),
            max_duration_secs: default_max_duration_secs(),
            max_gap_secs: default_max_gap_secs(),
            example_limit: default_example_limit(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<&LogLevel> for log::LevelFilter {
    fn from(level: &LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_language() -> String {
    "zh".to_string()
}

fn default_beam_size() -> u32 {
    5
}

fn default_transcription_timeout_secs() -> u64 {
    3600
}

fn default_concurrent_requests() -> usize {
    4
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_retry_count() -> u32 {
    2
}

fn default_retry_backoff_ms() -> u64 {
    1000 // doubled on each retry
}

fn default_temperature() -> f32 {
    0.3
}

fn default_true() -> bool {
    true
}

fn default_ollama_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_llm_model() -> String {
    "qwen3:4b".to_string()
}

fn default_min_duration_secs() -> f64 {
    0.1
}

fn default_max_duration_secs() -> f64 {
    10.0
}

fn default_max_gap_secs() -> f64 {
    2.0
}

fn default_example_limit() -> usize {
    3
}

impl Config {
    /// Load a configuration file, writing the defaults first when it is missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            Ok(config)
        } else {
            warn!("Config file not found at '{}', creating default config.", path.display());
            let config = Config::default();
            config.save(path)?;
            Ok(config)
        }
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))?;
        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        crate::language_utils::validate_language_code(&self.transcription.language)
            .context("Invalid transcription language")?;

        if self.transcription.beam_size == 0 {
            return Err(anyhow!("Beam size must be at least 1"));
        }

        url::Url::parse(&self.enhancement.endpoint)
            .with_context(|| format!("Invalid enhancement endpoint: {}", self.enhancement.endpoint))?;

        if self.enhancement.model.trim().is_empty() {
            return Err(anyhow!("Enhancement model name must not be empty"));
        }

        if self.enhancement.concurrent_requests == 0 {
            return Err(anyhow!("concurrent_requests must be at least 1"));
        }

        if !(0.0..=2.0).contains(&self.enhancement.temperature) {
            return Err(anyhow!("Temperature must be between 0.0 and 2.0"));
        }

        let v = &self.validation;
        if v.min_duration_secs <= 0.0 || v.max_duration_secs <= 0.0 || v.max_gap_secs <= 0.0 {
            return Err(anyhow!("Validation thresholds must be positive"));
        }
        if v.min_duration_secs >= v.max_duration_secs {
            return Err(anyhow!(
                "min_duration_secs ({}) must be below max_duration_secs ({})",
                v.min_duration_secs,
                v.max_duration_secs
            ));
        }

        Ok(())
    }
}
