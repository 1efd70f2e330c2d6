#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, error, info};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use baobao::app_config::{self, Config, ModelSize};
use baobao::app_controller::{Controller, SubtitleFormat, TranscribeOptions};
use baobao::enhancement::OutputMode;
use baobao::file_utils::FileManager;

/// CLI wrapper for ModelSize to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliModelSize {
    Tiny,
    Base,
    Small,
    Medium,
    #[value(name = "large-v3", alias = "large")]
    LargeV3,
}

impl From<CliModelSize> for ModelSize {
    fn from(cli_model: CliModelSize) -> Self {
        match cli_model {
            CliModelSize::Tiny => ModelSize::Tiny,
            CliModelSize::Base => ModelSize::Base,
            CliModelSize::Small => ModelSize::Small,
            CliModelSize::Medium => ModelSize::Medium,
            CliModelSize::LargeV3 => ModelSize::LargeV3,
        }
    }
}

/// CLI wrapper for SubtitleFormat to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliSubtitleFormat {
    Srt,
    Lrc,
}

impl From<CliSubtitleFormat> for SubtitleFormat {
    fn from(cli_format: CliSubtitleFormat) -> Self {
        match cli_format {
            CliSubtitleFormat::Srt => SubtitleFormat::Srt,
            CliSubtitleFormat::Lrc => SubtitleFormat::Lrc,
        }
    }
}

/// CLI wrapper for OutputMode to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputMode {
    Full,
    Emoji,
    Learn,
}

impl From<CliOutputMode> for OutputMode {
    fn from(cli_mode: CliOutputMode) -> Self {
        match cli_mode {
            CliOutputMode::Full => OutputMode::Full,
            CliOutputMode::Emoji => OutputMode::Emoji,
            CliOutputMode::Learn => OutputMode::Learn,
        }
    }
}

/// CLI wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Args, Debug)]
struct TranscribeArgs {
    /// Audio file to transcribe (mp3, wav, ...)
    #[arg(value_name = "AUDIO")]
    audio: PathBuf,

    /// Output file path (default: same name with .srt or .lrc)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Whisper model size (larger = more accurate, slower)
    #[arg(short, long, value_enum)]
    model: Option<CliModelSize>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "srt")]
    format: CliSubtitleFormat,

    /// Word-by-word highlighting (karaoke style, SRT only)
    #[arg(short, long)]
    karaoke: bool,

    /// Language hint for the recognizer (ISO 639 code)
    #[arg(short, long)]
    language: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Transcribe Chinese audio to time-synced subtitles
    Transcribe(TranscribeArgs),

    /// Add pinyin and translations to an SRT file
    Enhance {
        /// SRT subtitle file to enhance
        #[arg(value_name = "SRT")]
        srt: PathBuf,

        /// Output file path (default: <name>.enhanced.srt, .emoji.srt or .learn.srt)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output layout
        #[arg(short, long, value_enum)]
        format: Option<CliOutputMode>,

        /// Ollama API URL
        #[arg(long)]
        ollama_url: Option<String>,

        /// Language model for translations (e.g. qwen3:4b)
        #[arg(long)]
        llm_model: Option<String>,
    },

    /// Transcribe every matching audio file in a directory to SRT
    Batch {
        /// Directory containing audio files
        #[arg(value_name = "DIR")]
        directory: PathBuf,

        /// File pattern to match
        #[arg(short, long, default_value = "*.mp3")]
        pattern: String,

        /// Whisper model size
        #[arg(short, long, value_enum)]
        model: Option<CliModelSize>,
    },

    /// Play audio with synced subtitles using mpv
    #[command(alias = "preview")]
    Play {
        /// Audio file to play
        #[arg(value_name = "AUDIO")]
        audio: PathBuf,

        /// Subtitle file (default: auto-detect next to the audio)
        #[arg(short, long)]
        subtitle: Option<PathBuf>,
    },

    /// Check an SRT file for timing problems
    Validate {
        /// SRT subtitle file to check
        #[arg(value_name = "SRT")]
        srt: PathBuf,

        /// Words the lyrics are expected to contain
        #[arg(long, num_args = 1..)]
        expected: Vec<String>,

        /// File with expected words, whitespace separated
        #[arg(long)]
        expected_file: Option<PathBuf>,
    },

    /// Generate shell completions for baobao
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// baobao - Chinese lyrics transcription for language learning
#[derive(Parser, Debug)]
#[command(name = "baobao")]
#[command(version)]
#[command(about = "🐼 Chinese lyrics transcription and learning tool")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "Create time-synced subtitles from Chinese audio with optional pinyin romanization and translations.

EXAMPLES:
    baobao song.mp3                          # Transcribe audio to SRT
    baobao transcribe song.mp3 -m base       # Faster, less accurate
    baobao transcribe song.mp3 --karaoke     # Word highlighting
    baobao enhance song.srt --format learn   # Pinyin-first learning layout
    baobao batch ./songs/ --pattern '*.wav'  # Transcribe a folder
    baobao play song.mp3                     # Preview with mpv
    baobao validate song.srt                 # Check the timeline

CONFIGURATION:
    Settings are read from baobao.json by default (see --config). A default
    file is written on first run.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Audio file to transcribe (shorthand for `baobao transcribe AUDIO`)
    #[arg(value_name = "AUDIO")]
    audio: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "baobao.json")]
    config: PathBuf,

    /// Set logging level
    #[arg(long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger { level: LevelFilter::Trace }))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour and emoji for a level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "❌"),
            Level::Warn => ("\x1B[1;33m", "🚧"),
            Level::Info => ("\x1B[1;32m", "🐼"),
            Level::Debug => ("\x1B[1;36m", "🔍"),
            Level::Trace => ("\x1B[1;35m", "📋"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (colour, emoji) = Self::style_for_level(record.level());
            let _ = writeln!(std::io::stderr(), "{}{} {} {}\x1B[0m", colour, now, emoji, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn load_config(options: &CommandLineOptions) -> Result<Config> {
    let mut config = Config::load_or_create(&options.config)?;
    if let Some(level) = &options.log_level {
        config.log_level = level.clone().into();
    }
    log::set_max_level(LevelFilter::from(&config.log_level));
    Ok(config)
}

#[tokio::main]
async fn main() -> ExitCode {
    if CustomLogger::init(LevelFilter::Info).is_err() {
        eprintln!("Failed to initialise logging");
    }

    let cli = CommandLineOptions::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(mut cli: CommandLineOptions) -> Result<ExitCode> {
    let command = match (cli.command.take(), cli.audio.take()) {
        (Some(Commands::Completions { shell }), _) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "baobao", &mut std::io::stdout());
            return Ok(ExitCode::SUCCESS);
        }
        (Some(command), _) => command,
        (None, Some(audio)) => Commands::Transcribe(TranscribeArgs {
            audio,
            output: None,
            model: None,
            format: CliSubtitleFormat::Srt,
            karaoke: false,
            language: None,
        }),
        (None, None) => {
            CommandLineOptions::command().print_help()?;
            return Ok(ExitCode::FAILURE);
        }
    };

    let mut config = load_config(&cli)?;

    match command {
        Commands::Transcribe(args) => {
            if let Some(model) = args.model {
                config.transcription.model = model.into();
            }
            if let Some(language) = args.language {
                config.transcription.language = language;
            }
            let controller = Controller::with_config(config)?;
            info!("Transcription with model {}", controller.config().transcription.model);

            let options = TranscribeOptions {
                output: args.output,
                format: args.format.into(),
                karaoke: args.karaoke,
            };
            let output = controller.transcribe(&args.audio, &options).await?;
            println!("✓ Done! Output: {}", output.display());
        }

        Commands::Enhance {
            srt,
            output,
            format,
            ollama_url,
            llm_model,
        } => {
            if let Some(mode) = format {
                config.enhancement.output_mode = mode.into();
            }
            if let Some(url) = ollama_url {
                config.enhancement.endpoint = url;
            }
            if let Some(model) = llm_model {
                config.enhancement.model = model;
            }
            let controller = Controller::with_config(config)?;
            let output = controller.enhance(&srt, output).await?;
            println!("✓ Done! Output: {}", output.display());
        }

        Commands::Batch {
            directory,
            pattern,
            model,
        } => {
            if let Some(model) = model {
                config.transcription.model = model.into();
            }
            let controller = Controller::with_config(config)?;
            let summary = controller.batch(&directory, &pattern).await?;
            for (file, reason) in &summary.failed {
                println!("✗ {}: {}", file.display(), reason);
            }
            println!(
                "Batch complete: {} success, {} failed",
                summary.succeeded.len(),
                summary.failed.len()
            );
        }

        Commands::Play { audio, subtitle } => {
            let controller = Controller::with_config(config)?;
            let shown = controller.play(&audio, subtitle.as_deref()).await?;
            info!("Finished playing with {}", shown.display());
        }

        Commands::Validate {
            srt,
            mut expected,
            expected_file,
        } => {
            if let Some(path) = expected_file {
                expected.extend(
                    FileManager::read_word_list(&path)
                        .with_context(|| format!("Failed to read expected words from {}", path.display()))?,
                );
            }
            let controller = Controller::with_config(config)?;
            let report = controller.validate(&srt, (!expected.is_empty()).then_some(expected.as_slice()))?;

            if report.entry_count == 0 {
                return Err(anyhow!("No subtitle entries found in {}", srt.display()));
            }
            println!("{}", report);
            if report.has_issues() {
                return Ok(ExitCode::FAILURE);
            }
        }

        Commands::Completions { .. } => unreachable!("completions are handled before loading the configuration"),
    }

    Ok(ExitCode::SUCCESS)
}
