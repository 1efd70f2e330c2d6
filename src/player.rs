/*!
 * Playback of a song with its subtitles through `mpv`.
 */

use anyhow::{Context, Result, anyhow};
use log::{debug, info};
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// Subtitle suffixes tried next to the audio file, most enhanced first
pub const SUBTITLE_CANDIDATES: &[&str] = &[
    ".enhanced.srt",
    ".learn.srt",
    ".emoji.srt",
    ".srt",
    ".lrc",
    ".ttml",
    ".test.enhanced.srt",
    ".test.srt",
];

const PLAYER_BINARY: &str = "mpv";

/// External media player
#[derive(Debug, Clone)]
pub struct Player {
    binary: String,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(PLAYER_BINARY)
    }
}

impl Player {
    pub fn new(binary: impl Into<String>) -> Self {
        Self { binary: binary.into() }
    }

    /// First existing subtitle file next to `audio`, in candidate order
    pub fn find_subtitle(audio: &Path) -> Option<PathBuf> {
        let stem = audio.file_stem()?.to_string_lossy().into_owned();
        SUBTITLE_CANDIDATES
            .iter()
            .map(|suffix| audio.with_file_name(format!("{}{}", stem, suffix)))
            .find(|candidate| candidate.is_file())
    }

    /// Arguments passed to the player
    pub fn build_args(audio: &Path, subtitle: &Path) -> Vec<String> {
        vec![
            format!("--sub-file={}", subtitle.display()),
            audio.display().to_string(),
        ]
    }

    /// Play `audio`, with `subtitle` or the auto-detected one.
    ///
    /// Returns the subtitle file that was shown.
    pub async fn play(&self, audio: &Path, subtitle: Option<&Path>) -> Result<PathBuf> {
        if !audio.is_file() {
            return Err(anyhow!("Audio file not found: {:?}", audio));
        }

        let subtitle = match subtitle {
            Some(path) if path.is_file() => path.to_path_buf(),
            Some(path) => return Err(anyhow!("Subtitle file not found: {:?}", path)),
            None => Self::find_subtitle(audio).ok_or_else(|| {
                anyhow!(
                    "No subtitle found next to {:?} (looked for {})",
                    audio,
                    SUBTITLE_CANDIDATES.join(", ")
                )
            })?,
        };

        let binary = which::which(&self.binary)
            .with_context(|| format!("{} not found on PATH, install it to preview subtitles", self.binary))?;
        debug!("Using player at {:?}", binary);
        info!("Playing {:?} with {:?}", audio, subtitle);

        let status = Command::new(binary)
            .args(Self::build_args(audio, &subtitle))
            .status()
            .await
            .with_context(|| format!("Failed to start {}", self.binary))?;

        if !status.success() {
            return Err(anyhow!("{} exited with {}", self.binary, status));
        }
        Ok(subtitle)
    }
}
