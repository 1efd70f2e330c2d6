use anyhow::{Context, Result, anyhow};
use glob::Pattern;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// @module: File and directory utilities

/// Audio extensions accepted by the recognizer
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "m4a", "flac", "ogg", "opus", "aac", "webm", "mp4"];

/// Subtitle extensions produced or consumed by the tool
const SUBTITLE_EXTENSIONS: &[&str] = &["srt", "lrc", "ttml"];

// @enum: Broad file classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Audio,
    Subtitle,
    Unknown,
}

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path).with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    // @generates: Transcript path next to the audio file
    // @params: audio_file, extension without dot
    pub fn transcript_path<P: AsRef<Path>>(audio_file: P, extension: &str) -> PathBuf {
        audio_file.as_ref().with_extension(extension.trim_start_matches('.'))
    }

    /// Files directly inside `dir` whose name matches the glob `pattern`.
    ///
    /// Sub-directories are not searched. Results are sorted by path.
    pub fn find_files_matching<P: AsRef<Path>>(dir: P, pattern: &str) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(anyhow!("Not a directory: {:?}", dir));
        }
        let pattern = Pattern::new(pattern).with_context(|| format!("Invalid file pattern: {}", pattern))?;

        let mut result = Vec::new();
        for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            if entry.file_type().is_file() && pattern.matches(&entry.file_name().to_string_lossy()) {
                result.push(entry.into_path());
            }
        }

        result.sort();
        Ok(result)
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path).with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file, creating the parent directory
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content).with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))
    }

    /// Read a word list, one or more words per line, `#` starting a comment
    pub fn read_word_list<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
        let content = Self::read_to_string(path)?;
        Ok(content
            .lines()
            .map(|line| line.split('#').next().unwrap_or(""))
            .flat_map(str::split_whitespace)
            .map(str::to_string)
            .collect())
    }

    /// Classify a path by its extension
    pub fn detect_file_type<P: AsRef<Path>>(path: P) -> FileType {
        let Some(ext) = path.as_ref().extension() else {
            return FileType::Unknown;
        };
        let ext = ext.to_string_lossy().to_lowercase();

        if SUBTITLE_EXTENSIONS.contains(&ext.as_str()) {
            FileType::Subtitle
        } else if AUDIO_EXTENSIONS.contains(&ext.as_str()) {
            FileType::Audio
        } else {
            FileType::Unknown
        }
    }
}
