use std::fs;
use std::fs::File;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use anyhow::{Result, Context};
use log::{debug, warn};

use crate::errors::SubtitleError;
use crate::highlight;
use crate::timecode;

// @module: Subtitle entries, SRT serialization/parsing and LRC output

// @struct: Single subtitle entry
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleEntry {
    // @field: Sequence number (1-based)
    pub index: usize,

    // @field: Start time in seconds
    pub start: f64,

    // @field: End time in seconds
    pub end: f64,

    // @field: Raw text, may span several lines and carry highlight markup
    pub text: String,
}

impl SubtitleEntry {
    /// Creates a new subtitle entry
    pub fn new(index: usize, start: f64, end: f64, text: impl Into<String>) -> Self {
        SubtitleEntry {
            index,
            start,
            end,
            text: text.into(),
        }
    }

    /// Text with markup removed, as shown to matching and validation code
    pub fn plain_text(&self) -> String {
        highlight::strip_tags(&self.text).trim().to_string()
    }

    /// The literal run inside the first highlight tag, if any
    pub fn highlighted_unit(&self) -> Option<String> {
        highlight::extract_highlight(&self.text)
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Whether this entry shares any instant with `other`
    pub fn overlaps_with(&self, other: &SubtitleEntry) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Convert start time to formatted SRT timestamp
    pub fn format_start_time(&self) -> String {
        timecode::encode_block_timestamp(self.start)
    }

    /// Convert end time to formatted SRT timestamp
    pub fn format_end_time(&self) -> String {
        timecode::encode_block_timestamp(self.end)
    }

    /// Render as one LRC line; embedded line breaks are folded into spaces
    pub fn to_lrc_line(&self) -> String {
        let single_line = self.text.lines().map(str::trim).collect::<Vec<_>>().join(" ");
        format!("{}{}", timecode::encode_line_timestamp(self.start), single_line)
    }
}

impl fmt::Display for SubtitleEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.index)?;
        writeln!(f, "{} --> {}", self.format_start_time(), self.format_end_time())?;
        writeln!(f, "{}", self.text)?;
        writeln!(f)
    }
}

/// A block the parser could not use
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedBlock {
    /// Position of the block in the file (1-based)
    pub block_number: usize,
    /// Why it was skipped
    pub reason: SubtitleError,
}

/// Result of a lenient SRT parse
#[derive(Debug, Clone, Default)]
pub struct ParsedSubtitles {
    pub entries: Vec<SubtitleEntry>,
    pub skipped: Vec<SkippedBlock>,
}

/// Collection of subtitle entries with metadata
#[derive(Debug, Clone)]
pub struct SubtitleCollection {
    /// Source filename
    pub source_file: PathBuf,

    /// List of subtitle entries
    pub entries: Vec<SubtitleEntry>,
}

impl SubtitleCollection {
    /// Create an empty subtitle collection
    pub fn new(source_file: PathBuf) -> Self {
        SubtitleCollection {
            source_file,
            entries: Vec::new(),
        }
    }

    /// Wrap an existing list of entries
    pub fn from_entries(source_file: PathBuf, entries: Vec<SubtitleEntry>) -> Self {
        SubtitleCollection {
            source_file,
            entries,
        }
    }

    /// Load and parse an SRT file, skipping malformed blocks
    pub fn from_srt_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SubtitleError::MissingInput(path.to_path_buf()).into());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read subtitle file: {}", path.display()))?;
        let parsed = Self::parse_srt_string(&content);

        if !parsed.skipped.is_empty() {
            warn!(
                "Skipped {} malformed block(s) in {}",
                parsed.skipped.len(),
                path.display()
            );
        }
        debug!("Parsed {} subtitle entries from {}", parsed.entries.len(), path.display());

        Ok(Self::from_entries(path.to_path_buf(), parsed.entries))
    }

    /// Serialize all entries in SRT block format
    pub fn to_srt_string(&self) -> String {
        self.entries.iter().map(|entry| entry.to_string()).collect()
    }

    /// Serialize all entries in LRC line format
    pub fn to_lrc_string(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(&entry.to_lrc_line());
            out.push('\n');
        }
        out
    }

    /// Write subtitles to an SRT file
    pub fn write_to_srt<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        Self::write_text(path, &self.to_srt_string())
            .with_context(|| format!("Failed to write subtitle file: {}", path.display()))
    }

    /// Write subtitles to an LRC file
    pub fn write_to_lrc<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        Self::write_text(path, &self.to_lrc_string())
            .with_context(|| format!("Failed to write lyrics file: {}", path.display()))
    }

    fn write_text(path: &Path, content: &str) -> Result<()> {
        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
        }

        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }

    /// Total span covered by the collection (end of the last entry)
    pub fn total_duration(&self) -> f64 {
        self.entries.last().map(|e| e.end).unwrap_or(0.0)
    }

    /// Parse SRT content into entries.
    ///
    /// Never fails as a whole: blocks lacking an index line, a `-->` timestamp
    /// line or any text line are reported in `skipped` and logged.
    pub fn parse_srt_string(content: &str) -> ParsedSubtitles {
        let normalized = content.trim_start_matches('\u{feff}').replace("\r\n", "\n").replace('\r', "\n");
        let mut parsed = ParsedSubtitles::default();

        for (i, block) in split_blocks(&normalized).into_iter().enumerate() {
            let block_number = i + 1;
            match parse_block(&block) {
                Ok(entry) => parsed.entries.push(entry),
                Err(reason) => {
                    warn!("Skipping subtitle block {}: {}", block_number, reason);
                    parsed.skipped.push(SkippedBlock { block_number, reason });
                }
            }
        }

        parsed
    }
}

/// Group lines into blank-line separated blocks
fn split_blocks(content: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in content.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}

fn parse_block(lines: &[&str]) -> Result<SubtitleEntry, SubtitleError> {
    if lines.len() < 3 {
        return Err(SubtitleError::MalformedBlock {
            reason: format!("expected index, timestamp and text lines, found {} line(s)", lines.len()),
        });
    }

    let index: usize = lines[0].trim().parse().map_err(|_| SubtitleError::MalformedBlock {
        reason: format!("invalid index line '{}'", lines[0].trim()),
    })?;

    let (start_str, end_str) = lines[1].split_once("-->").ok_or_else(|| SubtitleError::MalformedBlock {
        reason: format!("missing '-->' in timestamp line '{}'", lines[1].trim()),
    })?;
    let start = timecode::decode_block_timestamp(start_str)?;
    let end = timecode::decode_block_timestamp(end_str)?;

    let text = lines[2..].iter().map(|l| l.trim()).collect::<Vec<_>>().join("\n");

    Ok(SubtitleEntry::new(index, start, end, text))
}

impl fmt::Display for SubtitleCollection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Subtitle Collection")?;
        writeln!(f, "Source: {:?}", self.source_file)?;
        writeln!(f, "Entries: {}", self.entries.len())?;
        writeln!(f, "Duration: {:.2}s", self.total_duration())?;
        Ok(())
    }
}
