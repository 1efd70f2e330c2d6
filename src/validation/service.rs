/*!
 * Timeline validation service.
 *
 * Runs every timing and coverage check and collects the findings into a
 * `ValidationReport`. Findings are split into blocking issues and
 * informational warnings; the validator itself never fails.
 */

use log::debug;
use std::fmt;

use crate::app_config::ValidationConfig;
use crate::subtitle_processor::SubtitleEntry;

use super::coverage;
use super::timecodes::{EntryPair, TimecodeValidator};

/// Number of entries echoed in the rendered report
const SAMPLE_ENTRY_COUNT: usize = 5;

/// Kind of finding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    /// Two entries share an instant
    Overlap,
    /// An entry ends after the next one starts
    NonSequential,
    /// Expected words absent from the timeline
    MissingWords,
    /// Entries that may flash on screen
    VeryShortDuration,
    /// Entries that may look stuck on screen
    VeryLongDuration,
    /// Words present but not expected
    ExtraWords,
    /// Long silences between entries
    LargeGaps,
}

impl IssueKind {
    /// Severity attached to this kind of finding
    pub fn severity(&self) -> IssueSeverity {
        match self {
            Self::Overlap | Self::NonSequential | Self::MissingWords => IssueSeverity::Issue,
            Self::VeryShortDuration | Self::VeryLongDuration | Self::ExtraWords | Self::LargeGaps => {
                IssueSeverity::Warning
            }
        }
    }

    /// Stable identifier used in reports
    pub fn code(&self) -> &'static str {
        match self {
            Self::Overlap => "OVERLAPPING_ENTRIES",
            Self::NonSequential => "NON_SEQUENTIAL",
            Self::MissingWords => "MISSING_WORDS",
            Self::VeryShortDuration => "VERY_SHORT_DURATION",
            Self::VeryLongDuration => "VERY_LONG_DURATION",
            Self::ExtraWords => "EXTRA_WORDS",
            Self::LargeGaps => "LARGE_GAPS",
        }
    }
}

/// Severity of a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueSeverity {
    /// Blocking: the timeline should be treated as failed
    Issue,
    /// Informational only
    Warning,
}

/// One finding of the validator
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    pub kind: IssueKind,
    pub message: String,
    pub count: usize,
    /// Example entry pairs (overlap amount or gap in `delta`)
    pub examples: Vec<EntryPair>,
    /// Words involved, for coverage findings
    pub words: Vec<String>,
}

impl Issue {
    fn new(kind: IssueKind, count: usize, message: String) -> Self {
        Self {
            kind,
            message,
            count,
            examples: Vec::new(),
            words: Vec::new(),
        }
    }

    fn with_examples(mut self, examples: Vec<EntryPair>) -> Self {
        self.examples = examples;
        self
    }

    fn with_words(mut self, words: Vec<String>) -> Self {
        self.words = words;
        self
    }
}

/// Result of validating one timeline
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub entry_count: usize,
    /// End of the last entry, in seconds
    pub total_duration: f64,
    pub issues: Vec<Issue>,
    pub warnings: Vec<Issue>,
    /// First few entries, for display
    pub samples: Vec<SubtitleEntry>,
}

impl ValidationReport {
    /// Whether any blocking issue was found
    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    /// Find a finding of the given kind among issues and warnings
    pub fn find(&self, kind: IssueKind) -> Option<&Issue> {
        self.issues.iter().chain(self.warnings.iter()).find(|i| i.kind == kind)
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        format!(
            "Validation: {} entries, {:.2}s, {} issue(s), {} warning(s)",
            self.entry_count,
            self.total_duration,
            self.issues.len(),
            self.warnings.len()
        )
    }

    fn push(&mut self, issue: Issue) {
        match issue.kind.severity() {
            IssueSeverity::Issue => self.issues.push(issue),
            IssueSeverity::Warning => self.warnings.push(issue),
        }
    }
}

fn excerpt(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(60);

        if self.has_issues() {
            writeln!(f, "\n{}\n  ISSUES FOUND\n{}", rule, rule)?;
            for issue in &self.issues {
                writeln!(f, "\n❌ {}", issue.message)?;
                if issue.kind == IssueKind::Overlap {
                    for pair in &issue.examples {
                        for entry in [&pair.first, &pair.second] {
                            writeln!(
                                f,
                                "   Entry {}: [{:.3}s - {:.3}s] '{}'",
                                entry.index,
                                entry.start,
                                entry.end,
                                excerpt(&entry.plain_text(), 30)
                            )?;
                        }
                        writeln!(f, "   -> Overlap: {:.3}s\n", pair.delta)?;
                    }
                }
            }
        }

        if !self.warnings.is_empty() {
            writeln!(f, "\n{}\n  WARNINGS\n{}", rule, rule)?;
            for warning in &self.warnings {
                writeln!(f, "\n⚠  {}", warning.message)?;
            }
        }

        writeln!(f, "\n{}\n  SUMMARY\n{}", rule, rule)?;
        writeln!(f, "\nTotal entries: {}", self.entry_count)?;
        writeln!(f, "Total duration: {:.2}s", self.total_duration)?;
        writeln!(f, "Issues: {}", self.issues.len())?;
        writeln!(f, "Warnings: {}", self.warnings.len())?;

        let thin = "-".repeat(60);
        writeln!(f, "\n{}\nSample entries (first {}):\n{}", thin, SAMPLE_ENTRY_COUNT, thin)?;
        for entry in &self.samples {
            writeln!(
                f,
                "{:3}. [{:6.3}s - {:6.3}s] ({:.3}s) '{}'",
                entry.index,
                entry.start,
                entry.end,
                entry.duration(),
                excerpt(&entry.plain_text(), 50)
            )?;
        }

        writeln!(f, "\n{}", rule)?;
        if self.has_issues() {
            writeln!(f, "❌ FORMAT ISSUES DETECTED")?;
        } else {
            writeln!(f, "✅ NO FORMAT ISSUES FOUND")?;
        }
        writeln!(f, "{}", rule)
    }
}

/// Runs every timeline check and builds the report
#[derive(Debug, Clone, Default)]
pub struct TimelineValidator {
    timecodes: TimecodeValidator,
}

impl TimelineValidator {
    /// Create a new validator with default thresholds
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new validator with custom thresholds
    pub fn with_config(config: ValidationConfig) -> Self {
        Self {
            timecodes: TimecodeValidator::with_config(config),
        }
    }

    /// Validate `entries`, optionally checking coverage of `expected_words`.
    ///
    /// An empty expected list disables the coverage check.
    pub fn validate(&self, entries: &[SubtitleEntry], expected_words: Option<&[String]>) -> ValidationReport {
        let config = self.timecodes.config();
        let limit = config.example_limit;
        let mut report = ValidationReport {
            entry_count: entries.len(),
            total_duration: entries.last().map(|e| e.end).unwrap_or(0.0),
            samples: entries.iter().take(SAMPLE_ENTRY_COUNT).cloned().collect(),
            ..ValidationReport::default()
        };

        let overlaps = self.timecodes.find_overlaps(entries);
        if !overlaps.is_empty() {
            let count = overlaps.len();
            report.push(
                Issue::new(
                    IssueKind::Overlap,
                    count,
                    format!(
                        "Found {} overlapping timestamp pairs (causes multiple subtitles displayed simultaneously)",
                        count
                    ),
                )
                .with_examples(overlaps.into_iter().take(limit).collect()),
            );
        }

        let non_sequential = self.timecodes.find_non_sequential(entries);
        if !non_sequential.is_empty() {
            let count = non_sequential.len();
            report.push(
                Issue::new(IssueKind::NonSequential, count, format!("Found {} non-sequential timestamps", count))
                    .with_examples(non_sequential.into_iter().take(limit).collect()),
            );
        }

        let too_short = self.timecodes.find_too_short(entries).len();
        if too_short > 0 {
            report.push(Issue::new(
                IssueKind::VeryShortDuration,
                too_short,
                format!(
                    "Found {} entries with duration < {:.0}ms (may flash on screen)",
                    too_short,
                    config.min_duration_secs * 1000.0
                ),
            ));
        }

        let too_long = self.timecodes.find_too_long(entries).len();
        if too_long > 0 {
            report.push(Issue::new(
                IssueKind::VeryLongDuration,
                too_long,
                format!(
                    "Found {} entries with duration > {}s (may be stuck on screen)",
                    too_long, config.max_duration_secs
                ),
            ));
        }

        if let Some(expected) = expected_words.filter(|words| !words.is_empty()) {
            let coverage = coverage::check_coverage(entries, expected);
            if !coverage.missing.is_empty() {
                report.push(
                    Issue::new(
                        IssueKind::MissingWords,
                        coverage.missing.len(),
                        format!("Missing expected words: {:?}", coverage.missing),
                    )
                    .with_words(coverage.missing),
                );
            }
            if !coverage.extra.is_empty() {
                report.push(
                    Issue::new(
                        IssueKind::ExtraWords,
                        coverage.extra.len(),
                        format!("Found unexpected words: {:?}", coverage.extra),
                    )
                    .with_words(coverage.extra),
                );
            }
        }

        let gaps = self.timecodes.find_large_gaps(entries);
        if !gaps.is_empty() {
            let count = gaps.len();
            report.push(
                Issue::new(
                    IssueKind::LargeGaps,
                    count,
                    format!("Found {} gaps > {} seconds between entries", count, config.max_gap_secs),
                )
                .with_examples(gaps.into_iter().take(limit).collect()),
            );
        }

        debug!("{}", report.summary());
        report
    }
}
