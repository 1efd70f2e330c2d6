/*!
 * Tests for the timeline validator
 */

use baobao::app_config::ValidationConfig;
use baobao::subtitle_processor::{SubtitleCollection, SubtitleEntry};
use baobao::validation::{IssueKind, IssueSeverity, TimelineValidator};
use crate::common;

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

#[test]
fn test_validate_withCleanChorus_shouldPass() {
    let entries = SubtitleCollection::parse_srt_string(common::CHORUS_SRT).entries;

    let report = TimelineValidator::new().validate(&entries, None);

    assert!(!report.has_issues());
    assert!(report.warnings.is_empty());
    assert_eq!(report.entry_count, 3);
    assert!(report.to_string().contains("✅"));
}

#[test]
fn test_validate_withOverlap_shouldReportExample() {
    let entries = vec![
        SubtitleEntry::new(1, 0.0, 2.5, "第一句"),
        SubtitleEntry::new(2, 2.0, 4.0, "第二句"),
    ];

    let report = TimelineValidator::new().validate(&entries, None);

    let overlap = report.find(IssueKind::Overlap).expect("overlap should be reported");
    assert_eq!(overlap.count, 1);
    assert_eq!(overlap.kind.severity(), IssueSeverity::Issue);
    assert_eq!(overlap.examples.len(), 1);
    let rendered = report.to_string();
    assert!(rendered.contains("Overlap: 0.500s"));
    assert!(rendered.contains("❌"));
}

#[test]
fn test_validate_withMissingWords_shouldBeBlocking() {
    let entries = vec![
        SubtitleEntry::new(1, 0.0, 2.0, "hello world"),
        SubtitleEntry::new(2, 2.0, 4.0, "goodbye"),
    ];
    let expected = words(&["hello", "moon"]);

    let report = TimelineValidator::new().validate(&entries, Some(&expected));

    assert!(report.has_issues());
    assert_eq!(report.find(IssueKind::MissingWords).unwrap().words, words(&["moon"]));
    let extra = report.find(IssueKind::ExtraWords).unwrap();
    assert_eq!(extra.kind.severity(), IssueSeverity::Warning);
    assert_eq!(extra.words, words(&["world", "goodbye"]));
}

#[test]
fn test_validate_withEmptyExpectedList_shouldSkipCoverage() {
    let entries = vec![SubtitleEntry::new(1, 0.0, 2.0, "anything")];

    let report = TimelineValidator::new().validate(&entries, Some(&[]));

    assert!(report.find(IssueKind::ExtraWords).is_none());
    assert!(report.find(IssueKind::MissingWords).is_none());
}

#[test]
fn test_validate_withCustomThresholds_shouldWarnOnGapsAndDurations() {
    let config = ValidationConfig {
        min_duration_secs: 0.5,
        max_duration_secs: 3.0,
        max_gap_secs: 1.0,
        example_limit: 1,
    };
    let entries = vec![
        SubtitleEntry::new(1, 0.0, 0.2, "短"),
        SubtitleEntry::new(2, 5.0, 9.0, "很長很長"),
    ];

    let report = TimelineValidator::with_config(config).validate(&entries, None);

    assert!(!report.has_issues());
    assert!(report.find(IssueKind::VeryShortDuration).is_some());
    assert!(report.find(IssueKind::VeryLongDuration).is_some());
    assert_eq!(report.find(IssueKind::LargeGaps).unwrap().count, 1);
}

#[test]
fn test_validate_withNoEntries_shouldReportZeroCount() {
    let report = TimelineValidator::new().validate(&[], None);

    assert_eq!(report.entry_count, 0);
    assert!(!report.has_issues());
}
