/*!
 * Tests for subtitle parsing and serialization
 */

use anyhow::Result;

use baobao::subtitle_processor::{SubtitleCollection, SubtitleEntry};
use baobao::timecode;
use crate::common;

#[test]
fn test_parseSrtString_withChorus_shouldKeepOrderAndTiming() {
    let parsed = SubtitleCollection::parse_srt_string(common::CHORUS_SRT);

    assert_eq!(parsed.entries.len(), 3);
    assert!(parsed.skipped.is_empty());
    assert_eq!(parsed.entries[1].text, "我愛你");
    assert!((parsed.entries[0].start - 4.97).abs() < 1e-6);
    assert!((parsed.entries[2].end - 15.0).abs() < 1e-6);
}

#[test]
fn test_parseSrtString_withBrokenBlock_shouldSkipOnlyThatBlock() {
    let content = "1\n00:00:01,000 --> 00:00:02,000\n一\n\nnot a block\n\n3\n00:00:03,000 --> 00:00:04,000\n三\n";

    let parsed = SubtitleCollection::parse_srt_string(content);

    assert_eq!(parsed.entries.len(), 2);
    assert_eq!(parsed.skipped.len(), 1);
    assert_eq!(parsed.skipped[0].block_number, 2);
    assert_eq!(parsed.entries[1].index, 3);
}

#[test]
fn test_parseSrtString_withCrlfAndBom_shouldParse() {
    let content = "\u{feff}1\r\n00:00:01,500 --> 00:00:02,250\r\n第一行\r\n第二行\r\n\r\n";

    let parsed = SubtitleCollection::parse_srt_string(content);

    assert_eq!(parsed.entries.len(), 1);
    assert_eq!(parsed.entries[0].text, "第一行\n第二行");
}

#[test]
fn test_writeToSrt_thenReadBack_shouldPreserveEntries() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("out").join("song.srt");
    let collection = SubtitleCollection::from_entries(
        path.clone(),
        vec![
            SubtitleEntry::new(1, 0.5, 2.0, "月亮代表我的心"),
            SubtitleEntry::new(2, 2.25, 4.0, "<font color=\"#00ff00\">你</font>問我愛你有多深"),
        ],
    );

    collection.write_to_srt(&path)?;
    let loaded = SubtitleCollection::from_srt_file(&path)?;

    assert_eq!(loaded.entries.len(), 2);
    assert_eq!(loaded.entries[1].highlighted_unit().as_deref(), Some("你"));
    assert_eq!(loaded.entries[1].plain_text(), "你問我愛你有多深");
    Ok(())
}

#[test]
fn test_writeToLrc_shouldUseLineTimestamps() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("song.lrc");
    let collection = SubtitleCollection::from_entries(
        path.clone(),
        vec![SubtitleEntry::new(1, 65.5, 70.0, "甜蜜蜜")],
    );

    collection.write_to_lrc(&path)?;

    let content = std::fs::read_to_string(&path)?;
    assert_eq!(content, format!("{}甜蜜蜜\n", timecode::encode_line_timestamp(65.5)));
    assert!(content.starts_with("[01:05.50]"));
    Ok(())
}

#[test]
fn test_fromSrtFile_withMissingFile_shouldFail() {
    assert!(SubtitleCollection::from_srt_file("/no/such/song.srt").is_err());
}
