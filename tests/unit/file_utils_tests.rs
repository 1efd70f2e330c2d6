/*!
 * Tests for file utilities
 */

use anyhow::Result;
use std::path::PathBuf;

use baobao::file_utils::{FileManager, FileType};
use baobao::player::Player;
use crate::common;

#[test]
fn test_findFilesMatching_withWavPattern_shouldIgnoreOtherAudio() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_audio(temp_dir.path(), "b.wav")?;
    common::create_test_audio(temp_dir.path(), "a.wav")?;
    common::create_test_audio(temp_dir.path(), "c.mp3")?;

    let found = FileManager::find_files_matching(temp_dir.path(), "*.wav")?;

    assert_eq!(found, vec![temp_dir.path().join("a.wav"), temp_dir.path().join("b.wav")]);
    Ok(())
}

#[test]
fn test_findFilesMatching_withInvalidPattern_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    assert!(FileManager::find_files_matching(temp_dir.path(), "[").is_err());
    Ok(())
}

#[test]
fn test_transcriptPath_shouldSitNextToAudio() {
    assert_eq!(
        FileManager::transcript_path("/music/甜蜜蜜.mp3", "lrc"),
        PathBuf::from("/music/甜蜜蜜.lrc")
    );
}

#[test]
fn test_detectFileType_shouldClassifySongFiles() {
    assert_eq!(FileManager::detect_file_type("song.flac"), FileType::Audio);
    assert_eq!(FileManager::detect_file_type("song.enhanced.srt"), FileType::Subtitle);
}

#[test]
fn test_findSubtitle_shouldFallBackToLrc() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let audio = common::create_test_audio(temp_dir.path(), "song.mp3")?;
    common::create_test_file(temp_dir.path(), "song.lrc", "[00:01.00]你好\n")?;

    assert_eq!(Player::find_subtitle(&audio), Some(temp_dir.path().join("song.lrc")));
    Ok(())
}
