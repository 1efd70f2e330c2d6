/*!
 * Integration tests for the audio to subtitle workflow
 */

use anyhow::Result;

use baobao::app_controller::{Controller, SubtitleFormat, TranscribeOptions};
use baobao::subtitle_processor::SubtitleCollection;
use baobao::validation::IssueKind;
use crate::common::{self, ScriptedTranscriber};

#[tokio::test]
async fn test_transcribe_thenValidate_shouldProduceCleanTimeline() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    let audio = common::create_test_audio(temp_dir.path(), "song.mp3")?;
    let controller = Controller::new_for_test()?;

    let srt = controller
        .transcribe_with(&ScriptedTranscriber::default(), &audio, &TranscribeOptions::default())
        .await?;
    let report = controller.validate(&srt, None)?;

    assert_eq!(srt, temp_dir.path().join("song.srt"));
    assert_eq!(report.entry_count, 2);
    assert!(!report.has_issues());
    Ok(())
}

#[tokio::test]
async fn test_transcribe_withKaraoke_shouldHighlightEachToken() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let audio = common::create_test_audio(temp_dir.path(), "song.mp3")?;
    let controller = Controller::new_for_test()?;
    let options = TranscribeOptions {
        karaoke: true,
        ..TranscribeOptions::default()
    };

    let srt = controller
        .transcribe_with(&ScriptedTranscriber::default(), &audio, &options)
        .await?;
    let collection = SubtitleCollection::from_srt_file(&srt)?;

    // four highlighted tokens plus the token-less second segment
    assert_eq!(collection.entries.len(), 5);
    let highlighted: Vec<_> = collection.entries.iter().map(|e| e.highlighted_unit()).collect();
    assert_eq!(highlighted[0].as_deref(), Some("你"));
    assert_eq!(highlighted[3].as_deref(), Some("陽光"));
    assert_eq!(highlighted[4], None);
    assert!(collection.entries.iter().take(4).all(|e| e.plain_text() == "你是我的陽光"));
    let indexes: Vec<_> = collection.entries.iter().map(|e| e.index).collect();
    assert_eq!(indexes, vec![1, 2, 3, 4, 5]);

    let report = controller.validate(&srt, None)?;
    assert!(report.find(IssueKind::Overlap).is_none());
    Ok(())
}

#[tokio::test]
async fn test_transcribe_toLrcWithExplicitOutput_shouldWriteThere() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let audio = common::create_test_audio(temp_dir.path(), "song.mp3")?;
    let output = temp_dir.path().join("lyrics").join("custom.lrc");
    let controller = Controller::new_for_test()?;
    let options = TranscribeOptions {
        output: Some(output.clone()),
        format: SubtitleFormat::Lrc,
        karaoke: false,
    };

    let written = controller
        .transcribe_with(&ScriptedTranscriber::default(), &audio, &options)
        .await?;

    assert_eq!(written, output);
    let content = std::fs::read_to_string(&output)?;
    assert_eq!(content, "[00:04.97]你是我的陽光\n[00:09.00]我愛你\n");
    Ok(())
}

#[tokio::test]
async fn test_batch_withMixedFiles_shouldTranscribeOnlyMatches() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_audio(temp_dir.path(), "a.mp3")?;
    common::create_test_audio(temp_dir.path(), "b.mp3")?;
    common::create_test_audio(temp_dir.path(), "notes.txt")?;
    let controller = Controller::new_for_test()?;

    let summary = controller
        .batch_with(&ScriptedTranscriber::default(), temp_dir.path(), "*.mp3")
        .await?;

    assert_eq!(summary.total(), 2);
    assert!(summary.failed.is_empty());
    assert!(temp_dir.path().join("a.srt").exists());
    assert!(temp_dir.path().join("b.srt").exists());
    Ok(())
}

#[tokio::test]
async fn test_batch_withFailingRecognizer_shouldCollectFailures() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_audio(temp_dir.path(), "a.mp3")?;
    let controller = Controller::new_for_test()?;

    let summary = controller
        .batch_with(&ScriptedTranscriber::failing(), temp_dir.path(), "*.mp3")
        .await?;

    assert!(summary.succeeded.is_empty());
    assert_eq!(summary.failed.len(), 1);
    assert!(!temp_dir.path().join("a.srt").exists());
    Ok(())
}

#[test]
fn test_transcribe_withMissingAudio_shouldNotWriteAnything() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let audio = temp_dir.path().join("missing.mp3");
    let controller = Controller::new_for_test()?;

    let result = tokio_test::block_on(controller.transcribe_with(
        &ScriptedTranscriber::default(),
        &audio,
        &TranscribeOptions::default(),
    ));

    assert!(result.is_err());
    assert!(!temp_dir.path().join("missing.srt").exists());
    Ok(())
}
