/*!
 * Integration tests for the pinyin/translation enhancement workflow
 */

use anyhow::Result;
use std::sync::Arc;

use baobao::app_config::Config;
use baobao::app_controller::Controller;
use baobao::enhancement::{LlmInterpreter, OutputMode};
use baobao::providers::mock::{MockProvider, MockRequest};
use baobao::subtitle_processor::SubtitleCollection;
use crate::common;

/// Answers like a cooperative model for the two chorus phrases
fn chorus_reply(request: &MockRequest) -> String {
    if request.prompt.contains("Chinese: 我愛你") {
        return r#"{"pinyin": "wǒ ài nǐ", "english": "I love you",
            "pinyin_spaced": "wǒ ài nǐ", "literal_gloss": "I love you", "natural_english": "I love you",
            "sing_along_tip": "❤️ say it with a hug",
            "word_details": [
                {"char": "我", "pinyin": "wǒ", "english": "I"},
                {"char": "愛", "pinyin": "ài", "english": "love"},
                {"char": "你", "pinyin": "nǐ", "english": "you"}]}"#
            .to_string();
    }
    r#"<think>short phrase</think>{"pinyin": "nǐ shì wǒ de yáng guāng", "english": "You are my sunshine",
        "pinyin_spaced": "nǐ shì wǒ de yáng guāng", "literal_gloss": "you are my sunshine",
        "natural_english": "You are my sunshine", "sing_along_tip": "",
        "word_details": [{"char": "你", "pinyin": "nǐ", "english": "you"}]}"#
        .to_string()
}

fn controller_with_mode(mode: OutputMode) -> Result<Controller> {
    let mut config = Config::default();
    config.enhancement.output_mode = mode;
    Controller::with_config(config)
}

#[tokio::test]
async fn test_enhance_inFullMode_shouldAddPinyinAndTranslation() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    let srt = common::create_test_subtitle(temp_dir.path(), "song.srt")?;
    let provider = MockProvider::working().with_custom_response(chorus_reply);
    let interpreter = LlmInterpreter::new(provider.clone(), "qwen3:4b");
    let controller = controller_with_mode(OutputMode::Full)?;

    let output = controller.enhance_with(Arc::new(interpreter), &srt, None).await?;

    assert_eq!(output, temp_dir.path().join("song.enhanced.srt"));
    let enhanced = SubtitleCollection::from_srt_file(&output)?;
    assert_eq!(enhanced.entries.len(), 3);
    assert_eq!(enhanced.entries[0].text, "你是我的陽光\nnǐ shì wǒ de yáng guāng\n(You are my sunshine)");
    assert_eq!(enhanced.entries[1].text, "我愛你\nwǒ ài nǐ\n(I love you)");
    assert_eq!(enhanced.entries[2].start, 12.0);
    // the repeated chorus line is interpreted once
    assert_eq!(provider.request_count(), 2);
    Ok(())
}

#[tokio::test]
async fn test_enhance_inLearnMode_shouldLeadWithPinyin() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let srt = common::create_test_subtitle(temp_dir.path(), "song.srt")?;
    let interpreter = LlmInterpreter::new(MockProvider::working().with_custom_response(chorus_reply), "qwen3:4b");
    let controller = controller_with_mode(OutputMode::Learn)?;

    let output = controller.enhance_with(Arc::new(interpreter), &srt, None).await?;

    assert_eq!(output, temp_dir.path().join("song.learn.srt"));
    let enhanced = SubtitleCollection::from_srt_file(&output)?;
    assert_eq!(enhanced.entries[1].text, "wǒ ài nǐ\n我愛你\n❤️ say it with a hug");
    // blank tip falls back to the literal gloss
    assert_eq!(enhanced.entries[0].text, "nǐ shì wǒ de yáng guāng\n你是我的陽光\n(you are my sunshine)");
    Ok(())
}

#[tokio::test]
async fn test_enhance_withHighlightedEntry_shouldHighlightPinyin() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let srt = common::create_test_file(
        temp_dir.path(),
        "karaoke.srt",
        "1\n00:00:09,000 --> 00:00:10,000\n我<font color=\"#00ff00\">愛</font>你\n",
    )?;
    let interpreter = LlmInterpreter::new(MockProvider::working().with_custom_response(chorus_reply), "qwen3:4b");
    let controller = controller_with_mode(OutputMode::Full)?;

    let output = controller.enhance_with(Arc::new(interpreter), &srt, None).await?;

    let enhanced = SubtitleCollection::from_srt_file(&output)?;
    let lines: Vec<&str> = enhanced.entries[0].text.lines().collect();
    assert_eq!(lines[0], "我<font color=\"#00ff00\">愛</font>你");
    assert_eq!(lines[1], "wǒ <font color=\"#00ff00\">ài</font> nǐ");
    assert_eq!(lines[2], "(I love you)");
    Ok(())
}

#[tokio::test]
async fn test_enhance_withMalformedReplies_shouldDegradeNotFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let srt = common::create_test_file(temp_dir.path(), "song.srt", "1\n00:00:01,000 --> 00:00:02,000\n測試\n")?;
    let interpreter = LlmInterpreter::new(MockProvider::malformed(), "qwen3:4b").with_parse_retries(1);
    let controller = controller_with_mode(OutputMode::Full)?;

    let output = controller.enhance_with(Arc::new(interpreter), &srt, None).await?;

    let enhanced = SubtitleCollection::from_srt_file(&output)?;
    assert_eq!(enhanced.entries[0].text, "測試\n測試\n(?)");
    Ok(())
}

#[tokio::test]
async fn test_enhance_withUnreachableService_shouldFailBeforeWriting() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let srt = common::create_test_subtitle(temp_dir.path(), "song.srt")?;
    let interpreter = LlmInterpreter::new(MockProvider::failing(), "qwen3:4b");
    let controller = controller_with_mode(OutputMode::Emoji)?;

    let result = controller.enhance_with(Arc::new(interpreter), &srt, None).await;

    assert!(result.is_err());
    assert!(format!("{:#}", result.unwrap_err()).contains("ollama serve"));
    assert!(!temp_dir.path().join("song.emoji.srt").exists());
    Ok(())
}

#[tokio::test]
async fn test_enhance_withMissingModel_shouldNameInstalledModels() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let srt = common::create_test_subtitle(temp_dir.path(), "song.srt")?;
    let provider = MockProvider::working().with_models(&["llama3:8b", "mistral:7b"]);
    let interpreter = LlmInterpreter::new(provider, "qwen3:4b");
    let controller = controller_with_mode(OutputMode::Full)?;

    let result = controller.enhance_with(Arc::new(interpreter), &srt, None).await;

    let message = format!("{:#}", result.unwrap_err());
    assert!(message.contains("llama3:8b"));
    Ok(())
}

#[tokio::test]
async fn test_enhance_withMissingSrt_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let interpreter = LlmInterpreter::new(MockProvider::working(), "qwen3:4b");
    let controller = controller_with_mode(OutputMode::Full)?;

    let result = controller
        .enhance_with(Arc::new(interpreter), &temp_dir.path().join("missing.srt"), None)
        .await;

    assert!(result.is_err());
    Ok(())
}
