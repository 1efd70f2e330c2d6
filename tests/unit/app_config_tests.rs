/*!
 * Tests for app configuration functionality
 */

use anyhow::Result;

use baobao::app_config::{AsrBackend, Config, LogLevel, ModelSize};
use baobao::enhancement::OutputMode;
use crate::common;

#[test]
fn test_default_config_shouldBeValid() {
    let config = Config::default();

    assert!(config.validate().is_ok());
    assert_eq!(config.transcription.backend, AsrBackend::StableTs);
    assert_eq!(config.transcription.language, "zh");
    assert_eq!(config.enhancement.output_mode, OutputMode::Full);
    assert_eq!(config.log_level, LogLevel::Info);
}

#[test]
fn test_loadOrCreate_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("baobao.json");

    let config = Config::load_or_create(&path)?;

    assert!(path.exists());
    assert_eq!(config.enhancement.model, Config::default().enhancement.model);
    Ok(())
}

#[test]
fn test_loadOrCreate_withPartialFile_shouldFillDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "baobao.json",
        r#"{"transcription": {"model": "small"}, "enhancement": {"output_mode": "learn"}}"#,
    )?;

    let config = Config::load_or_create(&path)?;

    assert_eq!(config.transcription.model, ModelSize::Small);
    assert_eq!(config.enhancement.output_mode, OutputMode::Learn);
    assert_eq!(config.validation, Config::default().validation);
    Ok(())
}

#[test]
fn test_save_thenLoad_shouldRoundTripOverrides() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("baobao.json");
    let mut config = Config::default();
    config.enhancement.endpoint = "http://10.0.0.2:11434".to_string();
    config.validation.max_gap_secs = 4.5;

    config.save(&path)?;
    let loaded = Config::load_or_create(&path)?;

    assert_eq!(loaded.enhancement.endpoint, "http://10.0.0.2:11434");
    assert_eq!(loaded.validation.max_gap_secs, 4.5);
    Ok(())
}

#[test]
fn test_validate_withBadEndpoint_shouldFail() {
    let mut config = Config::default();
    config.enhancement.endpoint = "not a url".to_string();

    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withUnknownLanguage_shouldFail() {
    let mut config = Config::default();
    config.transcription.language = "xx-not-a-language".to_string();

    assert!(config.validate().is_err());
}
