//! Integration tests for configuration loading.

use std::path::PathBuf;

use llm_explainer::config::{DEFAULT_SPEED, MAX_SPEED, MIN_SPEED};
use llm_explainer::{Error, SamplingConfig, SequencerConfig, clamp_speed, clamp_temperature};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("llm-explainer-{}-{name}", std::process::id()))
}

#[test]
fn test_defaults() {
    let config = SequencerConfig::default();
    assert_eq!(config.prompt, "What is Python");
    assert_eq!(config.response.len(), 6);
    assert_eq!(config.base_step_ms, 800);
    assert_eq!(config.settle_gap_ms, 200);
    assert_eq!(config.prompt_tokens(), ["What", "is", "Python"]);
    assert!(config.validate().is_ok());
}

#[test]
fn test_speed_policy() {
    assert_eq!(clamp_speed(0.5), MIN_SPEED);
    assert_eq!(clamp_speed(3.0), MAX_SPEED);
    assert_eq!(clamp_speed(100.0), MAX_SPEED);
    assert_eq!(clamp_speed(-1.0), MIN_SPEED);
    assert_eq!(clamp_speed(2.2), 2.0);
    assert_eq!(clamp_speed(f32::NEG_INFINITY), DEFAULT_SPEED);
}

#[test]
fn test_temperature_policy() {
    assert_eq!(clamp_temperature(1.0), 1.0);
    assert_eq!(clamp_temperature(0.33), 0.35);
    let config = SamplingConfig::default().with_temperature(4.0).with_seed(9);
    assert_eq!(config.temperature, 1.5);
    assert_eq!(config.seed, Some(9));
}

#[test]
fn test_rejects_empty_tokens() {
    let config = SequencerConfig::default().with_response(["ok", ""]);
    assert!(matches!(config.validate(), Err(Error::Config(_))));
}

#[test]
fn test_load_partial_json() -> anyhow::Result<()> {
    let path = temp_path("partial.json");
    std::fs::write(&path, r#"{ "response": ["Hello", "there"], "base_step_ms": 100 }"#)?;

    let config = SequencerConfig::from_json_file(&path)?;
    std::fs::remove_file(&path)?;

    assert_eq!(config.response, ["Hello", "there"]);
    assert_eq!(config.base_step_ms, 100);
    assert_eq!(config.prompt, "What is Python");
    assert_eq!(config.settle_gap_ms, 200);
    Ok(())
}

#[test]
fn test_load_invalid_json() -> anyhow::Result<()> {
    let path = temp_path("invalid.json");
    std::fs::write(&path, "{ not json")?;

    let result = SequencerConfig::from_json_file(&path);
    std::fs::remove_file(&path)?;

    assert!(matches!(result, Err(Error::Json(_))));
    Ok(())
}

#[test]
fn test_load_missing_file() {
    let result = SequencerConfig::from_json_file(temp_path("missing.json"));
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_load_rejects_zero_step() -> anyhow::Result<()> {
    let path = temp_path("zero.json");
    std::fs::write(&path, r#"{ "base_step_ms": 0 }"#)?;

    let result = SequencerConfig::from_json_file(&path);
    std::fs::remove_file(&path)?;

    assert!(matches!(result, Err(Error::Config(_))));
    Ok(())
}
