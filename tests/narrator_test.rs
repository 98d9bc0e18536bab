//! Integration tests for the generation narrator.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use llm_explainer::educational::{GenerationNarrator, Narrator, NarratorConfig, SilentNarrator};
use llm_explainer::{GenerationSequencer, GenerationState, SequencerConfig, SubStep};

fn running(tokens: &[&str], sub_step: Option<SubStep>, epoch: u64) -> GenerationState {
    GenerationState {
        emitted_tokens: tokens.iter().map(|t| t.to_string()).collect(),
        current_sub_step: sub_step,
        is_running: true,
        speed_multiplier: 1.0,
        run_epoch: epoch,
        total_tokens: 6,
    }
}

fn narrate(config: NarratorConfig, states: &[GenerationState]) -> String {
    let mut narrator = GenerationNarrator::new(Vec::new(), config);
    narrator.on_start("What is Python", 6).unwrap();
    for state in states {
        narrator.on_state(state).unwrap();
    }
    String::from_utf8(narrator.into_inner()).unwrap()
}

/// Output produced by the last snapshot alone.
fn delta(config: NarratorConfig, states: &[GenerationState]) -> String {
    let before = narrate(config.clone(), &states[..states.len() - 1]);
    let after = narrate(config, states);
    after[before.len()..].to_string()
}

#[test]
fn test_start_banner() {
    let text = narrate(NarratorConfig::default(), &[]);
    assert!(text.contains("📖 Prompt: \"What is Python\""));
    assert!(text.contains("Tokens to generate: 6"));
}

#[test]
fn test_first_sub_step() {
    let text = narrate(
        NarratorConfig::default(),
        &[running(&[], Some(SubStep::Tokenize), 1)],
    );
    assert!(text.contains("▶ Playing at 1.0×"));
    assert!(text.contains("ACT 1: TOKEN #1"));
    assert!(text.contains("[🔤 Tokenize]"));
    assert!(text.contains("Splitting into tokens"));
    assert!(text.contains("WHY TOKENS?"));
}

#[test]
fn test_repeated_snapshot_is_silent() {
    let state = running(&[], Some(SubStep::Embed), 1);
    let out = delta(NarratorConfig::default(), &[state.clone(), state]);
    assert!(out.is_empty());
}

#[test]
fn test_emitted_token() {
    let out = delta(
        NarratorConfig::default(),
        &[
            running(&[], Some(SubStep::Sample), 1),
            running(&["Python"], None, 1),
        ],
    );
    assert!(out.contains("🎲 Sampled: \"Python\""));
    assert!(out.contains("Output: [Python]"));
    assert!(out.contains("Progress:"));
    assert!(!out.contains("ACT"));
}

#[test]
fn test_insights_only_during_first_token() {
    let out = delta(
        NarratorConfig::default(),
        &[
            running(&["Python"], None, 1),
            running(&["Python"], Some(SubStep::Tokenize), 1),
        ],
    );
    assert!(out.contains("TOKEN #2"));
    assert!(!out.contains("💡"));
}

#[test]
fn test_pause_and_reset() {
    let mut paused = running(&["Python"], None, 1);
    paused.is_running = false;
    let out = delta(
        NarratorConfig::default(),
        &[running(&["Python"], Some(SubStep::Embed), 1), paused.clone()],
    );
    assert!(out.contains("⏸ Paused"));

    let reset = GenerationState {
        run_epoch: 2,
        ..GenerationState::new(6, 1.0)
    };
    let out = delta(NarratorConfig::default(), &[paused, reset]);
    assert!(out.contains("↺ Reset"));
    assert!(!out.contains("Paused"));
}

#[test]
fn test_speed_change() {
    let mut faster = running(&[], Some(SubStep::Embed), 1);
    faster.speed_multiplier = 2.5;
    let out = delta(
        NarratorConfig::default(),
        &[running(&[], Some(SubStep::Embed), 1), faster],
    );
    assert_eq!(out.trim(), "⏩ Speed: 2.5×");
}

#[test]
fn test_minimal_config() {
    let text = narrate(
        NarratorConfig::minimal(),
        &[
            running(&[], Some(SubStep::Tokenize), 1),
            running(&["Python"], None, 1),
        ],
    );
    assert!(!text.contains('['));
    assert!(!text.contains("💡"));
    assert!(text.contains("Sampled: \"Python\""));
}

#[test]
fn test_silent_narrator() {
    let mut narrator = SilentNarrator;
    narrator.on_start("anything", 1).unwrap();
    narrator.on_state(&GenerationState::new(1, 1.0)).unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_narrates_a_full_run() {
    let sequencer = GenerationSequencer::new(SequencerConfig::default()).unwrap();
    let narrator = Arc::new(Mutex::new(GenerationNarrator::new(
        Vec::new(),
        NarratorConfig::default(),
    )));
    narrator
        .lock()
        .unwrap()
        .on_start(&sequencer.config().prompt, 6)
        .unwrap();

    let sink = Arc::clone(&narrator);
    sequencer.on_state_change(move |state| sink.lock().unwrap().on_state(state).unwrap());
    sequencer.start();
    tokio::time::sleep(Duration::from_secs(30)).await;
    drop(sequencer);

    let narrator = Arc::try_unwrap(narrator).ok().unwrap().into_inner().unwrap();
    let text = String::from_utf8(narrator.into_inner()).unwrap();

    for n in 1..=6 {
        assert!(text.contains(&format!("TOKEN #{n}")), "missing token #{n}");
    }
    assert!(text.contains("Python is a high-level programming language"));
    assert!(text.contains("GENERATION COMPLETE"));
    assert!(!text.contains("Paused"));
}
