//! Integration tests for the pipeline overview and token statistics.

use std::time::Duration;

use llm_explainer::SubStep;
use llm_explainer::demos::overview::{PROCESS_STEPS, step_for};
use llm_explainer::demos::token_stats::{
    CONTEXT_TOKENS, CONTEXT_WORDS, CounterAnimation, format_thousands, word_ratio_percent,
};

#[test]
fn test_stages_follow_sub_steps() {
    for (i, step) in SubStep::ALL.iter().enumerate() {
        assert_eq!(step_for(*step).id, i + 1);
        assert_eq!(step_for(*step).icon, step.icon());
    }
    assert_eq!(step_for(SubStep::Sample).title, "Sampling");
    assert_eq!(PROCESS_STEPS.len(), SubStep::COUNT);
}

#[test]
fn test_counter_animation() {
    let counter = CounterAnimation::new(CONTEXT_TOKENS);
    assert_eq!(counter.value_at(Duration::ZERO), 0);
    // 1 - 0.5^4 = 0.9375
    assert_eq!(counter.value_at(Duration::from_millis(750)), 3840);
    assert_eq!(counter.value_at(Duration::from_millis(1500)), CONTEXT_TOKENS);
    assert_eq!(counter.value_at(Duration::from_secs(10)), CONTEXT_TOKENS);
    assert!(!counter.is_done(Duration::from_millis(1499)));
    assert!(counter.is_done(Duration::from_millis(1500)));
}

#[test]
fn test_counter_is_monotonic() {
    let counter = CounterAnimation::new(CONTEXT_WORDS);
    let values: Vec<u64> = (0..=30)
        .map(|i| counter.value_at(Duration::from_millis(i * 50)))
        .collect();
    assert!(values.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_word_ratio() {
    assert_eq!(word_ratio_percent(), 73);
    assert_eq!(format_thousands(CONTEXT_TOKENS), "4,096");
}
