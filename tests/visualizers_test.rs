//! Integration tests for ASCII visualizers.

use llm_explainer::SubStep;
use llm_explainer::demos::Point3;
use llm_explainer::demos::attention::{ATTENTION_DATA, TARGET_INDEX};
use llm_explainer::educational::{
    attention_bars, box_text, insight_box, pipeline_strip, probability_bars, progress_bar,
    scatter_projection, token_sequence_box,
};

#[test]
fn test_progress_bar() {
    assert_eq!(progress_bar(3, 6, 10, "", true), "█████░░░░░ 50%");
    assert_eq!(progress_bar(0, 0, 4, "x", false), "x░░░░");
    // Overshoot is capped at a full bar.
    assert_eq!(progress_bar(9, 6, 4, "", false), "████");
}

#[test]
fn test_probability_bars_sorted_and_truncated() {
    let rows = [("low", 0.1), ("high", 0.5), ("mid", 0.3)];
    let bars = probability_bars(&rows, 10, 2);
    let lines: Vec<&str> = bars.lines().collect();

    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with('┌'));
    assert!(lines[1].contains("high") && lines[1].contains("50.0%"));
    assert!(lines[2].contains("mid"));
    assert!(!bars.contains("low"));
    assert!(lines[1].ends_with("█████"));
}

#[test]
fn test_token_sequence_box() {
    let tokens: Vec<String> = ["Python", "is"].iter().map(|t| t.to_string()).collect();
    let boxed = token_sequence_box(&tokens, Some(1), "Output: ");
    assert!(boxed.contains("Output: Python · [is]"));
    assert_eq!(boxed.lines().count(), 3);

    assert!(token_sequence_box(&[], None, "").contains("(empty)"));
}

#[test]
fn test_pipeline_strip() {
    let idle = pipeline_strip(None);
    assert!(!idle.contains('['));
    for step in SubStep::ALL {
        assert!(idle.contains(step.label()));
    }

    let sampling = pipeline_strip(Some(SubStep::Sample));
    assert!(sampling.contains("[🎲 Sample]"));
    assert_eq!(sampling.matches('[').count(), 1);
}

#[test]
fn test_attention_bars() {
    let bars = attention_bars(&ATTENTION_DATA, TARGET_INDEX, 20);
    let lines: Vec<&str> = bars.lines().collect();

    assert_eq!(lines.len(), ATTENTION_DATA.len());
    assert!(lines[TARGET_INDEX].starts_with('◆'));
    assert!(lines[1].starts_with('★'));
    assert!(lines[1].contains("78%"));
    assert!(lines[5].starts_with(' '));
}

#[test]
fn test_box_text_width() {
    let boxed = box_text("hello\n\nworld", "T", 20);
    let lines: Vec<&str> = boxed.lines().collect();

    assert_eq!(lines.len(), 5);
    assert!(lines[0].contains(" T "));
    assert!(lines.iter().all(|l| l.chars().count() == 20));
}

#[test]
fn test_box_text_wraps() {
    let boxed = box_text("abcdefghij", "", 8);
    let lines: Vec<&str> = boxed.lines().collect();

    assert_eq!(lines, ["┌──────┐", "│ abcd │", "│ efgh │", "│ ij   │", "└──────┘"]);
}

#[test]
fn test_scatter_projection() {
    let points = [("a", Point3::new(0.0, 0.0, 5.0)), ("b", Point3::new(1.0, 1.0, 0.0))];
    let plot = scatter_projection(&points, 5, 3);
    let lines: Vec<&str> = plot.lines().collect();

    assert_eq!(lines[0], "····b");
    assert_eq!(lines[1], "·····");
    assert_eq!(lines[2], "a····");
    assert!(lines[3].contains("a (0.0, 0.0, 5.0)"));

    assert!(scatter_projection(&[], 5, 3).is_empty());
}

#[test]
fn test_insight_box() {
    let insight = insight_box("first\nsecond", "💡");
    assert!(insight.contains("💡"));
    assert!(insight.contains("     first\n"));
    assert!(insight.contains("     second\n"));
}
