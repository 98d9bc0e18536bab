//! Authored attention of "it" over "The cat sat on the mat because it was tired".
//!
//! The weights show coreference: the pronoun attends mostly to "cat"
//! and barely to "mat".

use serde::Serialize;

/// Attention weight the focus word assigns to one position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AttentionWeight {
    pub word: &'static str,
    pub weight: f32,
    pub position: usize,
}

/// Index of the focus word ("it").
pub const TARGET_INDEX: usize = 7;

/// Arcs below this weight are not drawn.
pub const MIN_ARC_WEIGHT: f32 = 0.05;

/// Weights above this are emphasised.
pub const HIGH_ATTENTION: f32 = 0.5;

pub const ATTENTION_DATA: [AttentionWeight; 10] = [
    AttentionWeight { word: "The", weight: 0.02, position: 0 },
    AttentionWeight { word: "cat", weight: 0.78, position: 1 },
    AttentionWeight { word: "sat", weight: 0.03, position: 2 },
    AttentionWeight { word: "on", weight: 0.01, position: 3 },
    AttentionWeight { word: "the", weight: 0.02, position: 4 },
    AttentionWeight { word: "mat", weight: 0.12, position: 5 },
    AttentionWeight { word: "because", weight: 0.01, position: 6 },
    AttentionWeight { word: "it", weight: 1.0, position: 7 },
    AttentionWeight { word: "was", weight: 0.01, position: 8 },
    AttentionWeight { word: "tired", weight: 0.45, position: 9 },
];

/// The focus word.
pub fn target() -> &'static AttentionWeight {
    &ATTENTION_DATA[TARGET_INDEX]
}

/// Check if a weight counts as high attention.
pub fn is_high_attention(weight: f32) -> bool {
    weight > HIGH_ATTENTION
}

/// Curve from the focus word to another word.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AttentionArc {
    /// Position of the attended word.
    pub to: usize,
    pub word: &'static str,
    pub weight: f32,
    /// Drawn thick and highlighted.
    pub emphasized: bool,
    /// How far the curve's control point rises above the words.
    pub lift: f32,
    pub opacity: f32,
}

/// Arcs from the focus word to every other word weighing at least `min_weight`.
pub fn arcs(min_weight: f32) -> Vec<AttentionArc> {
    ATTENTION_DATA
        .iter()
        .filter(|w| w.position != TARGET_INDEX && w.weight >= min_weight)
        .map(|w| AttentionArc {
            to: w.position,
            word: w.word,
            weight: w.weight,
            emphasized: is_high_attention(w.weight),
            lift: 30.0 + w.weight * 40.0,
            opacity: 0.3 + w.weight * 0.7,
        })
        .collect()
}

/// Word the focus attends to most, excluding itself.
pub fn strongest_referent() -> Option<&'static AttentionWeight> {
    ATTENTION_DATA
        .iter()
        .filter(|w| w.position != TARGET_INDEX)
        .max_by(|a, b| a.weight.total_cmp(&b.weight))
}

/// The full sentence.
pub fn sentence() -> String {
    ATTENTION_DATA
        .iter()
        .map(|w| w.word)
        .collect::<Vec<_>>()
        .join(" ")
}
