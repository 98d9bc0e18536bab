//! Authored next-token distribution for "What ### Python".

use serde::Serialize;

/// One ranked candidate for the masked position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Probability {
    pub token: &'static str,
    pub probability: f32,
    pub rank: usize,
}

/// Context with the position being predicted masked out.
pub const CONTEXT: &str = "What ### Python";

/// Number of vocabulary entries not shown in [`PROBABILITIES`].
pub const REMAINING_TOKENS: usize = 127_990;

/// Top ten candidates, most likely first.
pub const PROBABILITIES: [Probability; 10] = [
    Probability { token: "is", probability: 0.23, rank: 1 },
    Probability { token: "really", probability: 0.14, rank: 2 },
    Probability { token: "the", probability: 0.09, rank: 3 },
    Probability { token: "a", probability: 0.07, rank: 4 },
    Probability { token: "an", probability: 0.05, rank: 5 },
    Probability { token: "was", probability: 0.04, rank: 6 },
    Probability { token: "can", probability: 0.03, rank: 7 },
    Probability { token: "will", probability: 0.02, rank: 8 },
    Probability { token: "has", probability: 0.015, rank: 9 },
    Probability { token: "does", probability: 0.01, rank: 10 },
];

/// Highest probability in the table.
pub fn max_probability() -> f32 {
    PROBABILITIES
        .iter()
        .map(|p| p.probability)
        .fold(0.0, f32::max)
}

/// Bar width relative to the most likely candidate, in `[0, 1]`.
pub fn relative_width(probability: f32) -> f32 {
    let max = max_probability();
    if max == 0.0 { 0.0 } else { probability / max }
}

/// "1 in N" odds for a probability; `None` for zero or negative input.
pub fn one_in(probability: f32) -> Option<u32> {
    if probability > 0.0 {
        Some((1.0 / probability).round() as u32)
    } else {
        None
    }
}

/// Look up a candidate by token text.
pub fn find(token: &str) -> Option<&'static Probability> {
    PROBABILITIES.iter().find(|p| p.token == token)
}

/// Probability mass covered by the shown candidates.
pub fn shown_mass() -> f32 {
    PROBABILITIES.iter().map(|p| p.probability).sum()
}
