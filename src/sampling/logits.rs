//! Authored next-token scores for the context "What ### Python".

use serde::Serialize;

/// Raw (pre-softmax) score for one candidate token.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Logit {
    /// Candidate token text.
    pub token: &'static str,
    /// Unnormalised score.
    pub value: f32,
}

/// Context the logits were "produced" for.
pub const LOGIT_CONTEXT: &str = "What ### Python";

/// Ten candidate tokens, best first.
pub const BASE_LOGITS: [Logit; 10] = [
    Logit { token: "is", value: 2.5 },
    Logit { token: "really", value: 1.8 },
    Logit { token: "the", value: 1.2 },
    Logit { token: "a", value: 0.9 },
    Logit { token: "an", value: 0.5 },
    Logit { token: "was", value: 0.3 },
    Logit { token: "can", value: 0.1 },
    Logit { token: "will", value: -0.2 },
    Logit { token: "has", value: -0.5 },
    Logit { token: "does", value: -0.8 },
];

/// Scores of `logits` in order.
pub fn logit_values(logits: &[Logit]) -> Vec<f32> {
    logits.iter().map(|l| l.value).collect()
}
