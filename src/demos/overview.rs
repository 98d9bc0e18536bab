//! The five stages of turning a prompt into a next token.

use serde::Serialize;

use crate::sequencer::SubStep;

/// One stage card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProcessStep {
    pub id: usize,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

pub const PROCESS_STEPS: [ProcessStep; 5] = [
    ProcessStep {
        id: 1,
        title: "Tokenization",
        description: "Your text becomes pieces. Words and punctuation are split into tokens.",
        icon: "🔤",
    },
    ProcessStep {
        id: 2,
        title: "Embeddings",
        description: "Those pieces become meaningful vectors. Tokens get coordinates in semantic space.",
        icon: "🧠",
    },
    ProcessStep {
        id: 3,
        title: "Transformer",
        description: "Context gets processed through attention. The model focuses on relevant tokens.",
        icon: "🔄",
    },
    ProcessStep {
        id: 4,
        title: "Probabilities",
        description: "Every possible next token gets a score. The model produces a distribution.",
        icon: "📊",
    },
    ProcessStep {
        id: 5,
        title: "Sampling",
        description: "One token is selected, then it loops. The process repeats for each new token.",
        icon: "🎲",
    },
];

/// Stage card describing a generation sub-step.
pub fn step_for(sub_step: SubStep) -> &'static ProcessStep {
    &PROCESS_STEPS[sub_step.index()]
}
