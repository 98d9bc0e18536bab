//! Observable state of the generation loop.
//!
//! A [`GenerationState`] is what the presentation layer sees: the tokens
//! emitted so far, the pipeline sub-step currently on display, and the
//! run controls. Snapshots are handed out by value and never written back.

use serde::Serialize;

/// One phase of the per-token pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubStep {
    /// Splitting the context into tokens.
    Tokenize,
    /// Looking up a vector for each token.
    Embed,
    /// Running the vectors through attention layers.
    Transform,
    /// Scoring every candidate next token.
    Probabilities,
    /// Drawing the next token from the distribution.
    Sample,
}

impl SubStep {
    /// All sub-steps in pipeline order.
    pub const ALL: [SubStep; 5] = [
        SubStep::Tokenize,
        SubStep::Embed,
        SubStep::Transform,
        SubStep::Probabilities,
        SubStep::Sample,
    ];

    /// Number of sub-steps walked for every token.
    pub const COUNT: usize = Self::ALL.len();

    /// Position of this sub-step in [`SubStep::ALL`].
    pub fn index(&self) -> usize {
        match self {
            Self::Tokenize => 0,
            Self::Embed => 1,
            Self::Transform => 2,
            Self::Probabilities => 3,
            Self::Sample => 4,
        }
    }

    /// Get the sub-step name as a static string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tokenize => "tokenize",
            Self::Embed => "embed",
            Self::Transform => "transform",
            Self::Probabilities => "probabilities",
            Self::Sample => "sample",
        }
    }

    /// Capitalized label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Tokenize => "Tokenize",
            Self::Embed => "Embed",
            Self::Transform => "Transform",
            Self::Probabilities => "Probabilities",
            Self::Sample => "Sample",
        }
    }

    /// Get emoji for the sub-step.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Tokenize => "🔤",
            Self::Embed => "🧠",
            Self::Transform => "🔄",
            Self::Probabilities => "📊",
            Self::Sample => "🎲",
        }
    }

    /// Short caption of what happens during the sub-step.
    pub fn caption(&self) -> &'static str {
        match self {
            Self::Tokenize => "Splitting into tokens",
            Self::Embed => "Converting to vectors",
            Self::Transform => "Processing through attention",
            Self::Probabilities => "Calculating next token scores",
            Self::Sample => "Selecting token from distribution",
        }
    }
}

/// Explicit state-machine view of a [`GenerationState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Not advancing. Either fresh, paused, or reset.
    Idle,
    /// Advancing; `sub_step_index` is `None` during the inter-token pause.
    Running {
        sub_step_index: Option<usize>,
        token_index: usize,
    },
    /// Every target token has been emitted.
    Finished,
}

/// Snapshot of the generation loop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationState {
    /// Tokens emitted so far, in order.
    pub emitted_tokens: Vec<String>,
    /// Sub-step currently on display.
    pub current_sub_step: Option<SubStep>,
    /// Whether the loop is advancing.
    pub is_running: bool,
    /// Divisor applied to the base step duration.
    pub speed_multiplier: f32,
    /// Identifier of the current run attempt.
    pub run_epoch: u64,
    /// Length of the target response.
    pub total_tokens: usize,
}

impl GenerationState {
    /// Fresh idle state for a response of `total_tokens` tokens.
    pub fn new(total_tokens: usize, speed_multiplier: f32) -> Self {
        Self {
            emitted_tokens: Vec::new(),
            current_sub_step: None,
            is_running: false,
            speed_multiplier,
            run_epoch: 0,
            total_tokens,
        }
    }

    /// Number of emitted tokens.
    pub fn num_emitted(&self) -> usize {
        self.emitted_tokens.len()
    }

    /// Check if every target token has been emitted.
    pub fn is_finished(&self) -> bool {
        self.emitted_tokens.len() >= self.total_tokens
    }

    /// Fraction of the response emitted, in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.total_tokens == 0 {
            return 1.0;
        }
        self.emitted_tokens.len() as f32 / self.total_tokens as f32
    }

    /// State-machine phase derived from the snapshot.
    pub fn phase(&self) -> Phase {
        if self.is_finished() {
            Phase::Finished
        } else if self.is_running {
            Phase::Running {
                sub_step_index: self.current_sub_step.map(|s| s.index()),
                token_index: self.emitted_tokens.len(),
            }
        } else {
            Phase::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sub_step_order() {
        for (i, step) in SubStep::ALL.iter().enumerate() {
            assert_eq!(step.index(), i);
        }
        assert_eq!(SubStep::COUNT, 5);
    }

    #[test]
    fn test_phase_derivation() {
        let mut state = GenerationState::new(2, 1.0);
        assert_eq!(state.phase(), Phase::Idle);

        state.is_running = true;
        state.current_sub_step = Some(SubStep::Embed);
        assert_eq!(
            state.phase(),
            Phase::Running {
                sub_step_index: Some(1),
                token_index: 0
            }
        );

        state.is_running = false;
        state.current_sub_step = None;
        state.emitted_tokens = vec!["a".into(), "b".into()];
        assert_eq!(state.phase(), Phase::Finished);
        assert_eq!(state.progress(), 1.0);
    }
}
