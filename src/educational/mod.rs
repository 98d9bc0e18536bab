//! Educational presentation of the generation loop and the demos.
//!
//! - [`explanations`]: per-topic text at several detail levels
//! - [`visualizers`]: ASCII bars, boxes, strips and projections
//! - [`narrator`]: commentary driven by sequencer snapshots
//!
//! ## Usage
//!
//! ```rust
//! use llm_explainer::educational::{GenerationNarrator, Narrator, NarratorConfig};
//! use llm_explainer::sequencer::GenerationState;
//!
//! let mut narrator = GenerationNarrator::new(Vec::new(), NarratorConfig::minimal());
//! narrator.on_start("What is Python", 6).unwrap();
//! narrator.on_state(&GenerationState::new(6, 1.0)).unwrap();
//! let text = String::from_utf8(narrator.into_inner()).unwrap();
//! assert!(text.contains("What is Python"));
//! ```

pub mod explanations;
pub mod narrator;
pub mod visualizers;

// Re-export main types
pub use explanations::{Explanation, ExplanationLevel, get_all_topics, get_explanation};
pub use narrator::{GenerationNarrator, Narrator, NarratorConfig, SilentNarrator};
pub use visualizers::{
    attention_bars, box_text, insight_box, pipeline_strip, probability_bars, progress_bar,
    scatter_projection, token_sequence_box,
};
