//! llm-explainer: an animated walk through how a language model writes.
//!
//! This crate plays a scripted generation loop and the demonstrations that
//! go with it:
//! - A timer-driven, cancellable sequencer that walks tokenize → embed →
//!   transform → probabilities → sample for every token of a fixed response
//! - Temperature-scaled softmax and weighted sampling over authored logits
//! - Hand-authored demos: tokenization, embeddings, attention, analogies
//! - ASCII visualizers and a narrator for terminal output

pub mod config;
pub mod error;

pub mod demos;
pub mod educational;
pub mod sampling;
pub mod sequencer;

pub use config::{SamplingConfig, SequencerConfig, clamp_speed, clamp_temperature};
pub use error::{Error, Result};
pub use sampling::{Sampler, TemperatureBand, softmax_with_temperature};
pub use sequencer::{GenerationSequencer, GenerationState, ObserverId, Phase, SubStep};
