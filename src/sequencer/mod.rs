//! Token-by-token generation loop simulator.
//!
//! This module provides:
//! - [`GenerationState`]: the snapshot handed to presentation code
//! - [`SubStep`]: the five pipeline phases walked for every token
//! - [`GenerationSequencer`]: play/pause/reset/speed controls over a
//!   cancellable timer chain

pub mod engine;
pub mod state;

pub use engine::{GenerationSequencer, Observer, ObserverId};
pub use state::{GenerationState, Phase, SubStep};
