//! Next-token probabilities and sampling.

pub mod logits;
pub mod sampler;

pub use logits::{BASE_LOGITS, LOGIT_CONTEXT, Logit, logit_values};
pub use sampler::{SampledToken, Sampler, TemperatureBand, softmax_with_temperature};
