//! Temperature sampling over a handful of logits.
//!
//! ## Sampling Pipeline
//!
//! ```text
//! Logits [n]
//!     │
//!     ▼ Temperature scaling
//! Logits / temperature
//!     │
//!     ▼ Softmax (max-shifted)
//! Probabilities
//!     │
//!     ▼ Weighted draw
//! Selected token
//! ```
//!
//! Low temperature sharpens the distribution so the top token dominates;
//! high temperature flattens it so unlikely tokens get a real chance.

use candle_core::{D, Device, Tensor};
use rand::SeedableRng;
use rand::distributions::Distribution;
use serde::Serialize;

use super::logits::{Logit, logit_values};
use crate::config::{SamplingConfig, clamp_temperature};
use crate::error::{Error, Result};

/// Convert logits to probabilities at `temperature`.
///
/// `temperature` must be positive and finite.
pub fn softmax_with_temperature(logits: &[f32], temperature: f32) -> Result<Vec<f32>> {
    if !(temperature.is_finite() && temperature > 0.0) {
        return Err(Error::Sampling(format!(
            "temperature must be positive, got {temperature}"
        )));
    }
    if logits.is_empty() {
        return Ok(Vec::new());
    }

    let logits = Tensor::new(logits, &Device::Cpu)?;
    let scaled = (logits / f64::from(temperature))?;
    let probs = candle_nn::ops::softmax(&scaled, D::Minus1)?;
    Ok(probs.to_vec1::<f32>()?)
}

/// Qualitative description of a temperature setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TemperatureBand {
    /// Below 0.4.
    Low,
    /// 0.4 up to 0.8.
    Medium,
    /// 0.8 and above.
    High,
}

impl TemperatureBand {
    /// Classify a temperature.
    pub fn from_temperature(temperature: f32) -> Self {
        if temperature < 0.4 {
            Self::Low
        } else if temperature < 0.8 {
            Self::Medium
        } else {
            Self::High
        }
    }

    /// Get the band label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// What sampling feels like in this band.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Low => "Predictable, consistent",
            Self::Medium => "Balanced exploration",
            Self::High => "Creative, varied",
        }
    }
}

/// Outcome of one draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampledToken {
    /// Index of the token in the logit table.
    pub index: usize,
    /// Token text.
    pub token: String,
    /// Probability the token had at the current temperature.
    pub probability: f32,
}

/// Token sampler with a configurable temperature.
#[derive(Debug, Clone)]
pub struct Sampler {
    /// Temperature for scaling logits.
    temperature: f32,
    /// Random number generator.
    rng: rand::rngs::StdRng,
}

impl Sampler {
    /// Creates a new sampler, seeded from the config or from entropy.
    pub fn new(config: &SamplingConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => rand::rngs::StdRng::seed_from_u64(seed),
            None => rand::rngs::StdRng::from_entropy(),
        };
        Self {
            temperature: clamp_temperature(config.temperature),
            rng,
        }
    }

    /// Creates a new sampler with a specific seed for reproducibility.
    pub fn with_seed(config: &SamplingConfig, seed: u64) -> Self {
        Self {
            temperature: clamp_temperature(config.temperature),
            rng: rand::rngs::StdRng::seed_from_u64(seed),
        }
    }

    /// Current temperature.
    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    /// Set temperature (clamped to `[0.1, 1.5]`). Returns the applied value.
    pub fn set_temperature(&mut self, temperature: f32) -> f32 {
        self.temperature = clamp_temperature(temperature);
        self.temperature
    }

    /// Band of the current temperature.
    pub fn band(&self) -> TemperatureBand {
        TemperatureBand::from_temperature(self.temperature)
    }

    /// Probabilities of `logits` at the current temperature.
    pub fn probabilities(&self, logits: &[Logit]) -> Result<Vec<f32>> {
        softmax_with_temperature(&logit_values(logits), self.temperature)
    }

    /// Draw one token from `logits`.
    pub fn sample(&mut self, logits: &[Logit]) -> Result<SampledToken> {
        let probs = self.probabilities(logits)?;
        let index = self.sample_index(&probs)?;
        Ok(SampledToken {
            index,
            token: logits[index].token.to_string(),
            probability: probs[index],
        })
    }

    /// Draw an index from a probability vector using the stored RNG.
    pub fn sample_index(&mut self, probs: &[f32]) -> Result<usize> {
        // Renormalize probabilities
        let sum: f32 = probs.iter().sum();
        if sum.is_nan() || sum <= 0.0 {
            return Err(Error::Sampling("distribution has no mass".into()));
        }
        let normalized: Vec<f64> = probs.iter().map(|&p| f64::from(p / sum)).collect();

        let dist = rand::distributions::WeightedIndex::new(&normalized)
            .map_err(|e| Error::Sampling(format!("failed to create distribution: {e}")))?;
        Ok(dist.sample(&mut self.rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_softmax_rejects_zero_temperature() {
        assert!(softmax_with_temperature(&[1.0, 2.0], 0.0).is_err());
        assert!(softmax_with_temperature(&[1.0, 2.0], f32::NAN).is_err());
    }

    #[test]
    fn test_softmax_empty() {
        assert!(softmax_with_temperature(&[], 1.0).unwrap().is_empty());
    }

    #[test]
    fn test_sample_index_rejects_empty_mass() {
        let mut sampler = Sampler::with_seed(&SamplingConfig::default(), 7);
        assert!(sampler.sample_index(&[0.0, 0.0]).is_err());
        assert!(sampler.sample_index(&[]).is_err());
    }

    #[test]
    fn test_temperature_bands() {
        assert_eq!(TemperatureBand::from_temperature(0.1), TemperatureBand::Low);
        assert_eq!(TemperatureBand::from_temperature(0.4), TemperatureBand::Medium);
        assert_eq!(TemperatureBand::from_temperature(0.8), TemperatureBand::High);
    }
}
