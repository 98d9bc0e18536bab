//! Configuration types for llm-explainer.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Slowest playback speed offered by the speed control.
pub const MIN_SPEED: f32 = 0.5;
/// Fastest playback speed offered by the speed control.
pub const MAX_SPEED: f32 = 3.0;
/// Granularity of the speed control.
pub const SPEED_STEP: f32 = 0.5;
/// Speed used at startup and for non-finite input.
pub const DEFAULT_SPEED: f32 = 1.0;

/// Lowest temperature offered by the sampling demo.
pub const MIN_TEMPERATURE: f32 = 0.1;
/// Highest temperature offered by the sampling demo.
pub const MAX_TEMPERATURE: f32 = 1.5;
/// Granularity of the temperature control.
pub const TEMPERATURE_STEP: f32 = 0.05;
/// Temperature used at startup and for non-finite input.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Snap `value` onto the `[min, max]` grid with spacing `step`.
///
/// Non-finite input fails closed to `fallback`.
fn clamp_to_grid(value: f32, min: f32, max: f32, step: f32, fallback: f32) -> f32 {
    if !value.is_finite() {
        return fallback;
    }
    let (low, step) = (f64::from(min), f64::from(step));
    let steps = ((f64::from(value.clamp(min, max)) - low) / step).round();
    // Snap off accumulated float error so grid points equal their literals.
    let snapped = ((low + steps * step) * 1e6).round() / 1e6;
    (snapped as f32).min(max)
}

/// Clamp a requested playback speed to `[0.5, 3.0]` in steps of `0.5`.
///
/// Out-of-range values go to the nearest bound, in-range values to the
/// nearest step, and NaN or infinities to [`DEFAULT_SPEED`].
///
/// ```
/// use llm_explainer::config::clamp_speed;
///
/// assert_eq!(clamp_speed(10.0), 3.0);
/// assert_eq!(clamp_speed(0.0), 0.5);
/// assert_eq!(clamp_speed(1.3), 1.5);
/// assert_eq!(clamp_speed(f32::NAN), 1.0);
/// ```
pub fn clamp_speed(value: f32) -> f32 {
    clamp_to_grid(value, MIN_SPEED, MAX_SPEED, SPEED_STEP, DEFAULT_SPEED)
}

/// Clamp a requested temperature to `[0.1, 1.5]` in steps of `0.05`.
pub fn clamp_temperature(value: f32) -> f32 {
    clamp_to_grid(
        value,
        MIN_TEMPERATURE,
        MAX_TEMPERATURE,
        TEMPERATURE_STEP,
        DEFAULT_TEMPERATURE,
    )
}

/// Generation loop configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequencerConfig {
    /// Prompt shown ahead of the generated tokens.
    pub prompt: String,
    /// Fixed response the simulation "generates", one token per cycle.
    pub response: Vec<String>,
    /// Duration of one sub-step at 1x speed, in milliseconds.
    pub base_step_ms: u64,
    /// Fixed settle gap added to the pause after each appended token, in milliseconds.
    pub settle_gap_ms: u64,
    /// Initial speed multiplier.
    pub default_speed: f32,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            prompt: "What is Python".to_string(),
            response: ["Python", "is", "a", "high-level", "programming", "language"]
                .iter()
                .map(|t| t.to_string())
                .collect(),
            base_step_ms: 800,
            settle_gap_ms: 200,
            default_speed: DEFAULT_SPEED,
        }
    }
}

impl SequencerConfig {
    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the sequencer cannot play.
    pub fn validate(&self) -> Result<()> {
        if self.base_step_ms == 0 {
            return Err(Error::Config("base_step_ms must be positive".into()));
        }
        if self.response.iter().any(|t| t.is_empty()) {
            return Err(Error::Config("response tokens must not be empty".into()));
        }
        Ok(())
    }

    /// Set the response tokens.
    pub fn with_response<I, S>(mut self, response: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.response = response.into_iter().map(Into::into).collect();
        self
    }

    /// Set the initial speed multiplier.
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.default_speed = speed;
        self
    }

    /// Sub-step duration at 1x speed.
    pub fn base_step_duration(&self) -> Duration {
        Duration::from_millis(self.base_step_ms)
    }

    /// Fixed part of the inter-token pause.
    pub fn settle_gap(&self) -> Duration {
        Duration::from_millis(self.settle_gap_ms)
    }

    /// Prompt split into display tokens.
    pub fn prompt_tokens(&self) -> Vec<String> {
        self.prompt.split_whitespace().map(str::to_string).collect()
    }
}

/// Sampling demo configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Temperature for scaling logits.
    pub temperature: f32,
    /// Seed for reproducible draws (`None` = from entropy).
    pub seed: Option<u64>,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            seed: None,
        }
    }
}

impl SamplingConfig {
    /// Set the temperature (clamped to the supported range).
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = clamp_temperature(temperature);
        self
    }

    /// Set a seed for reproducible draws.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_grid() {
        assert_eq!(clamp_speed(0.5), 0.5);
        assert_eq!(clamp_speed(1.0), 1.0);
        assert_eq!(clamp_speed(2.74), 2.5);
        assert_eq!(clamp_speed(2.76), 3.0);
        assert_eq!(clamp_speed(-4.0), MIN_SPEED);
        assert_eq!(clamp_speed(f32::INFINITY), DEFAULT_SPEED);
    }

    #[test]
    fn test_temperature_grid() {
        assert_eq!(clamp_temperature(0.72), 0.7);
        assert_eq!(clamp_temperature(0.7), DEFAULT_TEMPERATURE);
        assert_eq!(clamp_temperature(0.0), MIN_TEMPERATURE);
        assert_eq!(clamp_temperature(9.0), MAX_TEMPERATURE);
        assert_eq!(clamp_temperature(f32::NAN), DEFAULT_TEMPERATURE);
    }

    #[test]
    fn test_validate_rejects_zero_step() {
        let config = SequencerConfig {
            base_step_ms: 0,
            ..SequencerConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
