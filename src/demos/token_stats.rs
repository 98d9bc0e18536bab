//! Tokens versus words: a counter that eases up to its target.

use std::time::Duration;

/// Context window size used in the comparison.
pub const CONTEXT_TOKENS: u64 = 4096;
/// Roughly how many English words fit in [`CONTEXT_TOKENS`].
pub const CONTEXT_WORDS: u64 = 3000;
/// Delay before the word count is revealed.
pub const REVEAL_DELAY: Duration = Duration::from_millis(2000);

/// Ease-out-quart: fast start, gentle landing.
pub fn ease_out_quart(progress: f32) -> f32 {
    let p = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(4)
}

/// Counter animating from 0 to `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterAnimation {
    pub target: u64,
    pub duration: Duration,
}

impl CounterAnimation {
    /// Counter over the default 1.5 s.
    pub fn new(target: u64) -> Self {
        Self {
            target,
            duration: Duration::from_millis(1500),
        }
    }

    /// Displayed value `elapsed` into the animation.
    pub fn value_at(&self, elapsed: Duration) -> u64 {
        if self.duration.is_zero() || elapsed >= self.duration {
            return self.target;
        }
        let progress = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        (self.target as f32 * ease_out_quart(progress)).round() as u64
    }

    /// Check if the animation has reached its target.
    pub fn is_done(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }
}

/// Words per token as a whole percentage.
pub fn word_ratio_percent() -> u32 {
    (CONTEXT_WORDS as f64 / CONTEXT_TOKENS as f64 * 100.0).round() as u32
}

/// Format with thousands separators, e.g. `4,096`.
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
