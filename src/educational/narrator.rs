//! Narrator mode - plain-English commentary while the generation loop plays.
//!
//! The narrator is fed [`GenerationState`] snapshots and writes only what
//! changed since the previous one: a new sub-step, a newly emitted token, a
//! pause, a reset, a speed change.

use std::io::Write;

use super::explanations::{ExplanationLevel, get_explanation};
use super::visualizers::{
    act_header, box_text, insight_box, pipeline_strip, progress_bar, token_sequence_box,
};
use crate::error::Result;
use crate::sequencer::{GenerationState, SubStep};

/// Configuration for narrator output.
#[derive(Debug, Clone)]
pub struct NarratorConfig {
    /// Show the five-stage strip on every sub-step.
    pub show_pipeline: bool,
    /// Show "WHY" insights during the first token.
    pub show_insights: bool,
    /// Verbosity level: 0=minimal, 1=normal, 2=detailed.
    pub verbosity: u8,
}

impl Default for NarratorConfig {
    fn default() -> Self {
        Self {
            show_pipeline: true,
            show_insights: true,
            verbosity: 2,
        }
    }
}

impl NarratorConfig {
    /// Tokens and run controls only.
    pub fn minimal() -> Self {
        Self {
            show_pipeline: false,
            show_insights: false,
            verbosity: 0,
        }
    }
}

/// Trait for narrator implementations.
pub trait Narrator {
    /// Called once before the first snapshot.
    fn on_start(&mut self, prompt: &str, total_tokens: usize) -> Result<()>;

    /// Called with every observed snapshot.
    fn on_state(&mut self, state: &GenerationState) -> Result<()>;
}

/// Explanation topic shown next to a sub-step.
fn topic_for(sub_step: SubStep) -> &'static str {
    match sub_step {
        SubStep::Tokenize => "tokenization",
        SubStep::Embed => "embedding",
        SubStep::Transform => "attention",
        SubStep::Probabilities => "probabilities",
        SubStep::Sample => "sampling",
    }
}

/// Writes commentary for generation snapshots to any [`Write`] sink.
pub struct GenerationNarrator<W: Write> {
    out: W,
    config: NarratorConfig,
    act_number: usize,
    last: Option<GenerationState>,
}

impl<W: Write> GenerationNarrator<W> {
    /// Create a narrator writing to `out`.
    pub fn new(out: W, config: NarratorConfig) -> Self {
        Self {
            out,
            config,
            act_number: 0,
            last: None,
        }
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{text}")?;
        Ok(())
    }

    fn act(&mut self, title: &str) -> Result<()> {
        self.act_number += 1;
        let header = act_header(self.act_number, title);
        self.line(&header)
    }

    fn insight(&mut self, topic: &str) -> Result<()> {
        if !self.config.show_insights {
            return Ok(());
        }
        if let Some(explanation) = get_explanation(topic) {
            let text = insight_box(explanation.get(ExplanationLevel::Why), "💡");
            self.line(&text)?;
        }
        Ok(())
    }

    fn narrate_sub_step(&mut self, state: &GenerationState, sub_step: SubStep) -> Result<()> {
        if self.config.show_pipeline {
            self.line(&format!("  {}", pipeline_strip(Some(sub_step))))?;
        }
        self.line(&format!(
            "  {} {}...",
            sub_step.icon(),
            sub_step.caption()
        ))?;
        if self.config.verbosity >= 2 && state.emitted_tokens.is_empty() {
            self.insight(topic_for(sub_step))?;
        }
        Ok(())
    }

    fn narrate_emitted(&mut self, state: &GenerationState, from: usize) -> Result<()> {
        for (i, token) in state.emitted_tokens.iter().enumerate().skip(from) {
            self.line(&format!("\n  🎲 Sampled: \"{token}\""))?;
            if self.config.verbosity >= 1 {
                let sequence = token_sequence_box(&state.emitted_tokens[..=i], Some(i), "Output: ");
                self.line(&sequence)?;
            }
        }
        let bar = progress_bar(
            state.num_emitted(),
            state.total_tokens,
            30,
            "  Progress: ",
            true,
        );
        self.line(&bar)
    }

    fn narrate_finished(&mut self, state: &GenerationState) -> Result<()> {
        self.act("GENERATION COMPLETE")?;
        let text = state.emitted_tokens.join(" ");
        self.line(&box_text(&text, "Generated Text", 65))?;
        if self.config.verbosity >= 1 {
            self.insight("generation_loop")?;
        }
        Ok(())
    }
}

impl<W: Write> Narrator for GenerationNarrator<W> {
    fn on_start(&mut self, prompt: &str, total_tokens: usize) -> Result<()> {
        self.act_number = 0;
        self.last = None;

        self.line(&format!("\n{}", "═".repeat(65)))?;
        self.line("  🎓 HOW AN LLM WRITES - one token at a time")?;
        self.line(&"═".repeat(65))?;
        self.line(&format!("\n📖 Prompt: \"{prompt}\""))?;
        self.line(&format!("🎯 Tokens to generate: {total_tokens}"))
    }

    fn on_state(&mut self, state: &GenerationState) -> Result<()> {
        let previous = self.last.replace(state.clone());
        let previous = match previous {
            Some(p) if &p == state => return Ok(()),
            Some(p) => p,
            None => GenerationState::new(state.total_tokens, state.speed_multiplier),
        };

        if state.speed_multiplier != previous.speed_multiplier {
            self.line(&format!("  ⏩ Speed: {:.1}×", state.speed_multiplier))?;
        }

        let was_reset = state.emitted_tokens.len() < previous.emitted_tokens.len()
            || (state.run_epoch != previous.run_epoch
                && !state.is_running
                && state.emitted_tokens.is_empty());
        if was_reset {
            self.line("\n  ↺ Reset: back to the prompt")?;
            self.act_number = 0;
            return Ok(());
        }

        if state.is_running && !previous.is_running {
            self.line(&format!("\n  ▶ Playing at {:.1}×", state.speed_multiplier))?;
        } else if !state.is_running && previous.is_running && !state.is_finished() {
            self.line("\n  ⏸ Paused")?;
        }

        if state.num_emitted() > previous.num_emitted() {
            self.narrate_emitted(state, previous.num_emitted())?;
            if state.is_finished() {
                return self.narrate_finished(state);
            }
        }

        if let Some(sub_step) = state.current_sub_step
            && (state.current_sub_step != previous.current_sub_step
                || state.run_epoch != previous.run_epoch)
        {
            if sub_step == SubStep::Tokenize {
                let title = format!("TOKEN #{}", state.num_emitted() + 1);
                self.act(&title)?;
            }
            self.narrate_sub_step(state, sub_step)?;
        }

        Ok(())
    }
}

/// A no-op narrator that doesn't write anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentNarrator;

impl Narrator for SilentNarrator {
    fn on_start(&mut self, _prompt: &str, _total_tokens: usize) -> Result<()> {
        Ok(())
    }

    fn on_state(&mut self, _state: &GenerationState) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_for_every_sub_step_exists() {
        for step in SubStep::ALL {
            assert!(get_explanation(topic_for(step)).is_some());
        }
    }
}
