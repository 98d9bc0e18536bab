//! ASCII art generators for educational visualizations.
//!
//! Everything here returns a `String`; nothing prints. The narrator and the
//! CLI decide where the text goes.

use crate::demos::Point3;
use crate::demos::attention::{AttentionWeight, is_high_attention};
use crate::sequencer::SubStep;

/// Unicode block characters for different intensities.
const BLOCKS: [char; 5] = [' ', '░', '▒', '▓', '█'];

/// Convert a value [0, max_val] to a block character.
fn intensity_to_block(value: f32, max_val: f32) -> char {
    if max_val <= 0.0 {
        return BLOCKS[0];
    }
    let normalized = (value / max_val).clamp(0.0, 1.0);
    let idx = (normalized * (BLOCKS.len() - 1) as f32) as usize;
    BLOCKS[idx.min(BLOCKS.len() - 1)]
}

/// Filled/empty bar for `done` out of `total`.
///
/// # Arguments
///
/// * `done` - Completed units
/// * `total` - Total units
/// * `width` - Bar width in characters
/// * `label` - Label prefix
/// * `show_percentage` - Show percentage at end
pub fn progress_bar(
    done: usize,
    total: usize,
    width: usize,
    label: &str,
    show_percentage: bool,
) -> String {
    let pct = if total == 0 {
        0.0
    } else {
        (done as f32 / total as f32).min(1.0)
    };

    let filled = ((pct * width as f32) as usize).min(width);
    let empty = width - filled;

    let bar = format!("{}{}", "█".repeat(filled), "░".repeat(empty));

    let mut result = format!("{label}{bar}");
    if show_percentage {
        result.push_str(&format!(" {:.0}%", pct * 100.0));
    }

    result
}

/// Generate probability distribution bars, highest first.
///
/// # Arguments
///
/// * `rows` - `(label, probability)` pairs
/// * `max_width` - Bar width for a probability of 1.0
/// * `top_k` - Number of top items to show
pub fn probability_bars(rows: &[(&str, f32)], max_width: usize, top_k: usize) -> String {
    let mut items: Vec<(&str, f32)> = rows.to_vec();
    items.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    items.truncate(top_k);

    let max_label_len = items
        .iter()
        .map(|(l, _)| l.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines = Vec::with_capacity(items.len() + 2);
    let border_len = max_label_len + 2;
    lines.push(format!("┌{}┬{}┐", "─".repeat(border_len), "─".repeat(10)));
    for (label, prob) in &items {
        let bar_len = (prob.clamp(0.0, 1.0) * max_width as f32).round() as usize;
        lines.push(format!(
            "│ {label:max_label_len$} │ {:5.1}%  {}",
            prob * 100.0,
            "█".repeat(bar_len)
        ));
    }
    lines.push(format!("└{}┴{}┘", "─".repeat(border_len), "─".repeat(10)));

    lines.join("\n")
}

/// Display tokens in a box with optional highlighting.
///
/// # Arguments
///
/// * `tokens` - Token strings
/// * `highlight_idx` - Index of token to wrap in brackets
/// * `prefix` - Text placed before the tokens
pub fn token_sequence_box(tokens: &[String], highlight_idx: Option<usize>, prefix: &str) -> String {
    let body = if tokens.is_empty() {
        "(empty)".to_string()
    } else {
        tokens
            .iter()
            .enumerate()
            .map(|(i, tok)| {
                if highlight_idx == Some(i) {
                    format!("[{tok}]")
                } else {
                    tok.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(" · ")
    };

    let content = format!("{prefix}{body}");
    let width = content.chars().count().max(40);
    format!(
        "╭{bar}╮\n│ {content:width$} │\n╰{bar}╯",
        bar = "─".repeat(width + 2)
    )
}

/// One-line strip of the five stages with the active one bracketed.
///
/// ```
/// use llm_explainer::educational::visualizers::pipeline_strip;
/// use llm_explainer::sequencer::SubStep;
///
/// let strip = pipeline_strip(Some(SubStep::Embed));
/// assert!(strip.contains("[🧠 Embed]"));
/// ```
pub fn pipeline_strip(active: Option<SubStep>) -> String {
    SubStep::ALL
        .iter()
        .map(|step| {
            let cell = format!("{} {}", step.icon(), step.label());
            if active == Some(*step) {
                format!("[{cell}]")
            } else {
                format!(" {cell} ")
            }
        })
        .collect::<Vec<_>>()
        .join("→")
}

/// Horizontal attention bars from the focus word to every word in the sentence.
pub fn attention_bars(weights: &[AttentionWeight], focus: usize, width: usize) -> String {
    let label_width = weights
        .iter()
        .map(|w| w.word.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines = Vec::with_capacity(weights.len());
    for w in weights {
        let marker = if w.position == focus {
            "◆"
        } else if is_high_attention(w.weight) {
            "★"
        } else {
            " "
        };
        let block = intensity_to_block(w.weight, 1.0);
        let len = ((w.weight.clamp(0.0, 1.0) * width as f32).round() as usize).min(width);
        let bar: String = std::iter::repeat_n(block, len)
            .chain(std::iter::repeat_n(' ', width - len))
            .collect();
        lines.push(format!(
            "{marker} {:label_width$} {bar} {:3.0}%",
            w.word,
            w.weight * 100.0
        ));
    }
    lines.join("\n")
}

/// Create an act header for a narrated section.
pub fn act_header(act_num: usize, title: &str) -> String {
    format!(
        "\n🎬 ACT {act_num}: {title}\n┌{bar}┐\n│ {title:59} │\n└{bar}┘",
        bar = "─".repeat(61)
    )
}

/// Create an insight/tip box.
pub fn insight_box(text: &str, emoji: &str) -> String {
    let mut result = format!("\n  {emoji} \n");
    for line in text.lines() {
        result.push_str(&format!("     {line}\n"));
    }
    result
}

/// Create a box around text, wrapping lines longer than the box.
pub fn box_text(text: &str, title: &str, width: usize) -> String {
    let title_part = if title.is_empty() {
        String::new()
    } else {
        format!(" {title} ")
    };
    let width = width.max(title_part.chars().count() + 4).max(8);
    let content_width = width - 4;

    let mut result = Vec::new();

    let remaining = width - 2 - title_part.chars().count();
    let left = remaining / 2;
    result.push(format!(
        "┌{}{}{}┐",
        "─".repeat(left),
        title_part,
        "─".repeat(remaining - left)
    ));

    for line in text.lines() {
        let chars: Vec<char> = line.chars().collect();
        if chars.is_empty() {
            result.push(format!("│ {:content_width$} │", ""));
            continue;
        }
        for chunk in chars.chunks(content_width) {
            let chunk: String = chunk.iter().collect();
            result.push(format!("│ {chunk:content_width$} │"));
        }
    }

    result.push(format!("└{}┘", "─".repeat(width - 2)));

    result.join("\n")
}

/// Project labelled 3D points onto the x/y plane as a character grid.
///
/// Each point is drawn as the first character of its label; the full labels
/// are listed underneath. Depth (z) is ignored.
pub fn scatter_projection(points: &[(&str, Point3)], width: usize, height: usize) -> String {
    if points.is_empty() || width < 2 || height < 2 {
        return String::new();
    }

    let (mut min_x, mut max_x, mut min_y, mut max_y) = (f32::MAX, f32::MIN, f32::MAX, f32::MIN);
    for (_, p) in points {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }
    let span_x = (max_x - min_x).max(f32::EPSILON);
    let span_y = (max_y - min_y).max(f32::EPSILON);

    let mut grid = vec![vec!['·'; width]; height];
    for (label, p) in points {
        let col = (((p.x - min_x) / span_x) * (width - 1) as f32).round() as usize;
        // y grows upwards
        let row = (((max_y - p.y) / span_y) * (height - 1) as f32).round() as usize;
        let mark = label.chars().next().unwrap_or('*');
        grid[row.min(height - 1)][col.min(width - 1)] = mark;
    }

    let mut lines: Vec<String> = grid.into_iter().map(|row| row.into_iter().collect()).collect();
    let legend = points
        .iter()
        .map(|(label, p)| format!("{label} ({:.1}, {:.1}, {:.1})", p.x, p.y, p.z))
        .collect::<Vec<_>>()
        .join(", ");
    lines.push(legend);
    lines.join("\n")
}
