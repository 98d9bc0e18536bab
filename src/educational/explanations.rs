//! Educational text shown alongside each demonstration.
//!
//! Explanations are organized by topic and include multiple detail levels.

/// An educational explanation with multiple detail levels.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// One-line summary.
    pub short: &'static str,
    /// 2-3 sentence explanation.
    pub medium: &'static str,
    /// Full explanation with examples.
    pub detailed: &'static str,
    /// Why this matters / intuition.
    pub why: &'static str,
}

/// Detail level for explanations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplanationLevel {
    /// One-line summary.
    Short,
    /// 2-3 sentence explanation.
    Medium,
    /// Full explanation with examples.
    Detailed,
    /// Why this matters / intuition.
    Why,
}

impl Explanation {
    /// Get the explanation at the specified detail level.
    pub fn get(&self, level: ExplanationLevel) -> &'static str {
        match level {
            ExplanationLevel::Short => self.short,
            ExplanationLevel::Medium => self.medium,
            ExplanationLevel::Detailed => self.detailed,
            ExplanationLevel::Why => self.why,
        }
    }
}

// =============================================================================
// TOKENIZATION
// =============================================================================

pub const TOKENIZATION_EXPLANATION: Explanation = Explanation {
    short: "Your text becomes pieces called tokens.",
    medium: "A model never sees letters. Text is cut into tokens (whole words, \
word pieces, or punctuation) and every token is replaced by its ID in a fixed \
vocabulary.",
    detailed: "Tokenization is the first step of every request:
- Common words are one token: \"the\", \"love\"
- Rare or long words are split: \"programming\" may become \"program\" + \"ming\"
- Punctuation usually gets its own token: \".\", \"!\"

Because pieces are shorter than words, a budget of 4,096 tokens holds only \
about 3,000 English words.",
    why: "WHY TOKENS? A fixed vocabulary of pieces can spell any text, even \
words the model never saw, while keeping the input a short list of numbers.",
};

// =============================================================================
// EMBEDDING
// =============================================================================

pub const EMBEDDING_EXPLANATION: Explanation = Explanation {
    short: "Each token becomes a point in meaning-space.",
    medium: "Every token ID selects a learned vector. Tokens used in similar \
contexts end up with nearby vectors, so distance becomes a measure of \
similarity.",
    detailed: "Real embeddings have thousands of dimensions; this demo uses three:
- \"Python\" sits beside \"JavaScript\" and \"Java\"
- \"python (snake)\" sits beside \"cobra\", far from the languages
- Directions carry meaning too: king − man + woman lands near queen",
    why: "WHY VECTORS? Arithmetic on vectors lets the network compare, mix and \
shift meanings. An ID like 5421 says nothing; a position says a lot.",
};

// =============================================================================
// ATTENTION
// =============================================================================

pub const ATTENTION_EXPLANATION: Explanation = Explanation {
    short: "Each token decides which earlier tokens matter to it.",
    medium: "Inside the transformer every token scores every earlier token and \
blends in information from the high scorers. That is how \"it\" can find out \
what it refers to.",
    detailed: "In \"The cat sat on the mat because it was tired\":
- \"it\" puts 78% of its attention on \"cat\"
- only 12% on \"mat\"
- 45% on \"tired\", the word that describes it

Living things get tired, mats do not. The model picked this up from millions \
of sentences where pronouns refer to animate subjects.",
    why: "WHY ATTENTION? Meaning depends on context. Attention lets each token \
rewrite its own vector using exactly the context it needs.",
};

// =============================================================================
// PROBABILITIES
// =============================================================================

pub const PROBABILITIES_EXPLANATION: Explanation = Explanation {
    short: "Every possible next token gets a score.",
    medium: "The last layer produces one score (logit) per vocabulary entry. \
Softmax turns the scores into probabilities that add up to one.",
    detailed: "For \"What ### Python\" the top candidates are:
- \"is\" 23%
- \"really\" 14%
- \"the\" 9%
...followed by ~128,000 more tokens sharing what is left.

softmax(x)_i = exp(x_i) / Σ_j exp(x_j)",
    why: "WHY A DISTRIBUTION? The model does not decide; it describes how \
likely each continuation is. Choosing is a separate step.",
};

// =============================================================================
// SAMPLING
// =============================================================================

pub const SAMPLING_EXPLANATION: Explanation = Explanation {
    short: "One token is drawn from the distribution.",
    medium: "A weighted random draw picks the next token: a 23% token wins \
about one time in four. The chosen token is appended and the whole pipeline \
runs again.",
    detailed: "Sampling is like spinning a wheel whose slices are sized by \
probability. Running it twice on the same prompt can give different text, \
which is why chat answers vary between attempts.",
    why: "WHY NOT ALWAYS PICK THE TOP TOKEN? Always taking the most likely \
token produces repetitive, flat text. A little randomness reads as natural.",
};

// =============================================================================
// TEMPERATURE
// =============================================================================

pub const TEMPERATURE_EXPLANATION: Explanation = Explanation {
    short: "Temperature sharpens or flattens the distribution.",
    medium: "Logits are divided by the temperature before softmax. Low \
temperature makes the favourite dominate; high temperature gives unlikely \
tokens a real chance.",
    detailed: "p_i = exp(x_i / T) / Σ_j exp(x_j / T)
- T = 0.1: almost always \"is\"
- T = 0.7: mostly \"is\", sometimes \"really\" or \"the\"
- T = 1.5: a much flatter spread",
    why: "WHY A KNOB? Code completion wants predictability, brainstorming \
wants variety. One number trades between them.",
};

// =============================================================================
// GENERATION LOOP
// =============================================================================

pub const GENERATION_LOOP_EXPLANATION: Explanation = Explanation {
    short: "Text is generated one token at a time.",
    medium: "Each new token requires running the entire pipeline: tokenize, \
embed, transform, score, sample. The sampled token joins the context and the \
loop starts over.",
    detailed: "Answering \"What is Python\" with six tokens means six full \
passes:
  Python → is → a → high-level → programming → language
Each pass sees everything generated so far.",
    why: "WHY IS GENERATION SLOW? Tokens depend on each other, so they cannot \
be produced in parallel. Longer outputs mean more passes.",
};

const TOPICS: &[&str] = &[
    "tokenization",
    "embedding",
    "attention",
    "probabilities",
    "sampling",
    "temperature",
    "generation_loop",
];

/// Get explanation for a topic.
pub fn get_explanation(topic: &str) -> Option<&'static Explanation> {
    match topic {
        "tokenization" => Some(&TOKENIZATION_EXPLANATION),
        "embedding" => Some(&EMBEDDING_EXPLANATION),
        "attention" => Some(&ATTENTION_EXPLANATION),
        "probabilities" => Some(&PROBABILITIES_EXPLANATION),
        "sampling" => Some(&SAMPLING_EXPLANATION),
        "temperature" => Some(&TEMPERATURE_EXPLANATION),
        "generation_loop" => Some(&GENERATION_LOOP_EXPLANATION),
        _ => None,
    }
}

/// Get all available explanation topics.
pub fn get_all_topics() -> &'static [&'static str] {
    TOPICS
}
