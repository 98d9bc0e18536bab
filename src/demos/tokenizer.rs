//! Toy tokenizer for showing how text becomes pieces.
//!
//! This is not BPE. Words are split on whitespace and punctuation is
//! peeled off into its own tokens; long or hyphenated words are flagged
//! as sub-words to hint that a real tokenizer would break them further.

use serde::Serialize;

/// Characters split out as their own tokens.
pub const PUNCTUATION: [char; 10] = ['.', ',', '!', '?', ';', ':', '\'', '"', '(', ')'];

/// Size of the pretend vocabulary IDs are drawn from.
pub const DEMO_VOCAB_SIZE: u32 = 50_000;

/// Words of at least this many characters count as sub-words.
const SUBWORD_MIN_CHARS: usize = 9;

/// Kind of a demo token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// A whole, common word.
    Word,
    /// A long or hyphenated word a real tokenizer would split.
    Subword,
    /// A single punctuation mark.
    Punctuation,
}

impl TokenKind {
    /// Get the kind name as a static string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Word => "word",
            Self::Subword => "subword",
            Self::Punctuation => "punctuation",
        }
    }
}

/// One token produced by [`tokenize`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DemoToken {
    /// Pretend vocabulary ID.
    pub id: u32,
    /// Token text.
    pub text: String,
    /// Token kind.
    pub kind: TokenKind,
}

/// Authored token with a fixed vocabulary ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TokenData {
    /// Token text.
    pub text: &'static str,
    /// Vocabulary ID.
    pub id: u32,
}

/// Sentence tokenized in [`SAMPLE_TOKENS`].
pub const SAMPLE_SENTENCE: &str = "I love programming. It's awesome.";

/// Authored tokenization of [`SAMPLE_SENTENCE`].
pub const SAMPLE_TOKENS: [TokenData; 8] = [
    TokenData { text: "I", id: 40 },
    TokenData { text: "love", id: 1337 },
    TokenData { text: "programming", id: 5421 },
    TokenData { text: ".", id: 13 },
    TokenData { text: "It", id: 712 },
    TokenData { text: "'s", id: 89 },
    TokenData { text: "awesome", id: 8432 },
    TokenData { text: ".", id: 13 },
];

/// Default text for the interactive tokenizer.
pub const DEFAULT_INPUT: &str = "I love programming. It is awesome!";

fn is_punctuation(c: char) -> bool {
    PUNCTUATION.contains(&c)
}

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Pretend ID for a token's text: 64-bit FNV-1a of the UTF-8 bytes,
/// reduced modulo [`DEMO_VOCAB_SIZE`]. Identical on every build and platform.
pub fn demo_token_id(text: &str) -> u32 {
    let hash = text.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
    });
    (hash % u64::from(DEMO_VOCAB_SIZE)) as u32
}

/// Classify a non-empty token piece.
pub fn classify(piece: &str) -> TokenKind {
    let mut chars = piece.chars();
    if let (Some(c), None) = (chars.next(), chars.next())
        && is_punctuation(c)
    {
        return TokenKind::Punctuation;
    }
    if piece.chars().count() >= SUBWORD_MIN_CHARS || piece.contains('-') {
        TokenKind::Subword
    } else {
        TokenKind::Word
    }
}

/// Split one whitespace-free word around punctuation, keeping the marks.
fn split_word(word: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    for (i, c) in word.char_indices() {
        if is_punctuation(c) {
            if start < i {
                parts.push(&word[start..i]);
            }
            let end = i + c.len_utf8();
            parts.push(&word[i..end]);
            start = end;
        }
    }
    if start < word.len() {
        parts.push(&word[start..]);
    }
    parts
}

/// Tokenize `text` for display.
///
/// ```
/// use llm_explainer::demos::tokenizer::{TokenKind, tokenize};
///
/// let tokens = tokenize("Hello, world!");
/// let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
/// assert_eq!(texts, ["Hello", ",", "world", "!"]);
/// assert_eq!(tokens[1].kind, TokenKind::Punctuation);
/// ```
pub fn tokenize(text: &str) -> Vec<DemoToken> {
    text.split_whitespace()
        .flat_map(split_word)
        .map(|piece| DemoToken {
            id: demo_token_id(piece),
            text: piece.to_string(),
            kind: classify(piece),
        })
        .collect()
}

/// Per-kind token counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TokenCounts {
    pub total: usize,
    pub words: usize,
    pub subwords: usize,
    pub punctuation: usize,
}

impl TokenCounts {
    /// Count tokens by kind.
    pub fn from_tokens(tokens: &[DemoToken]) -> Self {
        tokens.iter().fold(Self::default(), |mut counts, token| {
            counts.total += 1;
            match token.kind {
                TokenKind::Word => counts.words += 1,
                TokenKind::Subword => counts.subwords += 1,
                TokenKind::Punctuation => counts.punctuation += 1,
            }
            counts
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_word_keeps_marks() {
        assert_eq!(split_word("(hi)"), vec!["(", "hi", ")"]);
        assert_eq!(split_word("It's"), vec!["It", "'", "s"]);
        assert_eq!(split_word("..."), vec![".", ".", "."]);
    }

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify("language"), TokenKind::Word);
        assert_eq!(classify("languages"), TokenKind::Subword);
        assert_eq!(classify("a-b"), TokenKind::Subword);
        assert_eq!(classify("?"), TokenKind::Punctuation);
        assert_eq!(classify("-"), TokenKind::Subword);
    }
}
