//! Hand-authored demonstration data.
//!
//! Every number here was chosen for teaching, not computed by a model:
//! - [`tokenizer`]: splitting text into word, sub-word and punctuation tokens
//! - [`embedding_space`]: words as points, nearness as similarity
//! - [`analogy`]: king − man + woman ≈ queen
//! - [`attention`]: what "it" looks at
//! - [`probabilities`]: a ranked next-token distribution
//! - [`clusters`]: programming concepts grouped by meaning
//! - [`overview`]: the five pipeline stages
//! - [`token_stats`]: tokens versus words

pub mod analogy;
pub mod attention;
pub mod clusters;
pub mod embedding_space;
pub mod overview;
pub mod probabilities;
pub mod token_stats;
pub mod tokenizer;

pub use embedding_space::{Cluster, EmbeddingPoint, Point3};
pub use tokenizer::{DemoToken, TokenCounts, TokenKind, tokenize};
