//! Error types for llm-explainer.

use thiserror::Error;

/// Result type alias for llm-explainer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for llm-explainer.
#[derive(Error, Debug)]
pub enum Error {
    /// The sequencer was built outside of a Tokio runtime.
    #[error("no tokio runtime available to drive the generation sequencer")]
    NoRuntime,

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Sampling from a distribution failed.
    #[error("sampling error: {0}")]
    Sampling(String),

    /// Word is not part of the demo embedding space.
    #[error("unknown word: {0}")]
    UnknownWord(String),

    /// Cluster name is not one of the demo clusters.
    #[error("unknown cluster: {0}")]
    UnknownCluster(String),

    /// Tensor operation error.
    #[error("tensor error: {0}")]
    Tensor(#[from] candle_core::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
