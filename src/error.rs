//! Error types for the engine and its external capabilities

use thiserror::Error;

/// Failure of the external text-generation capability
///
/// Surfaced unchanged from `Orchestrator::respond`. An empty model output is
/// not an error; the normalizer handles that case.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("generation backend unavailable: {0}")]
    Unavailable(String),

    #[error("generation backend error: {0}")]
    Backend(String),

    #[error("generation timed out after {0}ms")]
    Timeout(u64),

    #[error("generation cancelled")]
    Cancelled,
}

/// Failure of the external knowledge store
///
/// Never leaves the retriever: it degrades to an empty result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RetrievalError {
    #[error("knowledge store unavailable: {0}")]
    Unavailable(String),

    #[error("knowledge store timed out after {0}ms")]
    Timeout(u64),

    #[error("malformed knowledge store response: {0}")]
    Malformed(String),
}

/// Configuration loading and validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Session registry errors
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("session worker failed: {0}")]
    Worker(String),
}
