//! CBT Engine: response orchestration for a CBT-style chat agent
//!
//! Pipeline per user turn:
//! analyze → select strategy → retrieve knowledge → compose prompt →
//! generate → normalize → remember

pub mod config;
pub mod core;
pub mod error;
pub mod types;

pub use config::{EngineConfig, GenerationConfig};
pub use error::{ConfigError, GenerationError, RetrievalError, SessionError};

// =============================================================================
// CONVERSATION MEMORY
// =============================================================================

/// Turns retained per session before the oldest is evicted
pub const MEMORY_CAPACITY: usize = 10;

// =============================================================================
// KNOWLEDGE RETRIEVAL
// =============================================================================

/// Snippets requested from the knowledge store per turn
pub const RETRIEVAL_TOP_K: usize = 4;

/// Maximum characters of a single snippet inside the prompt
pub const SNIPPET_MAX_CHARS: usize = 600;

/// Words per chunk when ingesting documents into the in-memory store
pub const CHUNK_WORDS: usize = 500;

/// Words shared between consecutive chunks
pub const CHUNK_OVERLAP_WORDS: usize = 50;

// =============================================================================
// PROMPT
// =============================================================================

/// Role label that cues the model to continue as the assistant
pub const ROLE_CUE: &str = "Therapist:";

/// Role label for user lines
pub const USER_LABEL: &str = "User:";

// =============================================================================
// RESPONSE NORMALIZATION
// =============================================================================

/// Word count above which a reply needs a collaborative closing question
pub const ENGAGEMENT_WORD_THRESHOLD: usize = 25;

// =============================================================================
// GENERATION DEFAULTS
// =============================================================================

pub const GEN_MAX_NEW_TOKENS: usize = 250;
pub const GEN_MIN_NEW_TOKENS: usize = 70;
pub const GEN_TEMPERATURE: f32 = 0.7;
pub const GEN_TOP_P: f32 = 0.95;
pub const GEN_REPETITION_PENALTY: f32 = 1.2;
