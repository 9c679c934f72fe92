//! Engine configuration
//!
//! Defaults come from the crate constants. A JSON file may override any
//! subset of fields.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::{
    ENGAGEMENT_WORD_THRESHOLD, GEN_MAX_NEW_TOKENS, GEN_MIN_NEW_TOKENS,
    GEN_REPETITION_PENALTY, GEN_TEMPERATURE, GEN_TOP_P, MEMORY_CAPACITY,
    RETRIEVAL_TOP_K, SNIPPET_MAX_CHARS,
};

/// Parameters passed to the text-generation capability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub max_new_tokens: usize,
    pub min_new_tokens: usize,
    pub do_sample: bool,
    pub temperature: f32,
    pub top_p: f32,
    pub repetition_penalty: f32,
    /// Pad with the end-of-sequence token
    pub pad_with_eos: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_new_tokens: GEN_MAX_NEW_TOKENS,
            min_new_tokens: GEN_MIN_NEW_TOKENS,
            do_sample: true,
            temperature: GEN_TEMPERATURE,
            top_p: GEN_TOP_P,
            repetition_penalty: GEN_REPETITION_PENALTY,
            pad_with_eos: true,
        }
    }
}

/// Tunables for one orchestrator instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Conversation turns kept in memory
    pub memory_capacity: usize,
    /// Snippets requested per turn
    pub retrieval_top_k: usize,
    /// Per-snippet character cap inside the prompt
    pub snippet_max_chars: usize,
    /// Word count that triggers the engagement question
    pub engagement_word_threshold: usize,
    /// Add the clinical-guidance line to the prompt
    pub strategy_guidance: bool,
    pub generation: GenerationConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            memory_capacity: MEMORY_CAPACITY,
            retrieval_top_k: RETRIEVAL_TOP_K,
            snippet_max_chars: SNIPPET_MAX_CHARS,
            engagement_word_threshold: ENGAGEMENT_WORD_THRESHOLD,
            strategy_guidance: false,
            generation: GenerationConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.memory_capacity == 0 {
            return Err(ConfigError::Invalid("memory_capacity must be at least 1".into()));
        }
        if self.retrieval_top_k == 0 {
            return Err(ConfigError::Invalid("retrieval_top_k must be at least 1".into()));
        }
        if self.snippet_max_chars == 0 {
            return Err(ConfigError::Invalid("snippet_max_chars must be at least 1".into()));
        }

        let generation = &self.generation;
        if generation.min_new_tokens > generation.max_new_tokens {
            return Err(ConfigError::Invalid(format!(
                "min_new_tokens ({}) exceeds max_new_tokens ({})",
                generation.min_new_tokens, generation.max_new_tokens
            )));
        }
        if generation.temperature <= 0.0 {
            return Err(ConfigError::Invalid("temperature must be positive".into()));
        }
        if generation.top_p <= 0.0 || generation.top_p > 1.0 {
            return Err(ConfigError::Invalid("top_p must be in (0, 1]".into()));
        }

        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
