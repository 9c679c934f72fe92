//! Text-generation capability and continuation extraction

use crate::config::GenerationConfig;
use crate::error::GenerationError;
use crate::ROLE_CUE;

/// A language model behind a prompt-in, text-out interface
///
/// The returned text is the decoded output: usually the prompt echo followed
/// by the continuation.
pub trait TextGenerator: Send + Sync {
    fn generate(&self, prompt: &str, config: &GenerationConfig) -> Result<String, GenerationError>;
}

/// Pull the assistant continuation out of the raw decoded output
///
/// Takes the text after the last role cue. Without a cue, strips the echoed
/// prompt body (the prompt minus its trailing cue) if present.
pub fn extract_continuation(raw: &str, prompt: &str) -> String {
    if let Some((_, after)) = raw.rsplit_once(ROLE_CUE) {
        return after.trim().to_string();
    }

    let body = prompt.strip_suffix(ROLE_CUE).unwrap_or(prompt);
    raw.strip_prefix(body).unwrap_or(raw).trim().to_string()
}

// =============================================================================
// TESTS
// =============================================================================
