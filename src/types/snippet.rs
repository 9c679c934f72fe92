//! Knowledge snippets returned by a knowledge store

use serde::{Deserialize, Serialize};

/// A chunk of reference text and where it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeSnippet {
    pub content: String,
    pub source: String,
}

impl KnowledgeSnippet {
    pub fn new(content: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            source: source.into(),
        }
    }

    /// Usable in a prompt?
    pub fn is_valid(&self) -> bool {
        !self.content.trim().is_empty()
    }
}
