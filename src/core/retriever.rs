//! Knowledge retriever
//!
//! Best-effort wrapper around a `KnowledgeStore`: store failures become an
//! empty result so retrieval never blocks a reply.

use crate::error::RetrievalError;
use crate::types::KnowledgeSnippet;

/// Anything that can return snippets similar to a query, best first
pub trait KnowledgeStore: Send + Sync {
    fn query(&self, query: &str, k: usize) -> Result<Vec<KnowledgeSnippet>, RetrievalError>;
}

/// Knowledge retriever
pub struct KnowledgeRetriever {
    store: Box<dyn KnowledgeStore>,
}

impl std::fmt::Debug for KnowledgeRetriever {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KnowledgeRetriever").finish_non_exhaustive()
    }
}

impl KnowledgeRetriever {
    /// Create retriever over a store
    pub fn new(store: Box<dyn KnowledgeStore>) -> Self {
        Self { store }
    }

    /// Up to `k` snippets in store ranking order; empty on any failure
    pub fn retrieve(&self, query: &str, k: usize) -> Vec<KnowledgeSnippet> {
        if k == 0 {
            return Vec::new();
        }

        match self.store.query(query, k) {
            Ok(mut snippets) => {
                snippets.truncate(k);
                tracing::debug!(count = snippets.len(), "Retrieved knowledge");
                snippets
            }
            Err(e) => {
                tracing::warn!(error = %e, "Knowledge retrieval failed, continuing without it");
                Vec::new()
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
