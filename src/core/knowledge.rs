//! In-memory knowledge store
//!
//! Documents are split into overlapping word windows, de-duplicated by
//! SHA-256 of the chunk text, and ranked against a query by term overlap.

use std::collections::HashSet;
use sha2::{Sha256, Digest};

use crate::core::retriever::KnowledgeStore;
use crate::error::RetrievalError;
use crate::types::KnowledgeSnippet;
use crate::{CHUNK_OVERLAP_WORDS, CHUNK_WORDS};

/// Words ignored when ranking
const STOPWORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "your", "with", "that",
    "this", "what", "how", "does", "have", "has", "was", "were", "from",
    "they", "them", "their", "about", "into", "can", "will", "its", "it's",
];

/// A stored chunk
#[derive(Debug, Clone)]
struct Chunk {
    id: String,
    source: String,
    content: String,
    terms: HashSet<String>,
}

/// Knowledge store held entirely in memory
#[derive(Debug)]
pub struct InMemoryKnowledgeStore {
    chunks: Vec<Chunk>,
    hashes: HashSet<[u8; 32]>,
    chunk_words: usize,
    overlap_words: usize,
}

impl Default for InMemoryKnowledgeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryKnowledgeStore {
    /// Create store with default chunking (500 words, 50 overlap)
    pub fn new() -> Self {
        Self::with_chunking(CHUNK_WORDS, CHUNK_OVERLAP_WORDS)
    }

    /// Create store with custom chunking
    pub fn with_chunking(chunk_words: usize, overlap_words: usize) -> Self {
        Self {
            chunks: Vec::new(),
            hashes: HashSet::new(),
            chunk_words: chunk_words.max(1),
            overlap_words,
        }
    }

    /// Chunk and add a document, returns the number of new chunks
    pub fn add_document(&mut self, source: &str, text: &str) -> usize {
        let mut added = 0;

        for (i, content) in chunk_text(text, self.chunk_words, self.overlap_words)
            .into_iter()
            .enumerate()
        {
            if !self.hashes.insert(sha256(&content)) {
                continue;
            }
            self.chunks.push(Chunk {
                id: format!("{}_{}", source, i),
                source: source.to_string(),
                terms: terms(&content),
                content,
            });
            added += 1;
        }

        tracing::debug!(source, added, total = self.chunks.len(), "Added document");
        added
    }

    /// Chunk ids in insertion order
    pub fn chunk_ids(&self) -> impl Iterator<Item = &str> {
        self.chunks.iter().map(|c| c.id.as_str())
    }

    /// Get chunk count
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

impl KnowledgeStore for InMemoryKnowledgeStore {
    fn query(&self, query: &str, k: usize) -> Result<Vec<KnowledgeSnippet>, RetrievalError> {
        let query_terms = terms(query);
        if query_terms.is_empty() || k == 0 {
            return Ok(Vec::new());
        }

        let mut scored: Vec<(f64, &Chunk)> = self
            .chunks
            .iter()
            .filter_map(|chunk| {
                let overlap = query_terms.intersection(&chunk.terms).count();
                if overlap == 0 {
                    None
                } else {
                    Some((overlap as f64 / query_terms.len() as f64, chunk))
                }
            })
            .collect();

        // Stable sort keeps insertion order among equal scores
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));

        Ok(scored
            .into_iter()
            .take(k)
            .map(|(_, chunk)| KnowledgeSnippet::new(chunk.content.clone(), chunk.source.clone()))
            .collect())
    }
}

/// Split text into windows of `chunk_words` words, each starting
/// `chunk_words - overlap_words` words after the previous one
pub fn chunk_text(text: &str, chunk_words: usize, overlap_words: usize) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    let chunk_words = chunk_words.max(1);
    let step = chunk_words.saturating_sub(overlap_words).max(1);

    (0..words.len())
        .step_by(step)
        .map(|start| {
            let end = (start + chunk_words).min(words.len());
            words[start..end].join(" ")
        })
        .collect()
}

/// Ranking terms: lower-case, alphanumeric, longer than two characters
fn terms(text: &str) -> HashSet<String> {
    text.split_whitespace()
        .map(|w| {
            w.chars()
                .filter(|c| c.is_alphanumeric())
                .collect::<String>()
                .to_lowercase()
        })
        .filter(|w| w.chars().count() > 2 && !STOPWORDS.contains(&w.as_str()))
        .collect()
}

fn sha256(text: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hasher.finalize().into()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_chunk_text_overlap() {
        let text = (0..12).map(|i| format!("w{}", i)).collect::<Vec<_>>().join(" ");
        let chunks = chunk_text(&text, 5, 2);
        assert_eq!(
            chunks,
            vec![
                "w0 w1 w2 w3 w4",
                "w3 w4 w5 w6 w7",
                "w6 w7 w8 w9 w10",
                "w9 w10 w11",
            ]
        );
    }

    #[test]
    fn test_chunk_text_empty() {
        assert!(chunk_text("", 500, 50).is_empty());
        assert!(chunk_text("   ", 500, 50).is_empty());
    }

    #[test]
    fn test_chunk_text_overlap_not_smaller_than_size() {
        let chunks = chunk_text("a b c", 2, 5);
        assert_eq!(chunks, vec!["a b", "b c", "c"]);
    }

    #[test]
    fn test_duplicate_chunks_skipped() {
        let mut store = InMemoryKnowledgeStore::new();
        assert_eq!(store.add_document("nhs", "CBT helps with anxiety"), 1);
        assert_eq!(store.add_document("nhs_copy", "CBT helps with anxiety"), 0);
        assert_eq!(store.len(), 1);
        assert_eq!(store.chunk_ids().collect::<Vec<_>>(), vec!["nhs_0"]);
    }

    #[test]
    fn test_query_ranks_by_overlap() {
        let mut store = InMemoryKnowledgeStore::new();
        store.add_document("sleep", "Sleep hygiene routines improve rest.");
        store.add_document("anxiety", "Breathing exercises reduce anxiety and panic symptoms.");
        store.add_document("mixed", "Anxiety can disturb sleep.");

        let results = store.query("breathing for anxiety panic", 2).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].source, "anxiety");
        assert_eq!(results[1].source, "mixed");
    }

    #[test]
    fn test_short_non_ascii_terms_ignored() {
        let mut store = InMemoryKnowledgeStore::new();
        store.add_document("fr", "Ça ira mieux demain");
        assert!(store.query("ça", 3).unwrap().is_empty());
        assert_eq!(store.query("demain ça", 3).unwrap().len(), 1);
    }

    #[test]
    fn test_query_without_matches() {
        let mut store = InMemoryKnowledgeStore::new();
        store.add_document("sleep", "Sleep hygiene routines improve rest.");
        assert!(store.query("grief counselling", 3).unwrap().is_empty());
        assert!(store.query("", 3).unwrap().is_empty());
    }
}
