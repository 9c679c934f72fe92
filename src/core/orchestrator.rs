//! Conversation orchestrator: runs the full pipeline for one session
//!
//! ```text
//! user input
//!     ↓
//! [Analyzer]   → emotions, distortions, sentiment, crisis flag
//!     ↓
//! [Selector]   → strategy + reason
//!     ↓
//! [Retriever]  → knowledge snippets (best effort)
//!     ↓
//! [Composer]   → prompt (memory before this turn)
//!     ↓
//! [Generator]  → raw text        ── error → returned, memory untouched
//!     ↓
//! [Normalizer] → reply
//!     ↓
//! memory.push(turn)
//! ```

use crate::config::EngineConfig;
use crate::core::analyzer::EmotionAnalyzer;
use crate::core::composer::PromptComposer;
use crate::core::generation::{extract_continuation, TextGenerator};
use crate::core::normalizer::ResponseNormalizer;
use crate::core::retriever::{KnowledgeRetriever, KnowledgeStore};
use crate::core::selector::StrategySelector;
use crate::core::sentiment::SentimentScorer;
use crate::error::GenerationError;
use crate::types::{ConversationMemory, ConversationTurn, Reply};

/// Orchestrator for one conversation session
pub struct Orchestrator {
    analyzer: EmotionAnalyzer,
    selector: StrategySelector,
    retriever: KnowledgeRetriever,
    composer: PromptComposer,
    normalizer: ResponseNormalizer,
    generator: Box<dyn TextGenerator>,
    memory: ConversationMemory,
    config: EngineConfig,
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("memory", &self.memory)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Orchestrator {
    /// Create orchestrator with default config
    pub fn new(
        generator: Box<dyn TextGenerator>,
        store: Box<dyn KnowledgeStore>,
        sentiment: Box<dyn SentimentScorer>,
    ) -> Self {
        Self::with_config(generator, store, sentiment, EngineConfig::default())
    }

    /// Create orchestrator with custom config
    pub fn with_config(
        generator: Box<dyn TextGenerator>,
        store: Box<dyn KnowledgeStore>,
        sentiment: Box<dyn SentimentScorer>,
        config: EngineConfig,
    ) -> Self {
        let normalizer =
            ResponseNormalizer::new().engagement_threshold(config.engagement_word_threshold);

        Self {
            analyzer: EmotionAnalyzer::new(sentiment),
            selector: StrategySelector::new(),
            retriever: KnowledgeRetriever::new(store),
            composer: PromptComposer::with_snippet_limit(config.snippet_max_chars),
            normalizer,
            generator,
            memory: ConversationMemory::with_capacity(config.memory_capacity),
            config,
        }
    }

    /// Replace the normalizer, e.g. with a seeded one
    pub fn with_normalizer(mut self, normalizer: ResponseNormalizer) -> Self {
        self.normalizer = normalizer.engagement_threshold(self.config.engagement_word_threshold);
        self
    }

    /// Produce the reply to one user message
    pub fn respond(&mut self, user_input: &str) -> Result<Reply, GenerationError> {
        let analysis = self.analyzer.analyze(user_input);
        let (strategy, reason) = self.selector.select_with_reason(&analysis);
        tracing::debug!(strategy = %strategy, reason = reason.code(), "Selected strategy");

        let knowledge = self.retriever.retrieve(user_input, self.config.retrieval_top_k);

        let prompt = if self.config.strategy_guidance {
            self.composer
                .compose_guided(&analysis, strategy, user_input, &self.memory, &knowledge)
        } else {
            self.composer.compose(user_input, &self.memory, &knowledge)
        };
        tracing::debug!(
            prompt_chars = prompt.len(),
            snippets = knowledge.len(),
            history = self.memory.len(),
            "Composed prompt"
        );

        let raw = self
            .generator
            .generate(&prompt, &self.config.generation)
            .map_err(|e| {
                tracing::warn!(error = %e, "Generation failed, turn not recorded");
                e
            })?;

        let continuation = extract_continuation(&raw, &prompt);
        let text = self.normalizer.normalize(&continuation);

        self.memory.push(ConversationTurn::new(user_input, text.clone()));

        Ok(Reply {
            text,
            analysis,
            strategy,
            reason,
        })
    }

    /// Conversation so far (oldest first)
    pub fn history(&self) -> &ConversationMemory {
        &self.memory
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Forget the conversation
    pub fn reset(&mut self) {
        self.memory.clear();
    }
}

// =============================================================================
// TESTS
// =============================================================================
