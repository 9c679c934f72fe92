//! Core modules for the CBT engine

pub mod sentiment;
pub mod analyzer;
pub mod selector;
pub mod retriever;
pub mod knowledge;
pub mod composer;
pub mod normalizer;
pub mod generation;
pub mod orchestrator;
pub mod session;

pub use sentiment::{SentimentScorer, LexiconSentimentScorer};
pub use analyzer::EmotionAnalyzer;
pub use selector::StrategySelector;
pub use retriever::{KnowledgeStore, KnowledgeRetriever};
pub use knowledge::{InMemoryKnowledgeStore, chunk_text};
pub use composer::PromptComposer;
pub use normalizer::{ResponseNormalizer, FALLBACK_RESPONSE};
pub use generation::{TextGenerator, extract_continuation};
pub use orchestrator::Orchestrator;
pub use session::{SessionRegistry, OrchestratorFactory};
