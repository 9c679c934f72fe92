//! Core types for the CBT engine

mod analysis;
mod strategy;
mod reason;
mod turn;
mod snippet;
mod output;

pub use analysis::{AnalysisResult, CrisisLevel, Distortion, Emotion, SentimentScore};
pub use strategy::{Strategy, StrategyProfile};
pub use reason::SelectionReason;
pub use turn::{ConversationMemory, ConversationTurn};
pub use snippet::KnowledgeSnippet;
pub use output::Reply;
