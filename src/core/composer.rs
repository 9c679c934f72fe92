//! Prompt composer
//!
//! Prompt layout:
//! framing sentence, optional guidance line, optional knowledge block,
//! history (oldest first), the new user line, then the role cue.

use crate::types::{AnalysisResult, ConversationMemory, KnowledgeSnippet, Strategy};
use crate::{ROLE_CUE, SNIPPET_MAX_CHARS, USER_LABEL};

/// Persona framing that opens every prompt
pub const SYSTEM_FRAMING: &str =
    "You are a supportive CBT therapist. Continue the conversation naturally.";

/// Header of the knowledge block
pub const KNOWLEDGE_HEADER: &str = "Relevant Knowledge (use if helpful, otherwise ignore):";

/// Distortions named in the guidance line
const GUIDANCE_MAX_DISTORTIONS: usize = 3;

/// Prompt composer
#[derive(Debug, Clone)]
pub struct PromptComposer {
    snippet_max_chars: usize,
}

impl Default for PromptComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptComposer {
    /// Create composer with default snippet limit
    pub fn new() -> Self {
        Self::with_snippet_limit(SNIPPET_MAX_CHARS)
    }

    /// Create composer with a custom per-snippet character limit
    pub fn with_snippet_limit(snippet_max_chars: usize) -> Self {
        Self {
            snippet_max_chars: snippet_max_chars.max(1),
        }
    }

    /// Build the prompt for a new user message
    pub fn compose(
        &self,
        user_input: &str,
        history: &ConversationMemory,
        knowledge: &[KnowledgeSnippet],
    ) -> String {
        self.assemble(None, user_input, history, knowledge)
    }

    /// Build the prompt with a clinical-guidance line for the chosen strategy
    pub fn compose_guided(
        &self,
        analysis: &AnalysisResult,
        strategy: Strategy,
        user_input: &str,
        history: &ConversationMemory,
        knowledge: &[KnowledgeSnippet],
    ) -> String {
        let guidance = guidance_line(analysis, strategy);
        self.assemble(Some(&guidance), user_input, history, knowledge)
    }

    fn assemble(
        &self,
        guidance: Option<&str>,
        user_input: &str,
        history: &ConversationMemory,
        knowledge: &[KnowledgeSnippet],
    ) -> String {
        let mut prompt = String::new();
        prompt.push_str(SYSTEM_FRAMING);
        prompt.push('\n');
        if let Some(guidance) = guidance {
            prompt.push_str(guidance);
            prompt.push('\n');
        }
        prompt.push_str(&self.knowledge_block(knowledge));
        prompt.push_str(&history_block(history));
        prompt.push_str(&format!("{} {}\n{}", USER_LABEL, user_input, ROLE_CUE));
        prompt
    }

    /// Bullet list of snippets, or empty when none are usable
    pub fn knowledge_block(&self, knowledge: &[KnowledgeSnippet]) -> String {
        let lines: Vec<String> = knowledge
            .iter()
            .filter(|s| s.is_valid())
            .map(|s| format!("- {}", self.clip(&s.content)))
            .collect();

        if lines.is_empty() {
            return String::new();
        }

        format!("{}\n{}\n", KNOWLEDGE_HEADER, lines.join("\n"))
    }

    /// Flatten to one line and cap the length
    fn clip(&self, content: &str) -> String {
        let flat = content.trim().replace('\n', " ");
        if flat.chars().count() <= self.snippet_max_chars {
            return flat;
        }
        let mut clipped: String = flat.chars().take(self.snippet_max_chars).collect();
        clipped.push_str("...");
        clipped
    }
}

/// Previous turns as alternating user / assistant lines
pub fn history_block(history: &ConversationMemory) -> String {
    history
        .turns()
        .map(|turn| format!("{} {}\n{} {}\n\n", USER_LABEL, turn.user, ROLE_CUE, turn.assistant))
        .collect()
}

/// One-line summary of the assessment and the strategy's delivery profile
pub fn guidance_line(analysis: &AnalysisResult, strategy: Strategy) -> String {
    let profile = strategy.profile();

    let emotions = if analysis.primary_emotions().is_empty() {
        "mixed presentation".to_string()
    } else {
        analysis
            .primary_emotions()
            .iter()
            .map(|e| e.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };

    let distortions = if analysis.cognitive_distortions().is_empty() {
        "none identified".to_string()
    } else {
        analysis
            .cognitive_distortions()
            .iter()
            .take(GUIDANCE_MAX_DISTORTIONS)
            .map(|d| d.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        "Approach: {}. Primary emotions: {}. Cognitive distortions: {}. Focus: {}. Tone: {}.",
        strategy.label(),
        emotions,
        distortions,
        profile.priority,
        profile.tone
    )
}

// =============================================================================
// TESTS
// =============================================================================
