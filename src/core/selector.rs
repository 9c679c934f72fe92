//! Strategy selector: fixed-priority rules, first match wins
//!
//! 1. Crisis → CRISIS_INTERVENTION
//! 2. Mapped emotion, by severity: trauma > anxiety > depression > relationships
//! 3. Any cognitive distortion → COGNITIVE_RESTRUCTURING
//! 4. Otherwise → COGNITIVE_RESTRUCTURING

use crate::types::{AnalysisResult, Emotion, SelectionReason, Strategy};

/// Emotion → strategy, in severity order. Emotions not listed fall through.
const EMOTION_PRECEDENCE: &[(Emotion, Strategy)] = &[
    (Emotion::Trauma, Strategy::TraumaInformed),
    (Emotion::Anxiety, Strategy::AnxietyFocused),
    (Emotion::Depression, Strategy::DepressionFocused),
    (Emotion::Relationships, Strategy::RelationshipFocused),
];

/// Strategy selector
#[derive(Debug, Default, Clone, Copy)]
pub struct StrategySelector;

impl StrategySelector {
    /// Create new selector
    pub fn new() -> Self {
        Self
    }

    /// Pick the strategy for an analysis
    pub fn select(&self, analysis: &AnalysisResult) -> Strategy {
        self.select_with_reason(analysis).0
    }

    /// Pick the strategy and report which rule fired
    pub fn select_with_reason(&self, analysis: &AnalysisResult) -> (Strategy, SelectionReason) {
        if analysis.is_crisis() {
            return (Strategy::CrisisIntervention, SelectionReason::S001_CRISIS_OVERRIDE);
        }

        let matched = EMOTION_PRECEDENCE
            .iter()
            .find(|(emotion, _)| analysis.has_emotion(*emotion));
        if let Some((_, strategy)) = matched {
            return (*strategy, SelectionReason::S002_EMOTION_MATCH);
        }

        if !analysis.cognitive_distortions().is_empty() {
            return (Strategy::CognitiveRestructuring, SelectionReason::S003_DISTORTIONS_PRESENT);
        }

        (Strategy::CognitiveRestructuring, SelectionReason::S004_DEFAULT)
    }
}

// =============================================================================
// TESTS
// =============================================================================
