//! Emotion & risk analyzer
//!
//! Classifies a user message by keyword membership against fixed tables:
//! emotions (capped at two, table order), cognitive distortions (all), and a
//! crisis phrase list that is checked independently of both.

use crate::core::sentiment::SentimentScorer;
use crate::types::{AnalysisResult, CrisisLevel, Distortion, Emotion};

// =============================================================================
// Emotion table. Order is the tie-break when several emotions are present.
// =============================================================================

const EMOTION_KEYWORDS: &[(Emotion, &[&str])] = &[
    (Emotion::Anxiety, &["worried", "anxious", "scared", "panic", "nervous", "fear", "stress"]),
    (Emotion::Depression, &["sad", "hopeless", "empty", "worthless", "tired", "meaningless"]),
    (Emotion::Anger, &["angry", "frustrated", "furious", "annoyed", "irritated", "rage"]),
    (Emotion::Grief, &["loss", "died", "miss", "gone", "funeral", "bereaved"]),
    (Emotion::Trauma, &["flashback", "nightmare", "triggered", "ptsd", "abuse", "accident"]),
    (Emotion::Relationships, &["relationship", "partner", "marriage", "divorce", "breakup", "lonely"]),
];

// =============================================================================
// Cognitive distortion table. Keywords are lower-case: matching runs on the
// lower-cased message. Bare pronoun phrases ("i am", "she is") are left out,
// they would tag almost every self-statement as labeling.
// =============================================================================

const DISTORTION_KEYWORDS: &[(Distortion, &[&str])] = &[
    (Distortion::AllOrNothing, &["always", "never", "completely", "totally", "everything", "nothing"]),
    (Distortion::Catastrophizing, &["disaster", "terrible", "awful", "end of world", "ruined"]),
    (Distortion::MindReading, &["they think", "everyone believes", "people assume"]),
    (Distortion::FortuneTelling, &["will never", "going to fail", "won't work", "bound to"]),
    (Distortion::EmotionalReasoning, &["feel like", "seems like", "must be because i feel"]),
    (Distortion::ShouldStatements, &["should", "must", "ought to", "have to"]),
    (Distortion::Labeling, &["stupid", "failure", "loser", "worthless"]),
    (Distortion::Personalization, &["my fault", "because of me", "i caused", "i'm responsible"]),
];

// =============================================================================
// Self-harm indicators
// =============================================================================

const CRISIS_PHRASES: &[&str] = &[
    "suicide",
    "kill myself",
    "end it all",
    "want to die",
    "hurt myself",
    "self harm",
];

/// Emotion & risk analyzer
pub struct EmotionAnalyzer {
    sentiment: Box<dyn SentimentScorer>,
}

impl std::fmt::Debug for EmotionAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmotionAnalyzer").finish_non_exhaustive()
    }
}

impl EmotionAnalyzer {
    /// Create analyzer backed by the given sentiment scorer
    pub fn new(sentiment: Box<dyn SentimentScorer>) -> Self {
        Self { sentiment }
    }

    /// Analyze one user message
    pub fn analyze(&self, text: &str) -> AnalysisResult {
        let lowered = text.to_lowercase();
        let sentiment = self.sentiment.score(text);

        let emotions = detect_emotions(&lowered);
        let distortions = detect_distortions(&lowered);
        let crisis_level = detect_crisis(&lowered);

        if crisis_level == CrisisLevel::High {
            tracing::info!("Crisis language detected");
        }

        tracing::debug!(
            emotions = ?emotions,
            distortions = distortions.len(),
            compound = sentiment.compound,
            "Analyzed message"
        );

        AnalysisResult::new(emotions, sentiment, distortions, crisis_level)
    }
}

/// Present emotions in table order, first two only
fn detect_emotions(lowered: &str) -> Vec<Emotion> {
    EMOTION_KEYWORDS
        .iter()
        .filter(|(_, keywords)| contains_any(lowered, keywords))
        .map(|(emotion, _)| *emotion)
        .take(AnalysisResult::MAX_PRIMARY_EMOTIONS)
        .collect()
}

/// All present distortions in table order
fn detect_distortions(lowered: &str) -> Vec<Distortion> {
    DISTORTION_KEYWORDS
        .iter()
        .filter(|(_, keywords)| contains_any(lowered, keywords))
        .map(|(distortion, _)| *distortion)
        .collect()
}

fn detect_crisis(lowered: &str) -> CrisisLevel {
    if contains_any(lowered, CRISIS_PHRASES) {
        CrisisLevel::High
    } else {
        CrisisLevel::Low
    }
}

/// Substring membership
fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sentiment::LexiconSentimentScorer;
    use crate::types::SentimentScore;
    use pretty_assertions::assert_eq;

    fn analyzer() -> EmotionAnalyzer {
        EmotionAnalyzer::new(Box::new(LexiconSentimentScorer::new()))
    }

    struct FixedScorer(f64);

    impl SentimentScorer for FixedScorer {
        fn score(&self, _text: &str) -> SentimentScore {
            SentimentScore {
                compound: self.0,
                positive: 0.0,
                negative: 1.0,
                neutral: 0.0,
            }
        }
    }

    #[test]
    fn test_empty_input() {
        let result = analyzer().analyze("");
        assert!(result.primary_emotions().is_empty());
        assert!(result.cognitive_distortions().is_empty());
        assert_eq!(result.crisis_level(), CrisisLevel::Low);
        assert_eq!(result.sentiment(), SentimentScore::default());
    }

    #[test]
    fn test_whitespace_input() {
        let result = analyzer().analyze("   \t\n ");
        assert!(result.primary_emotions().is_empty());
        assert!(result.cognitive_distortions().is_empty());
        assert_eq!(result.crisis_level(), CrisisLevel::Low);
    }

    #[test]
    fn test_anxiety_detected() {
        let result = analyzer().analyze("I feel so anxious and worried about everything");
        assert_eq!(result.primary_emotions(), &[Emotion::Anxiety]);
        assert!(result.cognitive_distortions().contains(&Distortion::AllOrNothing));
        assert_eq!(result.crisis_level(), CrisisLevel::Low);
    }

    #[test]
    fn test_case_insensitive() {
        let result = analyzer().analyze("PANIC. I had a FLASHBACK");
        assert_eq!(result.primary_emotions(), &[Emotion::Anxiety, Emotion::Trauma]);
    }

    #[test]
    fn test_emotions_capped_in_table_order() {
        // Text order is trauma, anger, grief, anxiety; table order wins
        let result = analyzer().analyze(
            "The nightmare made me angry, since she died I've been scared",
        );
        assert_eq!(result.primary_emotions(), &[Emotion::Anxiety, Emotion::Anger]);
    }

    #[test]
    fn test_distortions_uncapped() {
        let result = analyzer().analyze(
            "It's always my fault, I should have known, it's a disaster and I'm a failure",
        );
        let distortions = result.cognitive_distortions();
        assert!(distortions.contains(&Distortion::AllOrNothing));
        assert!(distortions.contains(&Distortion::Personalization));
        assert!(distortions.contains(&Distortion::ShouldStatements));
        assert!(distortions.contains(&Distortion::Catastrophizing));
        assert!(distortions.contains(&Distortion::Labeling));
        assert!(distortions.len() >= 5);
    }

    #[test]
    fn test_first_person_keywords_case_insensitive() {
        let result = analyzer().analyze("I Caused all of this");
        assert!(result.cognitive_distortions().contains(&Distortion::Personalization));
    }

    #[test]
    fn test_plain_self_statements_not_labeling() {
        for text in ["I am fine today", "She is my sister", "Thanks, I am doing better"] {
            let result = analyzer().analyze(text);
            assert!(result.cognitive_distortions().is_empty(), "tagged {:?}", text);
        }
    }

    #[test]
    fn test_crisis_detected() {
        let result = analyzer().analyze("I want to kill myself");
        assert_eq!(result.crisis_level(), CrisisLevel::High);
    }

    #[test]
    fn test_crisis_independent_of_emotion_cap() {
        let result = analyzer().analyze(
            "I'm anxious and sad and angry and I want to end it all",
        );
        assert_eq!(result.primary_emotions().len(), 2);
        assert!(result.is_crisis());
    }

    #[test]
    fn test_sentiment_passed_through() {
        let analyzer = EmotionAnalyzer::new(Box::new(FixedScorer(-0.42)));
        let result = analyzer.analyze("anything");
        assert_eq!(result.sentiment().compound, -0.42);
        assert_eq!(result.sentiment().negative, 1.0);
    }

    #[test]
    fn test_determinism() {
        let analyzer = analyzer();
        let text = "My partner left and I feel hopeless, I'll never be happy";
        assert_eq!(analyzer.analyze(text), analyzer.analyze(text));
    }
}
