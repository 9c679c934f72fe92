//! Emotional analysis of a single user message

use serde::{Deserialize, Serialize};

/// Emotion tags, in detection-table order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    Anxiety,
    Depression,
    Anger,
    Grief,
    Trauma,
    Relationships,
}

impl Emotion {
    /// Tag name
    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Anxiety => "anxiety",
            Emotion::Depression => "depression",
            Emotion::Anger => "anger",
            Emotion::Grief => "grief",
            Emotion::Trauma => "trauma",
            Emotion::Relationships => "relationships",
        }
    }
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cognitive distortion tags, in detection-table order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Distortion {
    AllOrNothing,
    Catastrophizing,
    MindReading,
    FortuneTelling,
    EmotionalReasoning,
    ShouldStatements,
    Labeling,
    Personalization,
}

impl Distortion {
    /// Tag name
    pub fn as_str(&self) -> &'static str {
        match self {
            Distortion::AllOrNothing => "all_or_nothing",
            Distortion::Catastrophizing => "catastrophizing",
            Distortion::MindReading => "mind_reading",
            Distortion::FortuneTelling => "fortune_telling",
            Distortion::EmotionalReasoning => "emotional_reasoning",
            Distortion::ShouldStatements => "should_statements",
            Distortion::Labeling => "labeling",
            Distortion::Personalization => "personalization",
        }
    }
}

impl std::fmt::Display for Distortion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Self-harm risk level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrisisLevel {
    #[default]
    Low,
    High,
}

/// Sentiment magnitudes as reported by a sentiment scorer
///
/// `compound` is in [-1, 1]; the three proportions sum to 1 for non-empty
/// input and are all zero for empty input.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SentimentScore {
    pub compound: f64,
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

/// Result of analysing one user message
///
/// Built once per turn by the analyzer and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    primary_emotions: Vec<Emotion>,
    sentiment: SentimentScore,
    cognitive_distortions: Vec<Distortion>,
    crisis_level: CrisisLevel,
}

impl AnalysisResult {
    /// Maximum number of primary emotions kept
    pub const MAX_PRIMARY_EMOTIONS: usize = 2;

    /// Create a result; emotions beyond the cap are dropped
    pub fn new(
        mut primary_emotions: Vec<Emotion>,
        sentiment: SentimentScore,
        cognitive_distortions: Vec<Distortion>,
        crisis_level: CrisisLevel,
    ) -> Self {
        primary_emotions.truncate(Self::MAX_PRIMARY_EMOTIONS);
        Self {
            primary_emotions,
            sentiment,
            cognitive_distortions,
            crisis_level,
        }
    }

    pub fn primary_emotions(&self) -> &[Emotion] {
        &self.primary_emotions
    }

    pub fn sentiment(&self) -> SentimentScore {
        self.sentiment
    }

    pub fn cognitive_distortions(&self) -> &[Distortion] {
        &self.cognitive_distortions
    }

    pub fn crisis_level(&self) -> CrisisLevel {
        self.crisis_level
    }

    /// Is the crisis flag raised?
    pub fn is_crisis(&self) -> bool {
        self.crisis_level == CrisisLevel::High
    }

    /// Was the given emotion among the primary emotions?
    pub fn has_emotion(&self, emotion: Emotion) -> bool {
        self.primary_emotions.contains(&emotion)
    }
}

// =============================================================================
// TESTS
// =============================================================================
