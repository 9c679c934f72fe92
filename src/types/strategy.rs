//! Therapeutic strategies and their static profiles

use serde::{Deserialize, Serialize};

/// The therapeutic strategy chosen for a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Immediate safety and stabilization
    CrisisIntervention,
    AnxietyFocused,
    DepressionFocused,
    TraumaInformed,
    RelationshipFocused,
    /// Core CBT approach, also the default
    CognitiveRestructuring,
}

/// Static metadata describing how a strategy is delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategyProfile {
    pub priority: &'static str,
    pub techniques: &'static [&'static str],
    pub tone: &'static str,
}

static CRISIS_INTERVENTION: StrategyProfile = StrategyProfile {
    priority: "immediate safety and stabilization",
    techniques: &["grounding", "safety planning", "crisis resources"],
    tone: "calm, directive, supportive",
};

static ANXIETY_FOCUSED: StrategyProfile = StrategyProfile {
    priority: "worry reduction and coping strategies",
    techniques: &["breathing exercises", "cognitive restructuring", "exposure concepts"],
    tone: "gentle, reassuring, educational",
};

static DEPRESSION_FOCUSED: StrategyProfile = StrategyProfile {
    priority: "behavioral activation and mood improvement",
    techniques: &["activity scheduling", "thought records", "self-compassion"],
    tone: "warm, encouraging, patient",
};

static TRAUMA_INFORMED: StrategyProfile = StrategyProfile {
    priority: "safety, stabilization, processing",
    techniques: &["grounding", "window of tolerance", "narrative therapy"],
    tone: "careful, validating, empowering",
};

static RELATIONSHIP_FOCUSED: StrategyProfile = StrategyProfile {
    priority: "communication and boundary setting",
    techniques: &["interpersonal skills", "boundary setting", "attachment"],
    tone: "balanced, insightful, practical",
};

static COGNITIVE_RESTRUCTURING: StrategyProfile = StrategyProfile {
    priority: "identifying and challenging thoughts",
    techniques: &["thought challenging", "evidence examination", "balanced thinking"],
    tone: "collaborative, curious, logical",
};

impl Strategy {
    /// All strategies
    pub const ALL: [Strategy; 6] = [
        Strategy::CrisisIntervention,
        Strategy::AnxietyFocused,
        Strategy::DepressionFocused,
        Strategy::TraumaInformed,
        Strategy::RelationshipFocused,
        Strategy::CognitiveRestructuring,
    ];

    /// Snake-case name
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::CrisisIntervention => "crisis_intervention",
            Strategy::AnxietyFocused => "anxiety_focused",
            Strategy::DepressionFocused => "depression_focused",
            Strategy::TraumaInformed => "trauma_informed",
            Strategy::RelationshipFocused => "relationship_focused",
            Strategy::CognitiveRestructuring => "cognitive_restructuring",
        }
    }

    /// Human-readable name ("crisis intervention")
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ")
    }

    /// Static delivery profile
    pub fn profile(&self) -> &'static StrategyProfile {
        match self {
            Strategy::CrisisIntervention => &CRISIS_INTERVENTION,
            Strategy::AnxietyFocused => &ANXIETY_FOCUSED,
            Strategy::DepressionFocused => &DEPRESSION_FOCUSED,
            Strategy::TraumaInformed => &TRAUMA_INFORMED,
            Strategy::RelationshipFocused => &RELATIONSHIP_FOCUSED,
            Strategy::CognitiveRestructuring => &COGNITIVE_RESTRUCTURING,
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// TESTS
// =============================================================================
