//! Reason codes for strategy selection

use serde::{Deserialize, Serialize};

/// Why the selector chose a strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum SelectionReason {
    /// Crisis language detected, safety overrides everything else
    S001_CRISIS_OVERRIDE,
    /// A primary emotion maps to a dedicated strategy
    S002_EMOTION_MATCH,
    /// No mapped emotion, but cognitive distortions were found
    S003_DISTORTIONS_PRESENT,
    /// Nothing matched
    S004_DEFAULT,
}

impl SelectionReason {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::S001_CRISIS_OVERRIDE => "S001_CRISIS_OVERRIDE",
            Self::S002_EMOTION_MATCH => "S002_EMOTION_MATCH",
            Self::S003_DISTORTIONS_PRESENT => "S003_DISTORTIONS_PRESENT",
            Self::S004_DEFAULT => "S004_DEFAULT",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::S001_CRISIS_OVERRIDE => "Crisis language detected",
            Self::S002_EMOTION_MATCH => "Primary emotion mapped to strategy",
            Self::S003_DISTORTIONS_PRESENT => "Cognitive distortions present",
            Self::S004_DEFAULT => "Default approach",
        }
    }
}

impl std::fmt::Display for SelectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}
