//! Output of one orchestrated turn

use serde::{Deserialize, Serialize};
use crate::types::{AnalysisResult, SelectionReason, Strategy};

/// Reply to a user message with the analysis that shaped it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    /// Normalized response text, never empty
    pub text: String,
    pub analysis: AnalysisResult,
    pub strategy: Strategy,
    /// Why the strategy was chosen
    pub reason: SelectionReason,
}

impl Reply {
    /// Split into (response, analysis, strategy)
    pub fn into_parts(self) -> (String, AnalysisResult, Strategy) {
        (self.text, self.analysis, self.strategy)
    }

    /// Format for log lines
    pub fn to_parseable_string(&self) -> String {
        let emotions: Vec<&str> = self
            .analysis
            .primary_emotions()
            .iter()
            .map(|e| e.as_str())
            .collect();

        format!(
            "strategy={} | emotions=[{}] | distortions={} | crisis={:?} | compound={:.3} | reason={}",
            self.strategy,
            emotions.join(","),
            self.analysis.cognitive_distortions().len(),
            self.analysis.crisis_level(),
            self.analysis.sentiment().compound,
            self.reason.code()
        )
    }
}
