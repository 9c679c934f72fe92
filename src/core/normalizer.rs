//! Response normalizer
//!
//! Steps:
//! 1. Cut at the earliest artifact marker
//! 2. Re-split into sentences, trim, capitalize, join with single spaces
//! 3. Empty result → fallback question
//! 4. Long reply without a collaborative marker → append an engagement question

use lazy_static::lazy_static;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::Regex;

use crate::ENGAGEMENT_WORD_THRESHOLD;

/// Role labels, markup fragments and section headers that end a reply
pub const ARTIFACT_MARKERS: &[&str] = &[
    "<|",
    "</",
    "[/",
    "<&",
    "User:",
    "Therapist:",
    "CLINICAL ASSESSMENT",
    "QUALITY VERIFICATION",
    "###",
];

/// Returned when nothing usable is left
pub const FALLBACK_RESPONSE: &str =
    "I'm not sure how to respond to that. Could you please tell me more?";

/// Lower-case substrings that already invite collaboration
const COLLABORATIVE_MARKERS: &[&str] = &["what", "how", "would you", "can we", "together"];

pub const ENGAGEMENT_QUESTIONS: &[&str] = &[
    "How does that sound to you?",
    "What are your thoughts on this?",
];

lazy_static! {
    static ref RE_SENTENCE_BREAK: Regex = Regex::new(r"[.!?]\s+").unwrap();
}

/// Response normalizer
#[derive(Debug, Clone)]
pub struct ResponseNormalizer {
    rng: StdRng,
    engagement_word_threshold: usize,
}

impl Default for ResponseNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseNormalizer {
    /// Create normalizer seeded from the OS
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Create normalizer with a fixed seed (reproducible question choice)
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Create normalizer with the given random source
    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            engagement_word_threshold: ENGAGEMENT_WORD_THRESHOLD,
        }
    }

    /// Override the word count that triggers the engagement question
    pub fn engagement_threshold(mut self, words: usize) -> Self {
        self.engagement_word_threshold = words;
        self
    }

    /// Clean a raw model continuation into a reply; never empty
    pub fn normalize(&mut self, raw: &str) -> String {
        let mut response = clean(raw);

        if response.is_empty() {
            return FALLBACK_RESPONSE.to_string();
        }

        if needs_engagement(&response, self.engagement_word_threshold) {
            let pick = self.rng.random_range(0..ENGAGEMENT_QUESTIONS.len());
            response.push(' ');
            response.push_str(ENGAGEMENT_QUESTIONS[pick]);
        }

        response
    }
}

/// Steps 1 and 2: truncate at artifacts, then tidy sentences
pub fn clean(raw: &str) -> String {
    let text = truncate_at_artifacts(raw).trim();

    split_sentences(text)
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text before the earliest artifact marker
pub fn truncate_at_artifacts(text: &str) -> &str {
    let cut = ARTIFACT_MARKERS
        .iter()
        .filter_map(|marker| text.find(marker))
        .min();

    match cut {
        Some(pos) => &text[..pos],
        None => text,
    }
}

/// Split after `.`, `!` or `?` followed by whitespace
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for m in RE_SENTENCE_BREAK.find_iter(text) {
        // Keep the punctuation (one ASCII byte) with its sentence
        sentences.push(&text[start..m.start() + 1]);
        start = m.end();
    }
    sentences.push(&text[start..]);

    sentences
}

fn capitalize_first(sentence: &str) -> String {
    let mut chars = sentence.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn needs_engagement(response: &str, threshold: usize) -> bool {
    if response.split_whitespace().count() <= threshold {
        return false;
    }
    let lowered = response.to_lowercase();
    !COLLABORATIVE_MARKERS.iter().any(|m| lowered.contains(m))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// 30 words, no collaborative marker
    const LONG_PLAIN: &str = "it sounds like this week has been heavy for you. \
        many people feel drained after long stretches of pressure at work. \
        noticing the pattern is a useful first step toward changing it over time.";

    #[test]
    fn test_empty_returns_fallback() {
        let mut normalizer = ResponseNormalizer::seeded(1);
        assert_eq!(normalizer.normalize(""), FALLBACK_RESPONSE);
        assert_eq!(normalizer.normalize("   \n "), FALLBACK_RESPONSE);
    }

    #[test]
    fn test_fully_consumed_by_marker_returns_fallback() {
        let mut normalizer = ResponseNormalizer::seeded(1);
        assert_eq!(normalizer.normalize("<|endoftext|>"), FALLBACK_RESPONSE);
        assert_eq!(normalizer.normalize("  ### Notes"), FALLBACK_RESPONSE);
        assert_eq!(normalizer.normalize("User: hi"), FALLBACK_RESPONSE);
    }

    #[test]
    fn test_truncates_at_earliest_marker() {
        assert_eq!(
            truncate_at_artifacts("Okay. ### heading <|endoftext|>"),
            "Okay. "
        );
        assert_eq!(
            truncate_at_artifacts("I hear you. <|endoftext|>User: next question"),
            "I hear you. "
        );
        assert_eq!(truncate_at_artifacts("No markers here"), "No markers here");
    }

    #[test]
    fn test_endoftext_scenario() {
        let mut normalizer = ResponseNormalizer::seeded(7);
        assert_eq!(
            normalizer.normalize("I understand. <|endoftext|>User: next question"),
            "I understand."
        );
    }

    #[test]
    fn test_capitalizes_every_sentence() {
        assert_eq!(
            clean("that makes sense.   it is hard!  what helped before?\nmaybe rest."),
            "That makes sense. It is hard! What helped before? Maybe rest."
        );
    }

    #[test]
    fn test_punctuation_without_space_not_split() {
        assert_eq!(clean("see e.g.this one. next"), "See e.g.this one. Next");
    }

    #[test]
    fn test_non_ascii_first_letter() {
        assert_eq!(clean("élan returns. ça va"), "Élan returns. Ça va");
    }

    #[test]
    fn test_short_reply_not_extended() {
        let mut normalizer = ResponseNormalizer::seeded(3);
        let out = normalizer.normalize("that sounds really difficult.");
        assert_eq!(out, "That sounds really difficult.");
    }

    #[test]
    fn test_long_reply_gets_engagement_question() {
        let mut normalizer = ResponseNormalizer::seeded(3);
        let out = normalizer.normalize(LONG_PLAIN);

        let cleaned = clean(LONG_PLAIN);
        assert!(out.starts_with(&cleaned));
        let appended = out[cleaned.len()..].trim();
        assert!(ENGAGEMENT_QUESTIONS.contains(&appended), "unexpected ending: {}", appended);
    }

    #[test]
    fn test_long_reply_with_marker_untouched() {
        let mut normalizer = ResponseNormalizer::seeded(3);
        let text = format!("{} Perhaps we can explore it together.", LONG_PLAIN);
        let out = normalizer.normalize(&text);
        assert_eq!(out, clean(&text));
    }

    #[test]
    fn test_marker_match_is_case_insensitive() {
        let mut normalizer = ResponseNormalizer::seeded(3);
        let text = format!("{} WHAT comes next is up to you.", LONG_PLAIN);
        assert_eq!(normalizer.normalize(&text), clean(&text));
    }

    #[test]
    fn test_same_seed_same_choice() {
        let mut a = ResponseNormalizer::seeded(42);
        let mut b = ResponseNormalizer::seeded(42);
        for _ in 0..5 {
            assert_eq!(a.normalize(LONG_PLAIN), b.normalize(LONG_PLAIN));
        }
    }

    #[test]
    fn test_custom_threshold() {
        let mut normalizer = ResponseNormalizer::seeded(3).engagement_threshold(2);
        let out = normalizer.normalize("rest is important today.");
        assert!(out.len() > "Rest is important today.".len());
    }
}
