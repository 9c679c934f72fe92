//! Sentiment scoring
//!
//! `SentimentScorer` is the seam for an external scorer. The built-in
//! `LexiconSentimentScorer` is a small valence-lexicon scorer: word valences
//! in [-4, 4], negation flips, intensifier boosts, exclamation emphasis, and
//! a compound score normalized into [-1, 1].

use std::collections::HashMap;
use lazy_static::lazy_static;

use crate::types::SentimentScore;

/// Anything that can score the sentiment of a text
pub trait SentimentScorer: Send + Sync {
    fn score(&self, text: &str) -> SentimentScore;
}

/// Scaling applied to a negated valence
const NEGATION_SCALAR: f64 = -0.74;

/// Added to a valence preceded by an intensifier
const BOOSTER_INCREMENT: f64 = 0.293;

/// Added per exclamation mark, up to four
const EXCLAMATION_INCREMENT: f64 = 0.292;

/// Normalization constant for the compound score
const NORMALIZATION_ALPHA: f64 = 15.0;

/// How many preceding tokens are checked for negation
const NEGATION_WINDOW: usize = 3;

const VALENCES: &[(&str, f64)] = &[
    // negative
    ("afraid", -2.2), ("alone", -1.0), ("angry", -2.3), ("annoyed", -1.6),
    ("anxious", -1.0), ("awful", -2.0), ("bad", -2.5), ("broken", -1.4),
    ("cry", -2.1), ("crying", -2.1), ("dead", -3.3), ("depressed", -2.3),
    ("die", -2.9), ("empty", -0.8), ("exhausted", -1.5), ("fail", -2.5),
    ("failure", -2.3), ("fear", -2.2), ("frustrated", -2.0), ("furious", -2.7),
    ("guilty", -1.8), ("hate", -2.7), ("hopeless", -2.0), ("hurt", -2.4),
    ("lonely", -1.5), ("lost", -1.3), ("miserable", -2.2), ("nervous", -1.1),
    ("pain", -2.3), ("panic", -2.3), ("rage", -2.6), ("ruined", -2.4),
    ("sad", -2.1), ("scared", -1.9), ("stress", -1.8), ("stressed", -1.4),
    ("stupid", -2.4), ("suicide", -3.5), ("terrible", -2.1), ("tired", -1.9),
    ("unhappy", -1.8), ("upset", -1.6), ("useless", -1.8), ("worried", -1.2),
    ("worthless", -1.9), ("worse", -2.1), ("worst", -3.1),
    // positive
    ("better", 1.9), ("calm", 1.3), ("confident", 2.2), ("enjoy", 2.2),
    ("excited", 1.4), ("fine", 0.8), ("glad", 2.0), ("good", 1.9),
    ("great", 3.1), ("grateful", 1.9), ("happy", 2.7), ("help", 1.7),
    ("helpful", 1.8), ("hope", 1.9), ("hopeful", 2.3), ("love", 3.2),
    ("nice", 1.8), ("okay", 0.9), ("proud", 2.1), ("relaxed", 2.2),
    ("relief", 2.1), ("safe", 1.9), ("support", 1.7), ("thank", 1.5),
    ("thanks", 1.9), ("wonderful", 2.7),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "don't", "dont", "can't", "cant", "cannot",
    "isn't", "isnt", "wasn't", "wasnt", "won't", "wont", "nothing", "nobody",
    "neither", "nor", "without", "hardly",
];

const BOOSTERS: &[&str] = &[
    "very", "really", "so", "extremely", "totally", "completely",
    "incredibly", "absolutely", "deeply", "super",
];

lazy_static! {
    static ref LEXICON: HashMap<&'static str, f64> = VALENCES.iter().copied().collect();
}

/// Lexicon-based sentiment scorer
#[derive(Debug, Default, Clone, Copy)]
pub struct LexiconSentimentScorer;

impl LexiconSentimentScorer {
    /// Create new scorer
    pub fn new() -> Self {
        Self
    }
}

impl SentimentScorer for LexiconSentimentScorer {
    fn score(&self, text: &str) -> SentimentScore {
        let tokens: Vec<String> = text
            .split_whitespace()
            .map(|w| {
                w.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
                    .to_lowercase()
            })
            .filter(|w| !w.is_empty())
            .collect();

        if tokens.is_empty() {
            return SentimentScore::default();
        }

        let valences: Vec<f64> = tokens
            .iter()
            .enumerate()
            .map(|(i, token)| token_valence(&tokens, i, token))
            .collect();

        let mut sum: f64 = valences.iter().sum();
        if sum != 0.0 {
            let bangs = text.matches('!').count().min(4) as f64;
            sum += bangs * EXCLAMATION_INCREMENT * sum.signum();
        }

        let mut positive = 0.0;
        let mut negative = 0.0;
        let mut neutral = 0.0;
        for v in &valences {
            if *v > 0.0 {
                positive += v + 1.0;
            } else if *v < 0.0 {
                negative += v.abs() + 1.0;
            } else {
                neutral += 1.0;
            }
        }
        let total = positive + negative + neutral;

        SentimentScore {
            compound: normalize(sum),
            positive: positive / total,
            negative: negative / total,
            neutral: neutral / total,
        }
    }
}

/// Valence of the token at `index`, adjusted for intensifiers and negation
fn token_valence(tokens: &[String], index: usize, token: &str) -> f64 {
    let Some(&base) = LEXICON.get(token) else {
        return 0.0;
    };

    let mut valence = base;

    if index > 0 && BOOSTERS.contains(&tokens[index - 1].as_str()) {
        valence += BOOSTER_INCREMENT * valence.signum();
    }

    let window_start = index.saturating_sub(NEGATION_WINDOW);
    let negated = tokens[window_start..index]
        .iter()
        .any(|t| NEGATIONS.contains(&t.as_str()));
    if negated {
        valence *= NEGATION_SCALAR;
    }

    valence
}

/// Map an unbounded sum into [-1, 1]
fn normalize(sum: f64) -> f64 {
    (sum / (sum * sum + NORMALIZATION_ALPHA).sqrt()).clamp(-1.0, 1.0)
}

// =============================================================================
// TESTS
// =============================================================================
