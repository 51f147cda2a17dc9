//! Cross-cutting, shared constants.
//!
//! Scoring weights live in [`ScoringWeights`] so they can be tuned at runtime; the
//! `DEFAULT_*` constants are the values every other module falls back to.

use thiserror::Error;

/// Tokens shorter than this are dropped by the tokenizer.
pub const MIN_WORD_LENGTH: usize = 3;

/// Articles, prepositions and conjunctions ignored by the tokenizer.
pub const STOP_WORDS: &[&str] = &[
    "and", "or", "the", "for", "with", "from", "to", "in", "on", "at", "by", "of",
];

pub const DEFAULT_BATCH_SIZE: usize = 15;
pub const DEFAULT_MAX_CANDIDATES: usize = 15;

/// Top-candidate score at or above which a keyword match is tagged `*_MATCH`.
pub const DEFAULT_AUTO_ACCEPT_SCORE: f64 = 20.0;

pub const DEFAULT_EXACT_MATCH_POINTS: f64 = 10.0;
pub const DEFAULT_SUBSTRING_MATCH_POINTS: f64 = 5.0;
pub const DEFAULT_PHRASE_PAIR_POINTS: f64 = 12.0;
pub const DEFAULT_PHRASE_TRIPLE_POINTS: f64 = 15.0;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Category label reported when no taxonomy node was chosen.
pub const UNCATEGORIZED_LABEL: &str = "General Marketplace";

/// Title reported for products submitted without one.
pub const UNTITLED_PRODUCT: &str = "Untitled Product";

/// Points awarded by each lexical scoring phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    /// Keyword found in the inverted index for a path.
    pub exact: f64,
    /// Keyword found as a substring of a path (and not already exact).
    pub substring: f64,
    /// Two consecutive keywords found as a phrase.
    pub phrase_pair: f64,
    /// Three consecutive keywords found as a phrase.
    pub phrase_triple: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            exact: DEFAULT_EXACT_MATCH_POINTS,
            substring: DEFAULT_SUBSTRING_MATCH_POINTS,
            phrase_pair: DEFAULT_PHRASE_PAIR_POINTS,
            phrase_triple: DEFAULT_PHRASE_TRIPLE_POINTS,
        }
    }
}

impl ScoringWeights {
    /// Validates that every weight is finite and positive, and that `exact > substring`.
    pub fn validate(&self) -> Result<(), WeightsError> {
        let named = [
            ("exact", self.exact),
            ("substring", self.substring),
            ("phrase_pair", self.phrase_pair),
            ("phrase_triple", self.phrase_triple),
        ];
        for (name, value) in named {
            if !value.is_finite() || value <= 0.0 {
                return Err(WeightsError::NonPositive { name, value });
            }
        }
        if self.exact <= self.substring {
            return Err(WeightsError::ExactNotAboveSubstring {
                exact: self.exact,
                substring: self.substring,
            });
        }
        Ok(())
    }
}

/// Error returned when [`ScoringWeights::validate`] fails.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeightsError {
    /// A weight is zero, negative, NaN or infinite.
    #[error("scoring weight '{name}' must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },
    /// The exact-match weight does not exceed the substring weight.
    #[error("exact weight {exact} must exceed substring weight {substring}")]
    ExactNotAboveSubstring { exact: f64, substring: f64 },
}
