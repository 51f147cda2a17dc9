use tracing::{debug, trace};

use super::selector::select;
use super::types::{Candidate, CategoryScores};
use crate::constants::{DEFAULT_MAX_CANDIDATES, ScoringWeights, WeightsError};
use crate::rules::RuleSet;
use crate::taxonomy::TaxonomyIndex;
use crate::text::tokenize;

/// Lexical scorer with contextual adjustments.
///
/// Stateless apart from its configuration; a single `Ranker` can serve any
/// number of concurrent queries against any index.
#[derive(Debug, Clone)]
pub struct Ranker {
    weights: ScoringWeights,
    rules: RuleSet,
    max_candidates: usize,
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new(ScoringWeights::default(), RuleSet::standard())
    }
}

impl Ranker {
    /// Builds a ranker without checking `weights`; see [`try_new`](Self::try_new).
    pub fn new(weights: ScoringWeights, rules: RuleSet) -> Self {
        Self {
            weights,
            rules,
            max_candidates: DEFAULT_MAX_CANDIDATES,
        }
    }

    /// Builds a ranker after [`ScoringWeights::validate`] accepts `weights`.
    pub fn try_new(weights: ScoringWeights, rules: RuleSet) -> Result<Self, WeightsError> {
        weights.validate()?;
        Ok(Self::new(weights, rules))
    }

    /// Sets the candidate cap used by [`rank_candidates`](Self::rank_candidates).
    pub fn with_max_candidates(mut self, max_candidates: usize) -> Self {
        self.max_candidates = max_candidates;
        self
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn max_candidates(&self) -> usize {
        self.max_candidates
    }

    /// Scores `query` and returns the top candidates, best first.
    pub fn rank_candidates(&self, query: &str, index: &TaxonomyIndex) -> Vec<Candidate> {
        let scores = self.score(query, index);
        let candidates = select(&scores, self.max_candidates);

        if let Some(top) = candidates.first() {
            debug!(
                query_len = query.len(),
                scored = scores.len(),
                top_path = %top.path,
                top_score = top.score,
                "Ranked candidates"
            );
        }

        candidates
    }

    /// Phrase and keyword scoring followed by context rules.
    pub fn score<'a>(&self, query: &str, index: &'a TaxonomyIndex) -> CategoryScores<'a> {
        let mut scores = self.score_raw(query, index);
        if scores.is_empty() {
            return scores;
        }

        let active = self.rules.active_for(query);
        if active.is_empty() {
            return scores;
        }
        trace!(rules = ?active.names().collect::<Vec<_>>(), "Active context rules");

        for (node, score) in scores.scores_mut() {
            *score = active.adjust(&node.path_lower, *score);
        }

        scores
    }

    /// Phrase and keyword scoring only, before any context rule.
    pub fn score_raw<'a>(&self, query: &str, index: &'a TaxonomyIndex) -> CategoryScores<'a> {
        let mut scores = CategoryScores::new(index);
        let keywords = tokenize(query);
        if keywords.is_empty() || index.is_empty() {
            return scores;
        }

        self.score_phrases(&keywords, index, &mut scores);
        self.score_keywords(&keywords, index, &mut scores);

        scores
    }

    fn score_phrases(&self, keywords: &[String], index: &TaxonomyIndex, scores: &mut CategoryScores<'_>) {
        for (i, pair) in keywords.windows(2).enumerate() {
            if let Some(third) = keywords.get(i + 2) {
                let phrase = format!("{} {} {}", pair[0], pair[1], third);
                add_substring_hits(&phrase, self.weights.phrase_triple, index, scores);
            }

            let phrase = format!("{} {}", pair[0], pair[1]);
            add_substring_hits(&phrase, self.weights.phrase_pair, index, scores);
        }
    }

    fn score_keywords(&self, keywords: &[String], index: &TaxonomyIndex, scores: &mut CategoryScores<'_>) {
        for keyword in keywords {
            for position in index.keyword_positions(keyword) {
                scores.add(position, self.weights.exact);
            }

            for (position, node) in index.nodes().iter().enumerate() {
                if node.path_lower.contains(keyword.as_str()) && !index.has_keyword(keyword, position) {
                    scores.add(position, self.weights.substring);
                }
            }
        }
    }
}

fn add_substring_hits(
    phrase: &str,
    points: f64,
    index: &TaxonomyIndex,
    scores: &mut CategoryScores<'_>,
) {
    for (position, node) in index.nodes().iter().enumerate() {
        if node.path_lower.contains(phrase) {
            scores.add(position, points);
        }
    }
}
