use std::cmp::Ordering;

use super::types::{Candidate, CategoryScores};

/// Orders scored paths best first and keeps at most `max_candidates`.
///
/// Scores are rounded to one decimal before sorting. The sort is stable, so equal
/// scores keep the order in which paths first received points.
pub fn select(scores: &CategoryScores<'_>, max_candidates: usize) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = scores
        .iter()
        .map(|(node, score)| Candidate {
            path: node.path.clone(),
            id: node.id.clone(),
            score: round_one_decimal(score),
        })
        .collect();

    candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    candidates.truncate(max_candidates);
    candidates
}

#[inline]
pub(crate) fn round_one_decimal(score: f64) -> f64 {
    (score * 10.0).round() / 10.0
}
