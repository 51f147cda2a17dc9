use indexmap::IndexMap;
use serde::Serialize;

use crate::taxonomy::{CategoryNode, TaxonomyIndex};

/// A scored taxonomy path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub path: String,
    pub id: String,
    /// Score rounded to one decimal place.
    pub score: f64,
}

impl Candidate {
    /// Returns `true` if `score >= threshold`.
    #[inline]
    pub fn meets(&self, threshold: f64) -> bool {
        self.score >= threshold
    }
}

impl std::fmt::Display for Candidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (score: {:.1})", self.path, self.score)
    }
}

/// Per-category scores for one query, in order of each path's first contribution.
#[derive(Clone)]
pub struct CategoryScores<'a> {
    index: &'a TaxonomyIndex,
    scores: IndexMap<usize, f64>,
}

impl<'a> CategoryScores<'a> {
    pub(crate) fn new(index: &'a TaxonomyIndex) -> Self {
        Self {
            index,
            scores: IndexMap::new(),
        }
    }

    #[inline]
    pub(crate) fn add(&mut self, position: usize, points: f64) {
        *self.scores.entry(position).or_insert(0.0) += points;
    }

    pub(crate) fn scores_mut(&mut self) -> impl Iterator<Item = (&CategoryNode, &mut f64)> {
        let index = self.index;
        self.scores
            .iter_mut()
            .map(move |(&pos, score)| (&index.nodes()[pos], score))
    }

    /// Score for a full path (case-insensitive), if it received any points.
    pub fn get(&self, path: &str) -> Option<f64> {
        let position = self.index.position_of(path)?;
        self.scores.get(&position).copied()
    }

    /// Scored nodes in first-contribution order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a CategoryNode, f64)> + '_ {
        let index = self.index;
        self.scores
            .iter()
            .map(move |(&pos, &score)| (&index.nodes()[pos], score))
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// The index these scores refer to.
    pub fn index(&self) -> &'a TaxonomyIndex {
        self.index
    }
}

impl std::fmt::Debug for CategoryScores<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(node, score)| (node.path.as_str(), score)))
            .finish()
    }
}
