use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use super::types::{Decision, DecisionMethod, Product};
use crate::ranking::Ranker;
use crate::suggest::Suggestion;
use crate::taxonomy::{CategoryNode, TaxonomyIndex};

static AMPERSAND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*&\s*").expect("ampersand pattern is valid"));

/// Everything a strategy may consult for one product.
#[derive(Debug, Clone, Copy)]
pub struct DecisionContext<'a> {
    pub product: &'a Product,
    pub suggestion: Option<&'a Suggestion>,
    pub index: &'a TaxonomyIndex,
    pub ranker: &'a Ranker,
    pub auto_accept_score: f64,
}

impl DecisionContext<'_> {
    fn decide_node(&self, node: &CategoryNode, method: DecisionMethod, score: Option<f64>) -> Decision {
        Decision {
            input_title: self.product.title().to_string(),
            chosen_category: Some(node.path.clone()),
            chosen_id: Some(node.id.clone()),
            method,
            score,
        }
    }

    /// Ranks `query` and wraps the top candidate, if any.
    fn decide_top(&self, query: &str, matched: DecisionMethod, fallback: DecisionMethod) -> Option<Decision> {
        let top = self.ranker.rank_candidates(query, self.index).into_iter().next()?;
        let method = if top.meets(self.auto_accept_score) {
            matched
        } else {
            fallback
        };
        Some(Decision {
            input_title: self.product.title().to_string(),
            chosen_category: Some(top.path),
            chosen_id: Some(top.id),
            method,
            score: Some(top.score),
        })
    }
}

/// One stage of the decision chain.
///
/// Returns `Some` to settle the product, `None` to defer to the next stage.
pub trait DecisionStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn attempt(&self, ctx: &DecisionContext<'_>) -> Option<Decision>;
}

/// Accepts the suggested category when it names an indexed path.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExternalVerification;

impl DecisionStrategy for ExternalVerification {
    fn name(&self) -> &'static str {
        "external-verification"
    }

    fn attempt(&self, ctx: &DecisionContext<'_>) -> Option<Decision> {
        let suggested = ctx.suggestion?.category()?;
        let node = verify_suggested_path(suggested, ctx.index)?;
        Some(ctx.decide_node(node, DecisionMethod::VerifiedExternal, None))
    }
}

/// Looks up a suggested path exactly, then with ampersand spacing normalized.
pub fn verify_suggested_path<'a>(suggested: &str, index: &'a TaxonomyIndex) -> Option<&'a CategoryNode> {
    if let Some(node) = index.lookup_exact(suggested) {
        return Some(node);
    }

    let normalized = normalize_ampersands(&suggested.trim().to_lowercase());
    let node = index.lookup_exact(&normalized);
    if node.is_some() {
        trace!(suggested, normalized = %normalized, "Matched suggestion after ampersand normalization");
    }
    node
}

/// Rewrites every `&` with any surrounding whitespace as `" & "`.
pub fn normalize_ampersands(path: &str) -> String {
    AMPERSAND.replace_all(path, " & ").into_owned()
}

/// Ranks the translated terms from the suggestion.
#[derive(Debug, Clone, Copy, Default)]
pub struct TranslatedSearch;

impl DecisionStrategy for TranslatedSearch {
    fn name(&self) -> &'static str {
        "translated-search"
    }

    fn attempt(&self, ctx: &DecisionContext<'_>) -> Option<Decision> {
        let suggestion = ctx.suggestion?;
        if !suggestion.has_translated_terms() {
            return None;
        }
        ctx.decide_top(
            &suggestion.translated_query(),
            DecisionMethod::TranslatedMatch,
            DecisionMethod::TranslatedFallback,
        )
    }
}

/// Ranks the raw product title.
#[derive(Debug, Clone, Copy, Default)]
pub struct OriginalSearch;

impl DecisionStrategy for OriginalSearch {
    fn name(&self) -> &'static str {
        "original-search"
    }

    fn attempt(&self, ctx: &DecisionContext<'_>) -> Option<Decision> {
        ctx.decide_top(
            ctx.product.title(),
            DecisionMethod::OriginalMatch,
            DecisionMethod::OriginalFallback,
        )
    }
}

/// Ranks the raw title when no usable suggestion exists; any score is accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExternalFailedSearch;

impl DecisionStrategy for ExternalFailedSearch {
    fn name(&self) -> &'static str {
        "external-failed-search"
    }

    fn attempt(&self, ctx: &DecisionContext<'_>) -> Option<Decision> {
        ctx.decide_top(
            ctx.product.title(),
            DecisionMethod::ExternalFailedFallback,
            DecisionMethod::ExternalFailedFallback,
        )
    }
}

/// Ordered strategies ending in a terminal uncategorized method.
pub struct StrategyChain {
    strategies: Vec<Box<dyn DecisionStrategy>>,
    terminal: DecisionMethod,
}

impl StrategyChain {
    pub fn new(strategies: Vec<Box<dyn DecisionStrategy>>, terminal: DecisionMethod) -> Self {
        Self { strategies, terminal }
    }

    /// Verification, translated search, original search; ends in `NO_CANDIDATES`.
    pub fn assisted() -> Self {
        Self::new(
            vec![
                Box::new(ExternalVerification),
                Box::new(TranslatedSearch),
                Box::new(OriginalSearch),
            ],
            DecisionMethod::NoCandidates,
        )
    }

    /// Raw-title search only; ends in `COMPLETE_FAILURE`.
    pub fn unassisted() -> Self {
        Self::new(vec![Box::new(ExternalFailedSearch)], DecisionMethod::CompleteFailure)
    }

    /// Runs strategies in order; the first `Some` wins.
    pub fn run(&self, ctx: &DecisionContext<'_>) -> Decision {
        for strategy in &self.strategies {
            if let Some(decision) = strategy.attempt(ctx) {
                trace!(strategy = strategy.name(), method = %decision.method, "Strategy settled product");
                return decision;
            }
        }
        Decision::uncategorized(ctx.product.title(), self.terminal)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    pub fn terminal(&self) -> DecisionMethod {
        self.terminal
    }
}

impl std::fmt::Debug for StrategyChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategyChain")
            .field("strategies", &self.names())
            .field("terminal", &self.terminal)
            .finish()
    }
}
