//! Taxon library crate (used by the `taxon` binary and integration tests).
//!
//! Maps free-text product titles onto a fixed hierarchical category taxonomy.
//!
//! # Public API Surface
//!
//! ## Ranking Core
//! - [`TaxonomyIndex`], [`TaxonomyHandle`] - Immutable category index and its hot-swappable handle
//! - [`Ranker`], [`Candidate`], [`select`] - Lexical scoring, context rules, candidate selection
//! - [`RuleSet`], [`ContextRule`], [`Trigger`] - Data-driven score adjustments
//! - [`tokenize`] - Keyword normalization shared by indexing and querying
//!
//! ## Decisions
//! - [`DecisionPipeline`], [`Decision`], [`DecisionMethod`] - Per-product fallback chain
//! - [`Categorizer`], [`CategorizedProduct`], [`CategorizationSummary`] - Batch orchestration
//!
//! ## Suggestions
//! - [`SuggestionProvider`], [`Suggestion`], [`SuggestionBatch`] - External semantic hints
//! - [`GenAiSuggestionProvider`], [`CachedSuggestionProvider`], [`StaticSuggestionProvider`]
//!
//! ## Test/Mock Support
//! Mock implementations and the sample taxonomy are available behind
//! `#[cfg(any(test, feature = "mock"))]`.

pub mod categorize;
pub mod config;
pub mod constants;
pub mod hashing;
pub mod pipeline;
pub mod ranking;
pub mod rules;
pub mod suggest;
pub mod taxonomy;
pub mod text;

pub use categorize::{CategorizationReport, CategorizationSummary, CategorizedProduct, Categorizer};
pub use config::{Config, ConfigError};
pub use constants::{ScoringWeights, WeightsError};
pub use pipeline::{Decision, DecisionMethod, DecisionPipeline, Product};
pub use ranking::{Candidate, CategoryScores, Ranker, select};
pub use rules::{ContextRule, RuleSet, Trigger};
pub use suggest::{
    CachedSuggestionProvider, GenAiSuggestionProvider, StaticSuggestionProvider, SuggestError,
    SuggestResult, Suggestion, SuggestionBatch, SuggestionProvider,
};
#[cfg(any(test, feature = "mock"))]
pub use suggest::MockSuggestionProvider;
pub use taxonomy::{
    CategoryNode, IndexSource, ReloadOutcome, TaxonomyError, TaxonomyHandle, TaxonomyIndex,
    TaxonomyResult,
};
pub use text::tokenize;
