//! Candidate ranking: lexical scoring, context rules and selection.
//!
//! Scoring runs in three phases over every category path:
//!
//! 1. Phrases: each run of three consecutive query keywords found in a path adds
//!    `phrase_triple` points, each run of two adds `phrase_pair`.
//! 2. Keywords: each keyword indexed for a path adds `exact`; a keyword that only
//!    appears inside the path text (e.g. `"bike"` in `"bikes"`) adds `substring`.
//! 3. Context rules from [`crate::rules`] scale the accumulated score.
//!
//! [`select`] then rounds, sorts and caps the result.

pub mod scorer;
pub mod selector;
pub mod types;


pub use scorer::Ranker;
pub use selector::select;
pub use types::{Candidate, CategoryScores};
