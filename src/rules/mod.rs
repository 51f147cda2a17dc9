//! Contextual score adjustments.
//!
//! Lexical matching alone confuses product nouns with category adjectives
//! ("stainless steel knife" vs "stainless steel cleaners"). Each [`ContextRule`]
//! pairs a title signal with a category pattern and a multiplicative factor.
//! Factors compose as a running product, so the order rules are listed in never
//! changes the final score.
//!
//! [`RuleSet::active_for`] evaluates title triggers once per query; the returned
//! [`ActiveRules`] is then checked against each candidate path.

pub mod catalog;
pub mod rule;
pub mod set;
pub mod trigger;


pub use catalog::{NEAR_ZERO, standard_rules};
pub use rule::ContextRule;
pub use set::{ActiveRules, RuleSet};
pub use trigger::Trigger;
