use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Prefix of the per-product keys exchanged with the suggestion model.
pub const PRODUCT_UID_PREFIX: &str = "PROD_";

/// Key for the product at `position` within a batch, e.g. `"PROD_3"`.
#[inline]
pub fn product_uid(position: usize) -> String {
    format!("{}{}", PRODUCT_UID_PREFIX, position)
}

/// Parses a `"PROD_<n>"` key back into a batch position.
pub fn parse_product_uid(uid: &str) -> Option<usize> {
    uid.trim().strip_prefix(PRODUCT_UID_PREFIX)?.parse().ok()
}

/// Semantic hints for one product from the suggestion collaborator.
///
/// Every field is optional and decodes on its own: missing, `null` or
/// mistyped fields fall back to their defaults without discarding the rest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Suggestion {
    #[serde(deserialize_with = "lenient_string")]
    pub product_type: Option<String>,
    /// Formal taxonomy terms describing the product, e.g. `["dresses", "gowns"]`.
    #[serde(deserialize_with = "lenient_terms")]
    pub taxonomy_keywords: Vec<String>,
    /// A full category path, e.g. `"Apparel & Accessories > Clothing > Dresses"`.
    #[serde(deserialize_with = "lenient_string")]
    pub suggested_category: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub refined_title: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub description: Option<String>,
}

impl Suggestion {
    /// The suggested category path, if present and not blank.
    pub fn category(&self) -> Option<&str> {
        non_blank(self.suggested_category.as_deref())
    }

    /// Translated terms joined by spaces, skipping blank ones.
    pub fn translated_query(&self) -> String {
        self.taxonomy_keywords
            .iter()
            .map(|term| term.trim())
            .filter(|term| !term.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn has_translated_terms(&self) -> bool {
        self.taxonomy_keywords.iter().any(|term| !term.trim().is_empty())
    }

    /// Returns `true` if the suggestion carries a category or any translated term.
    pub fn is_usable(&self) -> bool {
        self.category().is_some() || self.has_translated_terms()
    }

    pub fn refined_title(&self) -> Option<&str> {
        non_blank(self.refined_title.as_deref())
    }

    pub fn description(&self) -> Option<&str> {
        non_blank(self.description.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Strings pass through; any other JSON value becomes `None`.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        _ => None,
    })
}

/// A term list or a single term; non-string elements are dropped.
fn lenient_terms<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(term) => vec![term],
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(term) => Some(term),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

/// Suggestions for one batch, keyed by position within the batch.
///
/// Positions with no entry are products the collaborator said nothing about.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuggestionBatch {
    entries: BTreeMap<usize, Suggestion>,
}

impl SuggestionBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, position: usize, suggestion: Suggestion) {
        self.entries.insert(position, suggestion);
    }

    #[inline]
    pub fn get(&self, position: usize) -> Option<&Suggestion> {
        self.entries.get(&position)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in position order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Suggestion)> {
        self.entries.iter().map(|(&pos, s)| (pos, s))
    }
}

impl FromIterator<(usize, Suggestion)> for SuggestionBatch {
    fn from_iter<I: IntoIterator<Item = (usize, Suggestion)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for SuggestionBatch {
    type Item = (usize, Suggestion);
    type IntoIter = std::collections::btree_map::IntoIter<usize, Suggestion>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
