//! On-disk taxonomy shapes.
//!
//! Two layouts are accepted:
//!
//! ```json
//! [{ "id": "gid://...", "full_name": "Home & Garden > Kitchen & Dining" }]
//! ```
//!
//! ```json
//! { "verticals": [{ "categories": [{ "id": 1, "name": "Electronics" }] }] }
//! ```

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use serde_json::error::Category;
use tracing::debug;

use super::error::{TaxonomyError, TaxonomyResult};
use crate::pipeline::types::null_as_default;

/// Top-level shape only; verticals and records are decoded one at a time so a
/// malformed entry is skipped instead of rejecting the whole dataset.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TaxonomyDataset {
    Nested { verticals: Vec<Value> },
    Flat(Vec<Value>),
}

#[derive(Debug, Deserialize)]
struct Vertical {
    #[serde(default, deserialize_with = "null_as_default")]
    categories: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CategoryRecord {
    #[serde(default)]
    id: Option<RecordId>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    full_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecordId {
    Text(String),
    Number(serde_json::Number),
}

impl CategoryRecord {
    /// Returns `(id, path)` if the record carries a non-empty name and an id.
    ///
    /// `full_name` wins over `name` when both are present and non-empty.
    pub(crate) fn into_entry(self) -> Option<(String, String)> {
        let name = self
            .full_name
            .filter(|n| !n.trim().is_empty())
            .or(self.name.filter(|n| !n.trim().is_empty()))?;

        let id = match self.id? {
            RecordId::Text(text) if !text.trim().is_empty() => text,
            RecordId::Text(_) => return None,
            RecordId::Number(number) => number.to_string(),
        };

        Some((id, name))
    }
}

/// Parses dataset bytes and flattens them into category records.
///
/// Only a wrong top-level shape is an error. Verticals and records that fail to
/// decode are logged and dropped.
pub(crate) fn parse_records(bytes: &[u8]) -> TaxonomyResult<Vec<CategoryRecord>> {
    let dataset: TaxonomyDataset = serde_json::from_slice(bytes).map_err(|e| match e.classify() {
        Category::Data => TaxonomyError::UnrecognizedSchema {
            reason: "expected a category array or an object with `verticals`".to_string(),
        },
        _ => TaxonomyError::InvalidJson(e),
    })?;

    let records = match dataset {
        TaxonomyDataset::Nested { verticals } => verticals
            .into_iter()
            .enumerate()
            .filter_map(|(i, vertical)| decode::<Vertical>("vertical", i, vertical))
            .flat_map(|vertical| vertical.categories)
            .collect(),
        TaxonomyDataset::Flat(records) => records,
    };

    Ok(records
        .into_iter()
        .enumerate()
        .filter_map(|(i, record)| decode::<CategoryRecord>("record", i, record))
        .collect())
}

fn decode<T: DeserializeOwned>(kind: &'static str, position: usize, value: Value) -> Option<T> {
    match serde_json::from_value(value) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            debug!(kind, position, error = %e, "Skipping malformed taxonomy entry");
            None
        }
    }
}
