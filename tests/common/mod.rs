//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use taxon::Suggestion;
use taxon::taxonomy::fixtures::sample_dataset_json;

pub const DRESSES: &str = "Apparel & Accessories > Clothing > Dresses";
pub const KITCHEN_DINING: &str = "Home & Garden > Kitchen & Dining";
pub const KITCHEN_KNIVES: &str =
    "Home & Garden > Kitchen & Dining > Kitchen Tools & Utensils > Kitchen Knives";

pub const GOWN: &str = "Midnight Silk Evening Gown - Ruby Red";
pub const CHEF_KNIFE: &str = "Professional Chef Knife";
pub const BOMBER: &str = "Vintage Bomber Jacket";

/// A temporary directory holding one taxonomy dataset file.
pub struct DatasetFile {
    _dir: TempDir,
    path: PathBuf,
}

impl DatasetFile {
    pub fn new(contents: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("taxonomy.json");
        std::fs::write(&path, contents).unwrap();
        Self { _dir: dir, path }
    }

    pub fn sample() -> Self {
        Self::new(&sample_dataset_json())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn rewrite(&self, contents: &str) {
        std::fs::write(&self.path, contents).unwrap();
    }
}

/// The sample dataset plus extra `(id, path)` records.
pub fn sample_dataset_with(extra: &[(&str, &str)]) -> String {
    let mut records: Vec<serde_json::Value> = serde_json::from_str(&sample_dataset_json()).unwrap();
    records.extend(
        extra
            .iter()
            .map(|(id, path)| serde_json::json!({ "id": id, "full_name": path })),
    );
    serde_json::Value::Array(records).to_string()
}

pub fn suggestion(category: Option<&str>, keywords: &[&str]) -> Suggestion {
    Suggestion {
        suggested_category: category.map(str::to_string),
        taxonomy_keywords: keywords.iter().map(|k| k.to_string()).collect(),
        ..Suggestion::default()
    }
}

pub fn gown_suggestion() -> Suggestion {
    Suggestion {
        product_type: Some("Evening Dresses".to_string()),
        refined_title: Some("Silk Evening Gown".to_string()),
        description: Some("An elegant silk gown for formal evenings.".to_string()),
        ..suggestion(
            Some("Apparel & Accessories > Clothing > Dresses > Evening Dresses"),
            &["dresses", "clothing"],
        )
    }
}
