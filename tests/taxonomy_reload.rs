//! Taxonomy datasets on disk: loading, hot reload and categorizer pickup.

mod common;

use std::sync::Arc;

use common::*;
use taxon::categorize::Categorizer;
use taxon::config::Config;
use taxon::pipeline::{DecisionMethod, Product};
use taxon::suggest::StaticSuggestionProvider;
use taxon::taxonomy::{ReloadOutcome, TaxonomyError, TaxonomyHandle, TaxonomyIndex};

const WOODEN_TOYS: &str = "Toys & Games > Toys > Wooden Toys";

fn categorizer(taxonomy: TaxonomyHandle) -> Categorizer {
    Categorizer::from_config(&Config::default(), taxonomy, Arc::new(StaticSuggestionProvider)).unwrap()
}

#[tokio::test]
async fn test_reload_picks_up_new_categories() {
    let dataset = DatasetFile::sample();
    let taxonomy = TaxonomyHandle::load(dataset.path());
    let categorizer = categorizer(taxonomy.clone());
    let products = [Product::new("Hand Carved Wooden Toys")];

    let before = categorizer.categorize(&products).await;
    assert_eq!(before.products[0].method, DecisionMethod::CompleteFailure);

    dataset.rewrite(&sample_dataset_with(&[("t-24", WOODEN_TOYS)]));
    let outcome = taxonomy.reload(dataset.path()).unwrap();
    assert_eq!(outcome, ReloadOutcome::Swapped { categories: 25 });

    let after = categorizer.categorize(&products).await;
    assert_eq!(after.products[0].category, WOODEN_TOYS);
    assert_eq!(after.products[0].category_id.as_deref(), Some("t-24"));
}

#[test]
fn test_reload_of_same_bytes_is_unchanged() {
    let dataset = DatasetFile::sample();
    let taxonomy = TaxonomyHandle::load(dataset.path());
    let before = taxonomy.snapshot();

    assert_eq!(taxonomy.reload(dataset.path()).unwrap(), ReloadOutcome::Unchanged);
    assert!(Arc::ptr_eq(&before, &taxonomy.snapshot()));
}

#[test]
fn test_broken_reload_keeps_serving() {
    let dataset = DatasetFile::sample();
    let taxonomy = TaxonomyHandle::load(dataset.path());

    dataset.rewrite("{ not json");
    assert!(matches!(
        taxonomy.reload(dataset.path()),
        Err(TaxonomyError::InvalidJson(_))
    ));

    dataset.rewrite("[]");
    assert!(matches!(taxonomy.reload(dataset.path()), Err(TaxonomyError::Empty)));

    assert_eq!(taxonomy.len(), 24);
    assert!(!taxonomy.snapshot().is_emergency());
}

#[test]
fn test_nested_dataset_file() {
    let dataset = DatasetFile::new(
        r#"{
            "version": "2025-01",
            "verticals": [
                { "name": "Toys", "categories": [
                    { "id": 101, "full_name": "Toys & Games" },
                    { "id": 102, "full_name": "Toys & Games > Toys > Wooden Toys" }
                ]},
                { "name": "Empty", "categories": [] },
                { "name": "Home", "categories": [
                    { "id": "gid://home/1", "name": "Home & Garden" },
                    { "id": null, "full_name": "Home & Garden > Orphan" }
                ]}
            ]
        }"#,
    );

    let index = TaxonomyIndex::try_load(dataset.path()).unwrap();
    assert_eq!(index.len(), 3);
    assert_eq!(index.lookup_exact(WOODEN_TOYS).map(|n| n.id.as_str()), Some("102"));
    assert_eq!(
        index.lookup_exact("home & garden").map(|n| n.id.as_str()),
        Some("gid://home/1")
    );
    assert!(index.lookup_exact("Home & Garden > Orphan").is_none());
}

#[test]
fn test_try_load_missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.json");

    match TaxonomyIndex::try_load(&path) {
        Err(TaxonomyError::Io { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected an I/O error, got {:?}", other.map(|i| i.len())),
    }
}
