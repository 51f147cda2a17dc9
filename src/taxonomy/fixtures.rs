//! Small realistic taxonomy for tests and benches.

use super::index::TaxonomyIndex;

/// `(id, path)` pairs drawn from the shapes of a real product taxonomy.
pub const SAMPLE_CATEGORIES: &[(&str, &str)] = &[
    ("t-0", "Apparel & Accessories"),
    ("t-1", "Apparel & Accessories > Clothing"),
    ("t-2", "Apparel & Accessories > Clothing > Dresses"),
    ("t-3", "Apparel & Accessories > Clothing > Underwear > Period Underwear"),
    ("t-4", "Apparel & Accessories > Clothing > Swimwear"),
    ("t-5", "Apparel & Accessories > Clothing > Activewear"),
    ("t-6", "Apparel & Accessories > Baby & Toddler Clothing > Baby One-Pieces"),
    ("t-7", "Apparel & Accessories > Clothing > Outerwear > Coats & Jackets"),
    ("t-8", "Home & Garden"),
    ("t-9", "Home & Garden > Kitchen & Dining"),
    ("t-10", "Home & Garden > Kitchen & Dining > Kitchen Tools & Utensils > Kitchen Knives"),
    ("t-11", "Home & Garden > Kitchen & Dining > Kitchen Tools & Utensils > Kitchen Knives > Knife Sets"),
    ("t-12", "Home & Garden > Household Supplies > Household Cleaning Supplies > Stainless Steel Cleaners"),
    ("t-13", "Sporting Goods > Outdoor Recreation > Cycling > Bicycle Parts > Bicycle Frames"),
    ("t-14", "Sporting Goods > Outdoor Recreation > Cycling > Bicycles"),
    ("t-15", "Sporting Goods > Exercise & Fitness > Cardio > Cardio Machines > Exercise Bikes"),
    ("t-16", "Electronics > Computers > Tablet Computers"),
    ("t-17", "Electronics > Electronics Accessories > Digital Photo Frames"),
    ("t-18", "Vehicles & Parts > Vehicle Parts & Accessories > Motor Vehicle Parts > Motorcycle Frames"),
    ("t-19", "Health & Beauty > Personal Care > Cosmetics > Makeup"),
    ("t-20", "Food, Beverages & Tobacco > Food Items > Cooking & Baking Ingredients > Cooking Oils"),
    ("t-21", "Health & Beauty > Health Care > Aromatherapy > Essential Oils"),
    ("t-22", "Electronics > Audio > Audio Accessories > Microphone Accessories"),
    ("t-23", "Sporting Goods > Exercise & Fitness > Foam Rollers"),
];

/// Builds an index over [`SAMPLE_CATEGORIES`].
pub fn sample_index() -> TaxonomyIndex {
    TaxonomyIndex::from_categories(SAMPLE_CATEGORIES.iter().copied())
}

/// [`SAMPLE_CATEGORIES`] as a flat JSON dataset.
pub fn sample_dataset_json() -> String {
    let records: Vec<serde_json::Value> = SAMPLE_CATEGORIES
        .iter()
        .map(|(id, path)| serde_json::json!({ "id": id, "full_name": path }))
        .collect();
    serde_json::Value::Array(records).to_string()
}
