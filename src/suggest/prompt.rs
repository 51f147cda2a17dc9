use serde::Serialize;

use super::types::product_uid;
use crate::pipeline::Product;

/// Instructions sent as the system message of every suggestion request.
pub const SYSTEM_PROMPT: &str = r#"You map e-commerce product titles onto a standard product taxonomy.

Product titles use colloquial words ("onesie", "sneakers", "tee"); taxonomies use formal
plural nouns ("baby one-pieces", "athletic shoes", "t-shirts"). Translate the former into
the latter and ignore adjectives, materials and marketing words ("organic", "premium",
"stainless steel").

Reply with a single JSON object keyed by each product's "uid" ("PROD_0", "PROD_1", ...).
Each value must have these fields:
  "product_type":       the core product type, 1-3 words
  "taxonomy_keywords":  3-5 formal, plural taxonomy terms, e.g. ["dresses", "gowns", "formal wear"]
  "suggested_category": a full existing category path, e.g. "Apparel & Accessories > Clothing > Dresses"
  "refined_title":      a clean, properly capitalized title
  "description":        a product description of at least 15 words

Only suggest categories that exist in the taxonomy. When unsure, suggest a broader parent
category rather than inventing a subcategory.

Products:"#;

#[derive(Debug, Serialize)]
struct PromptItem<'a> {
    uid: String,
    title: &'a str,
    description: &'a str,
}

/// Renders a batch as the JSON array sent in the user message.
pub fn render_batch(products: &[Product]) -> serde_json::Result<String> {
    let items: Vec<PromptItem<'_>> = products
        .iter()
        .enumerate()
        .map(|(i, product)| PromptItem {
            uid: product_uid(i),
            title: product.title(),
            description: product.description(),
        })
        .collect();
    serde_json::to_string_pretty(&items)
}
