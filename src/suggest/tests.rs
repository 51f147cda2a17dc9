use std::sync::Arc;

use super::*;
use crate::pipeline::Product;

fn dress_suggestion() -> Suggestion {
    Suggestion {
        product_type: Some("Evening Dresses".to_string()),
        taxonomy_keywords: vec!["dresses".to_string(), "gowns".to_string()],
        suggested_category: Some("Apparel & Accessories > Clothing > Dresses".to_string()),
        refined_title: Some("Silk Evening Gown".to_string()),
        description: Some("An elegant silk gown.".to_string()),
    }
}

// Parsing

#[test]
fn test_parse_direct_object() {
    let reply = r#"{
        "PROD_0": {"product_type": "Dresses", "taxonomy_keywords": ["dresses"], "suggested_category": "A > B"},
        "PROD_2": {"refined_title": "Knife"}
    }"#;
    let batch = parse_suggestions(reply).unwrap();

    assert_eq!(batch.len(), 2);
    assert_eq!(batch.get(0).unwrap().category(), Some("A > B"));
    assert!(batch.get(1).is_none());
    assert_eq!(batch.get(2).unwrap().refined_title(), Some("Knife"));
}

#[test]
fn test_parse_json_fence() {
    let reply = "Here you go:\n```json\n{\"PROD_0\": {\"taxonomy_keywords\": [\"knives\"]}}\n```\nThanks!";
    let batch = parse_suggestions(reply).unwrap();
    assert_eq!(batch.get(0).unwrap().translated_query(), "knives");
}

#[test]
fn test_parse_bare_fence() {
    let reply = "```\n{\"PROD_1\": {\"suggested_category\": \"Home & Garden\"}}\n```";
    let batch = parse_suggestions(reply).unwrap();
    assert_eq!(batch.get(1).unwrap().category(), Some("Home & Garden"));
}

#[test]
fn test_parse_embedded_object() {
    let reply = "Sure! {\"PROD_0\": {\"product_type\": \"Tea\"}} Let me know if you need more.";
    let batch = parse_suggestions(reply).unwrap();
    assert_eq!(batch.get(0).unwrap().product_type.as_deref(), Some("Tea"));
}

#[test]
fn test_parse_embedded_array() {
    let reply = r#"Result: [{"uid": "PROD_1", "product_type": "Tea"}, {"uid": "PROD_0", "product_type": "Bowls"}] end"#;
    let batch = parse_suggestions(reply).unwrap();
    assert_eq!(batch.len(), 2);
    assert_eq!(batch.get(0).unwrap().product_type.as_deref(), Some("Bowls"));
    assert_eq!(batch.get(1).unwrap().product_type.as_deref(), Some("Tea"));
}

#[test]
fn test_parse_array_positions() {
    let reply = r#"[{"product_type": "Tea"}, {"uid": "PROD_5", "product_type": "Bowls"}]"#;
    let batch = parse_suggestions(reply).unwrap();
    assert_eq!(batch.get(0).unwrap().product_type.as_deref(), Some("Tea"));
    assert_eq!(batch.get(5).unwrap().product_type.as_deref(), Some("Bowls"));
    assert!(batch.get(1).is_none());
}

#[test]
fn test_parse_skips_malformed_entries() {
    let reply = r#"{
        "PROD_1": "just a string",
        "PROD_3": 42,
        "OTHER": {"product_type": "Ignored"},
        "PROD_2": {"taxonomy_keywords": null, "suggested_category": null}
    }"#;
    let batch = parse_suggestions(reply).unwrap();

    assert!(batch.get(1).is_none());
    assert!(batch.get(3).is_none());
    let nulls = batch.get(2).unwrap();
    assert!(nulls.taxonomy_keywords.is_empty());
    assert!(!nulls.is_usable());
    assert_eq!(batch.len(), 1);
}

#[test]
fn test_parse_salvages_mistyped_fields() {
    let reply = r#"{
        "PROD_0": {"taxonomy_keywords": "lamps", "suggested_category": "Home & Garden > Lamps"},
        "PROD_1": {
            "product_type": 3,
            "taxonomy_keywords": ["rugs", 7, null, "mats"],
            "suggested_category": {"path": "Home & Garden > Rugs"},
            "refined_title": "Jute Rug",
            "description": false
        }
    }"#;
    let batch = parse_suggestions(reply).unwrap();

    let lamps = batch.get(0).unwrap();
    assert_eq!(lamps.category(), Some("Home & Garden > Lamps"));
    assert_eq!(lamps.taxonomy_keywords, vec!["lamps"]);

    let rugs = batch.get(1).unwrap();
    assert_eq!(rugs.product_type, None);
    assert_eq!(rugs.translated_query(), "rugs mats");
    assert_eq!(rugs.category(), None);
    assert_eq!(rugs.refined_title(), Some("Jute Rug"));
    assert_eq!(rugs.description(), None);
    assert!(rugs.is_usable());
}

#[test]
fn test_parse_failures() {
    assert!(matches!(
        parse_suggestions(""),
        Err(SuggestError::MalformedResponse { .. })
    ));
    assert!(matches!(
        parse_suggestions("I could not categorize these products."),
        Err(SuggestError::MalformedResponse { .. })
    ));
    assert!(matches!(
        parse_suggestions("42"),
        Err(SuggestError::MalformedResponse { .. })
    ));
    assert!(matches!(
        parse_suggestions("} nonsense {"),
        Err(SuggestError::MalformedResponse { .. })
    ));
}

#[test]
fn test_extract_json_prefers_whole_reply() {
    let value = extract_json(r#"{"a": "```json {\"b\": 1} ```"}"#).unwrap();
    assert!(value.get("a").is_some());
}

// Types

#[test]
fn test_product_uid() {
    assert_eq!(product_uid(0), "PROD_0");
    assert_eq!(product_uid(14), "PROD_14");
    assert_eq!(parse_product_uid("PROD_14"), Some(14));
    assert_eq!(parse_product_uid(" PROD_3 "), Some(3));
    assert_eq!(parse_product_uid("PROD_"), None);
    assert_eq!(parse_product_uid("PROD_x"), None);
    assert_eq!(parse_product_uid("prod_1"), None);
}

#[test]
fn test_suggestion_helpers() {
    let suggestion = Suggestion {
        taxonomy_keywords: vec![" dresses ".to_string(), "".to_string(), "evening wear".to_string()],
        suggested_category: Some("  ".to_string()),
        ..Suggestion::default()
    };
    assert_eq!(suggestion.translated_query(), "dresses evening wear");
    assert_eq!(suggestion.category(), None);
    assert!(suggestion.has_translated_terms());
    assert!(suggestion.is_usable());

    assert!(!Suggestion::default().is_usable());
    assert!(dress_suggestion().is_usable());
}

#[test]
fn test_batch_iteration_in_position_order() {
    let batch: SuggestionBatch = [(3, Suggestion::default()), (0, dress_suggestion())]
        .into_iter()
        .collect();
    let positions: Vec<usize> = batch.iter().map(|(pos, _)| pos).collect();
    assert_eq!(positions, vec![0, 3]);
}

#[test]
fn test_render_batch_payload() {
    let products = vec![
        Product::new("Organic Cotton Baby Onesie").with_description("Soft"),
        Product::default(),
    ];
    let payload: serde_json::Value =
        serde_json::from_str(&prompt::render_batch(&products).unwrap()).unwrap();

    assert_eq!(payload[0]["uid"], "PROD_0");
    assert_eq!(payload[0]["title"], "Organic Cotton Baby Onesie");
    assert_eq!(payload[0]["description"], "Soft");
    assert_eq!(payload[1]["uid"], "PROD_1");
    assert_eq!(payload[1]["title"], "");
}

#[test]
fn test_system_prompt_names_fields() {
    for field in [
        "product_type",
        "taxonomy_keywords",
        "suggested_category",
        "refined_title",
        "description",
    ] {
        assert!(prompt::SYSTEM_PROMPT.contains(field), "missing {}", field);
    }
}

#[test]
fn test_genai_provider_defaults() {
    let provider = GenAiSuggestionProvider::default();
    assert_eq!(provider.model(), crate::constants::DEFAULT_MODEL);
    assert_eq!(provider.name(), "genai");
    assert!(format!("{:?}", provider).contains("gemini"));
}

#[test]
fn test_genai_provider_requests_json_replies() {
    let provider = GenAiSuggestionProvider::new("gpt-4o-mini");
    assert!(matches!(
        provider.chat_options().response_format,
        Some(genai::chat::ChatResponseFormat::JsonMode)
    ));
}

// Providers

#[tokio::test]
async fn test_static_provider_is_empty() {
    let batch = StaticSuggestionProvider
        .suggest(&[Product::new("Anything")])
        .await
        .unwrap();
    assert!(batch.is_empty());
}

#[tokio::test]
async fn test_mock_provider_canned_and_failing() {
    let mock = MockSuggestionProvider::new().with_suggestion("Gown", dress_suggestion());
    let products = vec![Product::new("Knife"), Product::new("Gown")];

    let batch = mock.suggest(&products).await.unwrap();
    assert!(batch.get(0).is_none());
    assert_eq!(batch.get(1), Some(&dress_suggestion()));

    mock.set_failing(true);
    assert!(matches!(
        mock.suggest(&products).await,
        Err(SuggestError::Unavailable { .. })
    ));
    assert_eq!(mock.call_count(), 2);
    assert_eq!(mock.batch_sizes(), vec![2, 2]);
    assert_eq!(mock.products_seen(), 4);
}

#[tokio::test]
async fn test_arc_provider_delegates() {
    let provider: Arc<dyn SuggestionProvider> =
        Arc::new(MockSuggestionProvider::new().with_suggestion("Gown", dress_suggestion()));
    let batch = provider.suggest(&[Product::new("Gown")]).await.unwrap();
    assert_eq!(batch.len(), 1);
    assert_eq!(provider.name(), "mock");
}

// Cache

#[tokio::test]
async fn test_cache_forwards_only_misses_with_rekeyed_positions() {
    let mock = MockSuggestionProvider::new()
        .with_suggestion("Gown", dress_suggestion())
        .with_suggestion("Knife", Suggestion {
            taxonomy_keywords: vec!["knives".to_string()],
            ..Suggestion::default()
        });
    let cached = CachedSuggestionProvider::new(mock);

    let first = cached.suggest(&[Product::new("Gown")]).await.unwrap();
    assert_eq!(first.get(0), Some(&dress_suggestion()));

    let products = vec![Product::new("Knife"), Product::new("Gown"), Product::new("Tea")];
    let second = cached.suggest(&products).await.unwrap();

    assert_eq!(second.get(0).unwrap().translated_query(), "knives");
    assert_eq!(second.get(1), Some(&dress_suggestion()));
    assert!(second.get(2).is_none());
    assert_eq!(cached.inner().batch_sizes(), vec![1, 2]);
    assert!(cached.cached(&Product::new("Knife")).is_some());
    assert!(cached.cached(&Product::new("Tea")).is_none());
}

#[tokio::test]
async fn test_cache_full_hit_skips_provider() {
    let cached = CachedSuggestionProvider::new(
        MockSuggestionProvider::new().with_suggestion("Gown", dress_suggestion()),
    );
    let products = vec![Product::new("Gown")];

    cached.suggest(&products).await.unwrap();
    cached.suggest(&products).await.unwrap();
    assert_eq!(cached.inner().call_count(), 1);
    assert_eq!(cached.entry_count(), 1);

    cached.clear();
    cached.suggest(&products).await.unwrap();
    assert_eq!(cached.inner().call_count(), 2);
}

#[tokio::test]
async fn test_cache_keys_include_description() {
    let cached = CachedSuggestionProvider::new(
        MockSuggestionProvider::new().with_suggestion("Gown", dress_suggestion()),
    );
    cached.suggest(&[Product::new("Gown")]).await.unwrap();

    let described = Product::new("Gown").with_description("Red");
    assert!(cached.cached(&described).is_none());
    cached.suggest(&[described]).await.unwrap();
    assert_eq!(cached.inner().call_count(), 2);
}

#[tokio::test]
async fn test_cache_does_not_store_failures() {
    let cached = CachedSuggestionProvider::new(MockSuggestionProvider::failing());
    let products = vec![Product::new("Gown")];

    assert!(cached.suggest(&products).await.is_err());
    assert!(cached.suggest(&products).await.is_err());
    assert_eq!(cached.inner().call_count(), 2);
    assert_eq!(cached.entry_count(), 0);
}

#[tokio::test]
async fn test_cache_serves_hits_when_provider_fails() {
    let cached = CachedSuggestionProvider::new(
        MockSuggestionProvider::new().with_suggestion("Gown", dress_suggestion()),
    );
    cached.suggest(&[Product::new("Gown")]).await.unwrap();

    cached.inner().set_failing(true);
    let batch = cached
        .suggest(&[Product::new("Knife"), Product::new("Gown")])
        .await
        .unwrap();
    assert!(batch.get(0).is_none());
    assert_eq!(batch.get(1), Some(&dress_suggestion()));
}

#[tokio::test]
async fn test_cache_skips_unusable_suggestions() {
    let cached = CachedSuggestionProvider::new(
        MockSuggestionProvider::new().with_suggestion("Gown", Suggestion::default()),
    );
    let products = vec![Product::new("Gown")];

    let batch = cached.suggest(&products).await.unwrap();
    assert_eq!(batch.len(), 1);
    assert!(cached.cached(&products[0]).is_none());
}
