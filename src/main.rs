//! Taxon command-line entrypoint.
//!
//! Reads products as JSON (a file argument, or stdin), categorizes them and writes
//! the categorized records to stdout as a JSON array. Logs go to stderr.

use std::sync::Arc;

use anyhow::Context;
use mimalloc::MiMalloc;
use tokio::io::AsyncReadExt;

use taxon::categorize::Categorizer;
use taxon::config::Config;
use taxon::pipeline::Product;
use taxon::suggest::{
    CachedSuggestionProvider, GenAiSuggestionProvider, StaticSuggestionProvider,
    SuggestionProvider,
};
use taxon::taxonomy::TaxonomyHandle;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    config.validate()?;

    tracing::info!(
        taxonomy_path = %config.taxonomy_path.display(),
        model = %config.model,
        batch_size = config.batch_size,
        mock_provider = config.mock_provider,
        "Taxon starting"
    );

    let input = read_input(std::env::args().nth(1)).await?;
    let products = parse_products(&input)?;

    let taxonomy = TaxonomyHandle::load(&config.taxonomy_path);
    let provider = build_provider(&config);
    let categorizer = Categorizer::from_config(&config, taxonomy, provider)?;

    let report = categorizer.categorize(&products).await;
    println!("{}", serde_json::to_string_pretty(&report.products)?);

    Ok(())
}

async fn read_input(path: Option<String>) -> anyhow::Result<String> {
    match path.as_deref() {
        Some("-") | None => {
            let mut input = String::new();
            tokio::io::stdin()
                .read_to_string(&mut input)
                .await
                .context("failed to read products from stdin")?;
            Ok(input)
        }
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read products from {}", path)),
    }
}

/// Accepts a JSON array of products or a single product object.
fn parse_products(input: &str) -> anyhow::Result<Vec<Product>> {
    let value: serde_json::Value =
        serde_json::from_str(input).context("products input is not valid JSON")?;
    let products = if value.is_array() {
        serde_json::from_value(value)?
    } else {
        vec![serde_json::from_value(value)?]
    };
    Ok(products)
}

fn build_provider(config: &Config) -> Arc<dyn SuggestionProvider> {
    let inner: Arc<dyn SuggestionProvider> = if config.mock_provider {
        tracing::warn!("TAXON_MOCK_PROVIDER set; categorizing from titles only");
        Arc::new(StaticSuggestionProvider)
    } else {
        Arc::new(GenAiSuggestionProvider::new(config.model.clone()))
    };

    if config.suggestion_cache_capacity == 0 {
        return inner;
    }
    Arc::new(CachedSuggestionProvider::with_capacity(
        inner,
        config.suggestion_cache_capacity,
    ))
}
