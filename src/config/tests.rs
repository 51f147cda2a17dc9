use super::*;
use crate::constants::{ScoringWeights, WeightsError};
use serial_test::serial;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, value) in vars {
        unsafe { env::set_var(key, value) };
    }

    let result = f();

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, _) in vars {
        unsafe { env::remove_var(key) };
    }

    result
}

fn clear_taxon_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    unsafe {
        env::remove_var("TAXON_TAXONOMY_PATH");
        env::remove_var("TAXON_BATCH_SIZE");
        env::remove_var("TAXON_MAX_CANDIDATES");
        env::remove_var("TAXON_AUTO_ACCEPT_SCORE");
        env::remove_var("TAXON_EXACT_POINTS");
        env::remove_var("TAXON_SUBSTRING_POINTS");
        env::remove_var("TAXON_PHRASE_PAIR_POINTS");
        env::remove_var("TAXON_PHRASE_TRIPLE_POINTS");
        env::remove_var("TAXON_MODEL");
        env::remove_var("TAXON_PROVIDER_TIMEOUT_SECS");
        env::remove_var("TAXON_SUGGESTION_CACHE_CAPACITY");
        env::remove_var("TAXON_MOCK_PROVIDER");
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.taxonomy_path, PathBuf::from("./data/categories.json"));
    assert_eq!(config.batch_size, 15);
    assert_eq!(config.max_candidates, 15);
    assert_eq!(config.auto_accept_score, 20.0);
    assert_eq!(config.weights, ScoringWeights::default());
    assert_eq!(config.model, "gemini-2.5-flash");
    assert_eq!(config.provider_timeout, Duration::from_secs(30));
    assert_eq!(config.suggestion_cache_capacity, 10_000);
    assert!(!config.mock_provider);
}

#[test]
#[serial]
fn test_from_env_with_defaults() {
    clear_taxon_env();

    let config = Config::from_env().expect("should parse with defaults");

    assert_eq!(config.batch_size, 15);
    assert_eq!(config.model, "gemini-2.5-flash");
    assert!(!config.mock_provider);
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_taxon_env();

    let config = with_env_vars(
        &[
            ("TAXON_TAXONOMY_PATH", "/srv/taxonomy.json"),
            ("TAXON_BATCH_SIZE", "5"),
            ("TAXON_MAX_CANDIDATES", " 8 "),
            ("TAXON_AUTO_ACCEPT_SCORE", "12.5"),
            ("TAXON_MODEL", "gpt-4o-mini"),
            ("TAXON_PROVIDER_TIMEOUT_SECS", "4"),
            ("TAXON_SUGGESTION_CACHE_CAPACITY", "0"),
            ("TAXON_MOCK_PROVIDER", "1"),
        ],
        Config::from_env,
    )
    .expect("should parse overrides");

    assert_eq!(config.taxonomy_path, PathBuf::from("/srv/taxonomy.json"));
    assert_eq!(config.batch_size, 5);
    assert_eq!(config.max_candidates, 8);
    assert_eq!(config.auto_accept_score, 12.5);
    assert_eq!(config.model, "gpt-4o-mini");
    assert_eq!(config.provider_timeout, Duration::from_secs(4));
    assert_eq!(config.suggestion_cache_capacity, 0);
    assert!(config.mock_provider);
}

#[test]
#[serial]
fn test_from_env_weight_overrides() {
    clear_taxon_env();

    let config = with_env_vars(
        &[("TAXON_EXACT_POINTS", "20"), ("TAXON_PHRASE_TRIPLE_POINTS", "30.5")],
        Config::from_env,
    )
    .unwrap();

    assert_eq!(config.weights.exact, 20.0);
    assert_eq!(config.weights.substring, 5.0);
    assert_eq!(config.weights.phrase_pair, 12.0);
    assert_eq!(config.weights.phrase_triple, 30.5);
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn test_empty_mock_flag_is_off() {
    clear_taxon_env();

    let config = with_env_vars(&[("TAXON_MOCK_PROVIDER", "")], Config::from_env).unwrap();
    assert!(!config.mock_provider);
}

#[test]
#[serial]
fn test_blank_taxonomy_path_uses_default() {
    clear_taxon_env();

    let config = with_env_vars(&[("TAXON_TAXONOMY_PATH", "   ")], Config::from_env).unwrap();
    assert_eq!(config.taxonomy_path, PathBuf::from(DEFAULT_TAXONOMY_PATH));
}

#[test]
#[serial]
fn test_malformed_numbers_are_errors() {
    clear_taxon_env();

    let cases = [
        ("TAXON_BATCH_SIZE", "fifteen"),
        ("TAXON_BATCH_SIZE", "-1"),
        ("TAXON_MAX_CANDIDATES", "1.5"),
        ("TAXON_AUTO_ACCEPT_SCORE", "high"),
        ("TAXON_EXACT_POINTS", "ten"),
        ("TAXON_PROVIDER_TIMEOUT_SECS", "30s"),
        ("TAXON_SUGGESTION_CACHE_CAPACITY", "lots"),
    ];

    for (name, value) in cases {
        let result = with_env_vars(&[(name, value)], Config::from_env);
        match result {
            Err(ConfigError::ParseError { name: got, value: v, .. }) => {
                assert_eq!(got, name);
                assert_eq!(v, value);
            }
            other => panic!("expected ParseError for {}={}, got {:?}", name, value, other),
        }
    }
}

#[test]
fn test_validate_accepts_defaults() {
    assert!(Config::default().validate().is_ok());
}

#[test]
fn test_validate_rejects_zero_sizes() {
    let config = Config {
        batch_size: 0,
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidValue { name: "TAXON_BATCH_SIZE", .. })
    ));

    let config = Config {
        max_candidates: 0,
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidValue { name: "TAXON_MAX_CANDIDATES", .. })
    ));
}

#[test]
fn test_validate_rejects_bad_threshold() {
    for score in [-1.0, f64::NAN, f64::INFINITY] {
        let config = Config {
            auto_accept_score: score,
            ..Default::default()
        };
        assert!(
            matches!(
                config.validate(),
                Err(ConfigError::InvalidValue { name: "TAXON_AUTO_ACCEPT_SCORE", .. })
            ),
            "score {} should be rejected",
            score
        );
    }

    let zero = Config {
        auto_accept_score: 0.0,
        ..Default::default()
    };
    assert!(zero.validate().is_ok());
}

#[test]
fn test_validate_rejects_zero_timeout_and_blank_model() {
    let config = Config {
        provider_timeout: Duration::ZERO,
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidValue { name: "TAXON_PROVIDER_TIMEOUT_SECS", .. })
    ));

    let config = Config {
        model: "  ".to_string(),
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidValue { name: "TAXON_MODEL", .. })
    ));
}

#[test]
fn test_validate_rejects_unusable_weights() {
    let zero = Config {
        weights: ScoringWeights {
            substring: 0.0,
            ..Default::default()
        },
        ..Default::default()
    };
    assert!(matches!(
        zero.validate(),
        Err(ConfigError::Weights(WeightsError::NonPositive { name: "substring", .. }))
    ));

    let inverted = Config {
        weights: ScoringWeights {
            exact: 4.0,
            ..Default::default()
        },
        ..Default::default()
    };
    assert!(matches!(
        inverted.validate(),
        Err(ConfigError::Weights(WeightsError::ExactNotAboveSubstring { .. }))
    ));
}

#[test]
fn test_pipeline_rejects_unusable_weights() {
    let config = Config {
        weights: ScoringWeights {
            phrase_pair: f64::NAN,
            ..Default::default()
        },
        ..Default::default()
    };
    assert!(matches!(config.pipeline(), Err(ConfigError::Weights(_))));
}

#[test]
fn test_validate_taxonomy_path() {
    let dir = tempfile::tempdir().unwrap();

    let config = Config {
        taxonomy_path: dir.path().to_path_buf(),
        ..Default::default()
    };
    assert!(matches!(config.validate(), Err(ConfigError::NotAFile { .. })));

    let missing = Config {
        taxonomy_path: dir.path().join("missing.json"),
        ..Default::default()
    };
    assert!(missing.validate().is_ok());

    let file = dir.path().join("categories.json");
    std::fs::write(&file, "[]").unwrap();
    let present = Config {
        taxonomy_path: file,
        ..Default::default()
    };
    assert!(present.validate().is_ok());
}

#[test]
fn test_pipeline_uses_settings() {
    let config = Config {
        max_candidates: 3,
        auto_accept_score: 7.5,
        weights: ScoringWeights {
            exact: 11.0,
            ..Default::default()
        },
        ..Default::default()
    };
    let pipeline = config.pipeline().unwrap();
    assert_eq!(pipeline.ranker().weights().exact, 11.0);
    assert_eq!(pipeline.ranker().max_candidates(), 3);
    assert_eq!(pipeline.auto_accept_score(), 7.5);
}

#[test]
fn test_error_messages() {
    let err = ConfigError::ParseError {
        name: "TAXON_BATCH_SIZE",
        value: "x".to_string(),
        reason: "invalid digit found in string".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "failed to parse TAXON_BATCH_SIZE='x': invalid digit found in string"
    );

    let err = ConfigError::NotAFile {
        path: PathBuf::from("/tmp"),
    };
    assert_eq!(err.to_string(), "path is not a file: /tmp");
}
