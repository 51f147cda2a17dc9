//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `TAXON_*` environment variables.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::constants::{
    DEFAULT_AUTO_ACCEPT_SCORE, DEFAULT_BATCH_SIZE, DEFAULT_MAX_CANDIDATES, DEFAULT_MODEL,
    ScoringWeights,
};
use crate::pipeline::DecisionPipeline;
use crate::ranking::Ranker;
use crate::rules::RuleSet;

/// Default taxonomy dataset location used when `TAXON_TAXONOMY_PATH` is not set.
pub const DEFAULT_TAXONOMY_PATH: &str = "./data/categories.json";

/// Categorizer configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `TAXON_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Taxonomy dataset (JSON). Default: `./data/categories.json`.
    pub taxonomy_path: PathBuf,

    /// Products per suggestion request. Default: `15`.
    pub batch_size: usize,

    /// Candidates kept per ranked query. Default: `15`.
    pub max_candidates: usize,

    /// Score at which a ranked match is tagged `*_MATCH`. Default: `20.0`.
    pub auto_accept_score: f64,

    /// Lexical scoring points. Default: exact 10, substring 5, pair 12, triple 15.
    pub weights: ScoringWeights,

    /// Chat model used for suggestions. Default: `gemini-2.5-flash`.
    pub model: String,

    /// Upper bound on one suggestion request. Default: 30 seconds.
    pub provider_timeout: Duration,

    /// Max cached suggestions; `0` disables the cache. Default: `10_000`.
    pub suggestion_cache_capacity: u64,

    /// Skip the model and categorize from titles alone. Default: `false`.
    pub mock_provider: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            taxonomy_path: PathBuf::from(DEFAULT_TAXONOMY_PATH),
            batch_size: DEFAULT_BATCH_SIZE,
            max_candidates: DEFAULT_MAX_CANDIDATES,
            auto_accept_score: DEFAULT_AUTO_ACCEPT_SCORE,
            weights: ScoringWeights::default(),
            model: DEFAULT_MODEL.to_string(),
            provider_timeout: Duration::from_secs(30),
            suggestion_cache_capacity: 10_000,
            mock_provider: false,
        }
    }
}

impl Config {
    const ENV_TAXONOMY_PATH: &'static str = "TAXON_TAXONOMY_PATH";
    const ENV_BATCH_SIZE: &'static str = "TAXON_BATCH_SIZE";
    const ENV_MAX_CANDIDATES: &'static str = "TAXON_MAX_CANDIDATES";
    const ENV_AUTO_ACCEPT_SCORE: &'static str = "TAXON_AUTO_ACCEPT_SCORE";
    const ENV_EXACT_POINTS: &'static str = "TAXON_EXACT_POINTS";
    const ENV_SUBSTRING_POINTS: &'static str = "TAXON_SUBSTRING_POINTS";
    const ENV_PHRASE_PAIR_POINTS: &'static str = "TAXON_PHRASE_PAIR_POINTS";
    const ENV_PHRASE_TRIPLE_POINTS: &'static str = "TAXON_PHRASE_TRIPLE_POINTS";
    const ENV_MODEL: &'static str = "TAXON_MODEL";
    const ENV_PROVIDER_TIMEOUT_SECS: &'static str = "TAXON_PROVIDER_TIMEOUT_SECS";
    const ENV_SUGGESTION_CACHE_CAPACITY: &'static str = "TAXON_SUGGESTION_CACHE_CAPACITY";
    const ENV_MOCK_PROVIDER: &'static str = "TAXON_MOCK_PROVIDER";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let taxonomy_path = Self::parse_path_from_env(Self::ENV_TAXONOMY_PATH, defaults.taxonomy_path);
        let batch_size = Self::parse_number_from_env(Self::ENV_BATCH_SIZE, defaults.batch_size)?;
        let max_candidates =
            Self::parse_number_from_env(Self::ENV_MAX_CANDIDATES, defaults.max_candidates)?;
        let auto_accept_score =
            Self::parse_number_from_env(Self::ENV_AUTO_ACCEPT_SCORE, defaults.auto_accept_score)?;
        let weights = ScoringWeights {
            exact: Self::parse_number_from_env(Self::ENV_EXACT_POINTS, defaults.weights.exact)?,
            substring: Self::parse_number_from_env(
                Self::ENV_SUBSTRING_POINTS,
                defaults.weights.substring,
            )?,
            phrase_pair: Self::parse_number_from_env(
                Self::ENV_PHRASE_PAIR_POINTS,
                defaults.weights.phrase_pair,
            )?,
            phrase_triple: Self::parse_number_from_env(
                Self::ENV_PHRASE_TRIPLE_POINTS,
                defaults.weights.phrase_triple,
            )?,
        };
        let model = Self::parse_string_from_env(Self::ENV_MODEL, defaults.model);
        let timeout_secs = Self::parse_number_from_env(
            Self::ENV_PROVIDER_TIMEOUT_SECS,
            defaults.provider_timeout.as_secs(),
        )?;
        let suggestion_cache_capacity = Self::parse_number_from_env(
            Self::ENV_SUGGESTION_CACHE_CAPACITY,
            defaults.suggestion_cache_capacity,
        )?;
        let mock_provider = Self::parse_flag_from_env(Self::ENV_MOCK_PROVIDER);

        Ok(Self {
            taxonomy_path,
            batch_size,
            max_candidates,
            auto_accept_score,
            weights,
            model,
            provider_timeout: Duration::from_secs(timeout_secs),
            suggestion_cache_capacity,
            mock_provider,
        })
    }

    /// Validates basic invariants. A missing taxonomy file is not an error; the
    /// emergency taxonomy covers it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_BATCH_SIZE,
                reason: "must be at least 1".to_string(),
            });
        }

        if self.max_candidates == 0 {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_MAX_CANDIDATES,
                reason: "must be at least 1".to_string(),
            });
        }

        if !self.auto_accept_score.is_finite() || self.auto_accept_score < 0.0 {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_AUTO_ACCEPT_SCORE,
                reason: format!("must be finite and non-negative, got {}", self.auto_accept_score),
            });
        }

        self.weights.validate()?;

        if self.provider_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_PROVIDER_TIMEOUT_SECS,
                reason: "must be at least 1 second".to_string(),
            });
        }

        if self.model.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_MODEL,
                reason: "must not be empty".to_string(),
            });
        }

        if self.taxonomy_path.exists() && !self.taxonomy_path.is_file() {
            return Err(ConfigError::NotAFile {
                path: self.taxonomy_path.clone(),
            });
        }

        Ok(())
    }

    /// Builds the decision pipeline these settings describe.
    ///
    /// Fails if the scoring weights do not pass [`ScoringWeights::validate`].
    pub fn pipeline(&self) -> Result<DecisionPipeline, ConfigError> {
        let ranker = Ranker::try_new(self.weights, RuleSet::standard())?
            .with_max_candidates(self.max_candidates);
        Ok(DecisionPipeline::new(ranker, self.auto_accept_score))
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or(default)
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }

    fn parse_number_from_env<T>(var_name: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match env::var(var_name) {
            Ok(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::ParseError {
                name: var_name,
                value,
                reason: e.to_string(),
            }),
            Err(_) => Ok(default),
        }
    }

    fn parse_flag_from_env(var_name: &str) -> bool {
        env::var_os(var_name).is_some_and(|v| !v.is_empty())
    }
}
