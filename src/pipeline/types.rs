use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// How a [`Decision`] was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DecisionMethod {
    /// The suggested category exists in the taxonomy verbatim.
    VerifiedExternal,
    /// Top candidate for the translated terms met the auto-accept score.
    TranslatedMatch,
    /// Top candidate for the translated terms, below the auto-accept score.
    TranslatedFallback,
    /// Top candidate for the raw title met the auto-accept score.
    OriginalMatch,
    /// Top candidate for the raw title, below the auto-accept score.
    OriginalFallback,
    /// A suggestion was available but nothing ranked.
    NoCandidates,
    /// No usable suggestion; top candidate for the raw title.
    ExternalFailedFallback,
    /// No usable suggestion and nothing ranked.
    CompleteFailure,
}

impl DecisionMethod {
    #[inline]
    pub fn as_tag(&self) -> &'static str {
        match self {
            DecisionMethod::VerifiedExternal => "VERIFIED_EXTERNAL",
            DecisionMethod::TranslatedMatch => "TRANSLATED_MATCH",
            DecisionMethod::TranslatedFallback => "TRANSLATED_FALLBACK",
            DecisionMethod::OriginalMatch => "ORIGINAL_MATCH",
            DecisionMethod::OriginalFallback => "ORIGINAL_FALLBACK",
            DecisionMethod::NoCandidates => "NO_CANDIDATES",
            DecisionMethod::ExternalFailedFallback => "EXTERNAL_FAILED_FALLBACK",
            DecisionMethod::CompleteFailure => "COMPLETE_FAILURE",
        }
    }

    /// Returns `true` for the two terminal outcomes that assign no category.
    #[inline]
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            DecisionMethod::NoCandidates | DecisionMethod::CompleteFailure
        )
    }

    #[inline]
    pub fn is_translated(&self) -> bool {
        matches!(
            self,
            DecisionMethod::TranslatedMatch | DecisionMethod::TranslatedFallback
        )
    }

    #[inline]
    pub fn is_original(&self) -> bool {
        matches!(
            self,
            DecisionMethod::OriginalMatch | DecisionMethod::OriginalFallback
        )
    }

    /// Returns `true` for ranked decisions below the auto-accept score.
    #[inline]
    pub fn is_low_confidence(&self) -> bool {
        matches!(
            self,
            DecisionMethod::TranslatedFallback
                | DecisionMethod::OriginalFallback
                | DecisionMethod::ExternalFailedFallback
        )
    }
}

impl std::fmt::Display for DecisionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_tag())
    }
}

/// Final categorization for one product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decision {
    /// The product title as submitted (empty if it had none).
    pub input_title: String,
    pub chosen_category: Option<String>,
    pub chosen_id: Option<String>,
    pub method: DecisionMethod,
    /// Rounded score of the chosen candidate; `None` for verified and failed decisions.
    pub score: Option<f64>,
}

impl Decision {
    /// A decision that assigns no category.
    pub fn uncategorized(input_title: impl Into<String>, method: DecisionMethod) -> Self {
        Self {
            input_title: input_title.into(),
            chosen_category: None,
            chosen_id: None,
            method,
            score: None,
        }
    }

    #[inline]
    pub fn is_categorized(&self) -> bool {
        self.chosen_category.is_some()
    }
}

/// A product submitted for categorization.
///
/// Only `title` and `description` feed the decision. The remaining fields are
/// passed through to the output untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    pub title: Option<String>,
    pub description: Option<String>,
    pub sku: Option<Value>,
    pub price: Option<Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub variants: Vec<Value>,
}

impl Product {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The title, or `""` when absent.
    #[inline]
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    /// The description, or `""` when absent.
    #[inline]
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }
}

/// Deserializes `null` as `T::default()`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
