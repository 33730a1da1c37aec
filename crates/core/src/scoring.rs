//! Scoring adapter around pre-trained binary classifiers.
//!
//! The adapter is the only consumer of [`Classifier`]. Its public contract always
//! yields a usable probability: any structural failure (no model, no probability
//! output, missing feature, model error, malformed output) becomes
//! [`Probability::NEUTRAL`]. [`try_score`] keeps the cause for logging and tests.

use crate::answers::FeatureMap;
use crate::error::{ScoringError, ScoringResult};
use dialens_types::Probability;

/// Index of the positive (diabetes risk) class in a probability row.
pub const POSITIVE_CLASS: usize = 1;

/// A trained binary classifier.
pub trait Classifier: Send + Sync + std::fmt::Debug {
    /// Ordered feature names the model expects, which is also the column order of a row.
    fn feature_names(&self) -> &[String];

    /// Whether the model can produce class probabilities.
    fn supports_probability(&self) -> bool {
        true
    }

    /// Per-class probabilities for one row of feature values.
    fn predict_proba(&self, row: &[f64]) -> ScoringResult<Vec<f64>>;
}

/// Score `features` with `model`, reporting why a probability could not be produced.
pub fn try_score(
    features: &FeatureMap,
    model: Option<&dyn Classifier>,
    ordered_feature_names: &[String],
) -> ScoringResult<Probability> {
    let model = model.ok_or(ScoringError::ModelMissing)?;
    if !model.supports_probability() {
        return Err(ScoringError::NoProbabilityOutput);
    }

    let row = ordered_feature_names
        .iter()
        .map(|name| {
            features
                .get(name)
                .copied()
                .ok_or_else(|| ScoringError::MissingFeature(name.clone()))
        })
        .collect::<ScoringResult<Vec<f64>>>()?;

    let classes = model.predict_proba(&row)?;
    let positive = classes.get(POSITIVE_CLASS).copied().ok_or_else(|| {
        ScoringError::MalformedOutput(format!(
            "expected at least 2 class probabilities, got {}",
            classes.len()
        ))
    })?;

    Probability::new(positive).map_err(|e| ScoringError::MalformedOutput(e.to_string()))
}

/// Score `features` with `model`, falling back to the neutral probability on failure.
pub fn score(
    features: &FeatureMap,
    model: Option<&dyn Classifier>,
    ordered_feature_names: &[String],
) -> Probability {
    match try_score(features, model, ordered_feature_names) {
        Ok(probability) => probability,
        Err(e) => {
            tracing::warn!("scoring fell back to neutral probability: {}", e);
            Probability::NEUTRAL
        }
    }
}
