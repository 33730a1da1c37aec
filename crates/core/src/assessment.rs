//! Risk assessment from collected answers.
//!
//! An assessment is recomputed every time the results step is shown and is never
//! cached. The lifestyle model always runs; the combined model runs only when at least
//! one lab reading was provided, with any missing reading imputed to its
//! population-normal value for that call alone.

use crate::answers::{CollectedAnswers, FeatureMap};
use crate::lab::{self, LabCompleteness, LabKind};
use crate::model::Models;
use crate::recommendation::{self, Recommendation};
use crate::risk::{self, RiskTier};
use crate::scoring;
use dialens_types::Probability;
use serde::Serialize;

/// One model's probability and the tier it maps to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModelPrediction {
    pub probability: Probability,
    pub tier: RiskTier,
}

impl ModelPrediction {
    pub fn from_probability(probability: Probability) -> Self {
        Self {
            probability,
            tier: risk::classify(probability),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub lifestyle: ModelPrediction,
    /// Present only when lab data was available.
    pub combined: Option<ModelPrediction>,
    pub lab_completeness: LabCompleteness,
    /// Combined tier when lab data was available, otherwise the lifestyle tier.
    pub effective_tier: RiskTier,
    pub recommendation: &'static Recommendation,
}

impl Assessment {
    /// The prediction the effective tier was taken from.
    pub fn effective_prediction(&self) -> &ModelPrediction {
        self.combined.as_ref().unwrap_or(&self.lifestyle)
    }
}

/// Features for the combined model, with sentinel lab readings imputed.
pub fn combined_features(answers: &CollectedAnswers) -> FeatureMap {
    let mut features = answers.features();
    for kind in [LabKind::HbA1c, LabKind::FastingBloodSugar] {
        if let Some(value) = features.get_mut(kind.feature_name()) {
            *value = lab::impute(*value, kind);
        }
    }
    features
}

/// Score both models and select the effective tier and recommendation.
pub fn assess(answers: &CollectedAnswers, models: &Models) -> Assessment {
    let lifestyle_probability = scoring::score(
        &answers.features(),
        Some(models.lifestyle()),
        models.lifestyle_features(),
    );
    let lifestyle = ModelPrediction::from_probability(lifestyle_probability);

    let lab_completeness = answers.lab_completeness();
    let combined = lab_completeness.is_available().then(|| {
        let probability = scoring::score(
            &combined_features(answers),
            Some(models.combined()),
            models.combined_features(),
        );
        ModelPrediction::from_probability(probability)
    });

    let effective_tier = combined.map_or(lifestyle.tier, |c| c.tier);
    tracing::debug!(
        "assessment: lifestyle={} combined={:?} effective={}",
        lifestyle.probability,
        combined.map(|c| c.probability.value()),
        effective_tier
    );

    Assessment {
        lifestyle,
        combined,
        lab_completeness,
        effective_tier,
        recommendation: recommendation::advise(effective_tier),
    }
}
