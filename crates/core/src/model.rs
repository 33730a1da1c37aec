//! Model artifacts and the process-wide model handle.
//!
//! Artifacts are logistic-regression classifiers serialized as JSON (`.json`) or YAML
//! (`.yaml`, `.yml`):
//!
//! ```text
//! feature_names: [Age, DietQuality, ...]
//! coefficients:  [0.031, -0.12, ...]
//! intercept:     -2.4
//! description:   optional free text
//! ```
//!
//! Both models are loaded once at startup into [`Models`], which is immutable and shared
//! by reference across every session. A model that cannot be loaded is fatal.

use crate::config::CoreConfig;
use crate::constants::KNOWN_FEATURES;
use crate::error::{CoreError, CoreResult, ScoringError, ScoringResult};
use crate::scoring::Classifier;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

/// A binary logistic-regression classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogisticModel {
    feature_names: Vec<String>,
    coefficients: Vec<f64>,
    intercept: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl LogisticModel {
    /// Creates a validated model.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidModel` if:
    /// - the feature list is empty or contains duplicates,
    /// - the coefficient count differs from the feature count,
    /// - any coefficient or the intercept is not finite.
    pub fn new(
        feature_names: Vec<String>,
        coefficients: Vec<f64>,
        intercept: f64,
    ) -> CoreResult<Self> {
        let model = Self {
            feature_names,
            coefficients,
            intercept,
            description: None,
        };
        model.validate()?;
        Ok(model)
    }

    fn validate(&self) -> CoreResult<()> {
        if self.feature_names.is_empty() {
            return Err(CoreError::InvalidModel(
                "feature_names cannot be empty".into(),
            ));
        }

        let mut seen = HashSet::new();
        if let Some(dup) = self.feature_names.iter().find(|f| !seen.insert(f.as_str())) {
            return Err(CoreError::InvalidModel(format!(
                "duplicate feature name: {dup}"
            )));
        }

        if self.coefficients.len() != self.feature_names.len() {
            return Err(CoreError::InvalidModel(format!(
                "expected {} coefficients, got {}",
                self.feature_names.len(),
                self.coefficients.len()
            )));
        }

        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(CoreError::InvalidModel(
                "coefficients and intercept must be finite".into(),
            ));
        }

        Ok(())
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl Classifier for LogisticModel {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict_proba(&self, row: &[f64]) -> ScoringResult<Vec<f64>> {
        if row.len() != self.coefficients.len() {
            return Err(ScoringError::Model(format!(
                "expected {} features, got {}",
                self.coefficients.len(),
                row.len()
            )));
        }

        let z = self.intercept
            + self
                .coefficients
                .iter()
                .zip(row)
                .map(|(c, x)| c * x)
                .sum::<f64>();
        if !z.is_finite() {
            return Err(ScoringError::Model("decision function is not finite".into()));
        }

        let positive = 1.0 / (1.0 + (-z).exp());
        Ok(vec![1.0 - positive, positive])
    }
}

/// Load a model artifact, choosing the parser from the file extension.
///
/// # Errors
///
/// Returns a `CoreError` if the file cannot be read or parsed, has an unsupported
/// extension, or fails validation.
pub fn load_model(path: &Path) -> CoreResult<LogisticModel> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    if !matches!(extension.as_str(), "json" | "yaml" | "yml") {
        return Err(CoreError::UnsupportedModelFormat(path.display().to_string()));
    }

    let contents = std::fs::read_to_string(path).map_err(|source| CoreError::ModelRead {
        path: path.to_path_buf(),
        source,
    })?;

    let model: LogisticModel = if extension == "json" {
        serde_json::from_str(&contents).map_err(|source| CoreError::ModelJson {
            path: path.to_path_buf(),
            source,
        })?
    } else {
        serde_yaml::from_str(&contents).map_err(|source| CoreError::ModelYaml {
            path: path.to_path_buf(),
            source,
        })?
    };
    model.validate()?;

    for name in model.feature_names() {
        if !KNOWN_FEATURES.contains(&name.as_str()) {
            tracing::warn!(
                "model {} expects unknown feature {}; its predictions will fall back to neutral",
                path.display(),
                name
            );
        }
    }

    Ok(model)
}

/// The two loaded classifiers and the feature lists derived from them.
#[derive(Debug, Clone)]
pub struct Models {
    lifestyle: Arc<dyn Classifier>,
    combined: Arc<dyn Classifier>,
    lifestyle_features: Vec<String>,
    combined_features: Vec<String>,
}

impl Models {
    pub fn new(lifestyle: Arc<dyn Classifier>, combined: Arc<dyn Classifier>) -> Self {
        let lifestyle_features = lifestyle.feature_names().to_vec();
        let combined_features = combined.feature_names().to_vec();
        Self {
            lifestyle,
            combined,
            lifestyle_features,
            combined_features,
        }
    }

    /// Load both model artifacts named in `cfg`.
    ///
    /// # Errors
    ///
    /// Returns the first `CoreError` raised while loading either artifact.
    pub fn load(cfg: &CoreConfig) -> CoreResult<Self> {
        let lifestyle = load_model(cfg.lifestyle_model_path())?;
        let combined = load_model(cfg.combined_model_path())?;

        tracing::info!(
            "loaded lifestyle model ({} features) from {}",
            lifestyle.feature_names().len(),
            cfg.lifestyle_model_path().display()
        );
        tracing::info!(
            "loaded combined model ({} features) from {}",
            combined.feature_names().len(),
            cfg.combined_model_path().display()
        );

        Ok(Self::new(Arc::new(lifestyle), Arc::new(combined)))
    }

    pub fn lifestyle(&self) -> &dyn Classifier {
        self.lifestyle.as_ref()
    }

    pub fn combined(&self) -> &dyn Classifier {
        self.combined.as_ref()
    }

    pub fn lifestyle_features(&self) -> &[String] {
        &self.lifestyle_features
    }

    pub fn combined_features(&self) -> &[String] {
        &self.combined_features
    }
}
