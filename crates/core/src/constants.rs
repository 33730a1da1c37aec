//! Constants used throughout the DiaLens core crate.
//!
//! Thresholds, clinical ranges, imputation defaults and feature names live here so the
//! scoring, normalisation and workflow modules agree on a single set of values.

/// Probability at or above which a prediction is classed as high risk.
///
/// Tuned offline as the operating point of the combined model; applied to both models.
pub const HIGH_RISK_THRESHOLD: f64 = 0.60;

/// Probability at or above which a prediction is classed as medium risk.
pub const MEDIUM_RISK_THRESHOLD: f64 = 0.50;

/// Exclusive lower bound of a plausible HbA1c reading (percent).
pub const HBA1C_MIN_EXCLUSIVE: f64 = 4.0;

/// Inclusive upper bound of a plausible HbA1c reading (percent).
pub const HBA1C_MAX: f64 = 10.0;

/// Inclusive lower bound of a plausible fasting blood sugar reading (mg/dL).
pub const FASTING_BLOOD_SUGAR_MIN: f64 = 70.0;

/// Inclusive upper bound of a plausible fasting blood sugar reading (mg/dL).
pub const FASTING_BLOOD_SUGAR_MAX: f64 = 200.0;

/// Population-normal HbA1c passed to the combined model when none was provided.
pub const DEFAULT_HBA1C: f64 = 5.5;

/// Population-normal fasting blood sugar passed to the combined model when none was provided.
pub const DEFAULT_FASTING_BLOOD_SUGAR: f64 = 95.0;

/// Inclusive age range accepted by the assessment.
pub const AGE_RANGE: std::ops::RangeInclusive<u8> = 20..=90;

/// Inclusive range of the self-rated 0-10 scores.
pub const SCORE_RANGE: std::ops::RangeInclusive<u8> = 0..=10;

pub const FEATURE_AGE: &str = "Age";
pub const FEATURE_DIET_QUALITY: &str = "DietQuality";
pub const FEATURE_HEALTH_LITERACY: &str = "HealthLiteracy";
pub const FEATURE_SMOKING: &str = "Smoking";
pub const FEATURE_HYPERTENSION: &str = "Hypertension";
pub const FEATURE_FAMILY_HISTORY_DIABETES: &str = "FamilyHistoryDiabetes";
pub const FEATURE_FREQUENT_URINATION: &str = "FrequentUrination";
pub const FEATURE_EXCESSIVE_THIRST: &str = "ExcessiveThirst";
pub const FEATURE_UNEXPLAINED_WEIGHT_LOSS: &str = "UnexplainedWeightLoss";
pub const FEATURE_HBA1C: &str = "HbA1c";
pub const FEATURE_FASTING_BLOOD_SUGAR: &str = "FastingBloodSugar";

/// Answers that must be present before results can be shown, in display order.
pub const REQUIRED_FIELDS: [&str; 9] = [
    FEATURE_AGE,
    FEATURE_DIET_QUALITY,
    FEATURE_HEALTH_LITERACY,
    FEATURE_SMOKING,
    FEATURE_HYPERTENSION,
    FEATURE_FAMILY_HISTORY_DIABETES,
    FEATURE_FREQUENT_URINATION,
    FEATURE_EXCESSIVE_THIRST,
    FEATURE_UNEXPLAINED_WEIGHT_LOSS,
];

/// Every feature name the answers record can supply.
pub const KNOWN_FEATURES: [&str; 11] = [
    FEATURE_AGE,
    FEATURE_DIET_QUALITY,
    FEATURE_HEALTH_LITERACY,
    FEATURE_SMOKING,
    FEATURE_HYPERTENSION,
    FEATURE_FAMILY_HISTORY_DIABETES,
    FEATURE_FREQUENT_URINATION,
    FEATURE_EXCESSIVE_THIRST,
    FEATURE_UNEXPLAINED_WEIGHT_LOSS,
    FEATURE_HBA1C,
    FEATURE_FASTING_BLOOD_SUGAR,
];

/// Default location of the lifestyle-only model artifact.
pub const DEFAULT_LIFESTYLE_MODEL_PATH: &str = "models/lifestyle_model.json";

/// Default location of the combined (lifestyle + lab) model artifact.
pub const DEFAULT_COMBINED_MODEL_PATH: &str = "models/combined_model.json";

/// Default location of the world diabetes dataset.
pub const DEFAULT_MAP_DATA_PATH: &str = "data/diabetes_world_data.csv";

/// Default idle time after which an abandoned session is discarded (30 minutes).
pub const DEFAULT_SESSION_TTL_SECS: u64 = 30 * 60;
