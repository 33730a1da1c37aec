//! Collected answers for a single assessment session.
//!
//! Answers accumulate across the data collection step. Required answers start absent;
//! lab readings start at the `0.0` "not provided" sentinel.

use crate::constants::{
    AGE_RANGE, FEATURE_AGE, FEATURE_DIET_QUALITY, FEATURE_EXCESSIVE_THIRST,
    FEATURE_FAMILY_HISTORY_DIABETES, FEATURE_FASTING_BLOOD_SUGAR, FEATURE_FREQUENT_URINATION,
    FEATURE_HBA1C, FEATURE_HEALTH_LITERACY, FEATURE_HYPERTENSION, FEATURE_SMOKING,
    FEATURE_UNEXPLAINED_WEIGHT_LOSS, SCORE_RANGE,
};
use crate::error::AnswerError;
use crate::lab::{self, LabCompleteness, LabKind, LabWarning};
use dialens_types::Binary;
use serde::Serialize;
use std::collections::BTreeMap;
use std::ops::RangeInclusive;

/// Named numeric model inputs.
pub type FeatureMap = BTreeMap<String, f64>;

/// The answers collected so far in a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CollectedAnswers {
    pub age: Option<u8>,
    pub diet_quality: Option<u8>,
    pub health_literacy: Option<u8>,
    pub smoking: Option<Binary>,
    pub hypertension: Option<Binary>,
    pub family_history_diabetes: Option<Binary>,
    pub frequent_urination: Option<Binary>,
    pub excessive_thirst: Option<Binary>,
    pub unexplained_weight_loss: Option<Binary>,
    /// Stored HbA1c in percent; `0.0` means not provided.
    pub hba1c: f64,
    /// Stored fasting blood sugar in mg/dL; `0.0` means not provided.
    pub fasting_blood_sugar: f64,
}

/// A partial update to the collected answers.
///
/// Absent fields leave the stored answer unchanged. Lab readings are raw text and go
/// through [`lab::normalize`].
#[derive(Debug, Clone, Default)]
pub struct AnswerUpdate {
    pub age: Option<i64>,
    pub diet_quality: Option<i64>,
    pub health_literacy: Option<i64>,
    pub smoking: Option<Binary>,
    pub hypertension: Option<Binary>,
    pub family_history_diabetes: Option<Binary>,
    pub frequent_urination: Option<Binary>,
    pub excessive_thirst: Option<Binary>,
    pub unexplained_weight_loss: Option<Binary>,
    pub hba1c: Option<String>,
    pub fasting_blood_sugar: Option<String>,
}

fn checked(
    field: &'static str,
    value: Option<i64>,
    range: RangeInclusive<u8>,
) -> Result<Option<u8>, AnswerError> {
    let Some(value) = value else {
        return Ok(None);
    };
    u8::try_from(value)
        .ok()
        .filter(|v| range.contains(v))
        .map(Some)
        .ok_or(AnswerError::OutOfRange {
            field,
            min: *range.start(),
            max: *range.end(),
            value,
        })
}

impl CollectedAnswers {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a partial update.
    ///
    /// The update is validated as a whole before anything is stored, so a rejected
    /// update leaves the record untouched.
    ///
    /// # Returns
    ///
    /// Warnings raised while normalising any lab readings in the update.
    ///
    /// # Errors
    ///
    /// Returns `AnswerError::OutOfRange` if age is outside 20-90 or a score is outside 0-10.
    pub fn apply(&mut self, update: AnswerUpdate) -> Result<Vec<LabWarning>, AnswerError> {
        let age = checked(FEATURE_AGE, update.age, AGE_RANGE)?;
        let diet_quality = checked(FEATURE_DIET_QUALITY, update.diet_quality, SCORE_RANGE)?;
        let health_literacy =
            checked(FEATURE_HEALTH_LITERACY, update.health_literacy, SCORE_RANGE)?;

        let mut warnings = Vec::new();
        let mut normalise = |raw: Option<String>, kind: LabKind| {
            raw.map(|text| {
                let reading = lab::normalize(&text, kind);
                warnings.extend(reading.warning);
                reading.value
            })
        };
        let hba1c = normalise(update.hba1c, LabKind::HbA1c);
        let fasting_blood_sugar = normalise(update.fasting_blood_sugar, LabKind::FastingBloodSugar);

        fn merge<T>(slot: &mut Option<T>, value: Option<T>) {
            if value.is_some() {
                *slot = value;
            }
        }

        merge(&mut self.age, age);
        merge(&mut self.diet_quality, diet_quality);
        merge(&mut self.health_literacy, health_literacy);
        merge(&mut self.smoking, update.smoking);
        merge(&mut self.hypertension, update.hypertension);
        merge(&mut self.family_history_diabetes, update.family_history_diabetes);
        merge(&mut self.frequent_urination, update.frequent_urination);
        merge(&mut self.excessive_thirst, update.excessive_thirst);
        merge(&mut self.unexplained_weight_loss, update.unexplained_weight_loss);
        if let Some(value) = hba1c {
            self.hba1c = value;
        }
        if let Some(value) = fasting_blood_sugar {
            self.fasting_blood_sugar = value;
        }

        Ok(warnings)
    }

    fn required(&self) -> [(&'static str, Option<f64>); 9] {
        [
            (FEATURE_AGE, self.age.map(f64::from)),
            (FEATURE_DIET_QUALITY, self.diet_quality.map(f64::from)),
            (FEATURE_HEALTH_LITERACY, self.health_literacy.map(f64::from)),
            (FEATURE_SMOKING, self.smoking.map(Binary::as_f64)),
            (FEATURE_HYPERTENSION, self.hypertension.map(Binary::as_f64)),
            (
                FEATURE_FAMILY_HISTORY_DIABETES,
                self.family_history_diabetes.map(Binary::as_f64),
            ),
            (
                FEATURE_FREQUENT_URINATION,
                self.frequent_urination.map(Binary::as_f64),
            ),
            (
                FEATURE_EXCESSIVE_THIRST,
                self.excessive_thirst.map(Binary::as_f64),
            ),
            (
                FEATURE_UNEXPLAINED_WEIGHT_LOSS,
                self.unexplained_weight_loss.map(Binary::as_f64),
            ),
        ]
    }

    /// Names of required answers that are still absent, in display order.
    pub fn missing_required(&self) -> Vec<&'static str> {
        self.required()
            .into_iter()
            .filter(|(_, value)| value.is_none())
            .map(|(name, _)| name)
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_required().is_empty()
    }

    /// Projects the answers onto model feature names.
    ///
    /// Absent answers are omitted. Lab readings are always included, as stored.
    pub fn features(&self) -> FeatureMap {
        let mut features: FeatureMap = self
            .required()
            .into_iter()
            .filter_map(|(name, value)| value.map(|v| (name.to_string(), v)))
            .collect();
        features.insert(FEATURE_HBA1C.to_string(), self.hba1c);
        features.insert(FEATURE_FASTING_BLOOD_SUGAR.to_string(), self.fasting_blood_sugar);
        features
    }

    pub fn lab_completeness(&self) -> LabCompleteness {
        LabCompleteness::from_stored(self.hba1c, self.fasting_blood_sugar)
    }

    /// Lab data is available when at least one stored reading is non-zero.
    pub fn lab_available(&self) -> bool {
        self.lab_completeness().is_available()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::lab::LabIssue;

    pub(crate) fn complete_update() -> AnswerUpdate {
        AnswerUpdate {
            age: Some(45),
            diet_quality: Some(3),
            health_literacy: Some(4),
            smoking: Some(Binary::Yes),
            hypertension: Some(Binary::Yes),
            family_history_diabetes: Some(Binary::Yes),
            frequent_urination: Some(Binary::Yes),
            excessive_thirst: Some(Binary::Yes),
            unexplained_weight_loss: Some(Binary::No),
            hba1c: None,
            fasting_blood_sugar: None,
        }
    }

    #[test]
    fn test_new_record_is_missing_every_required_answer() {
        let answers = CollectedAnswers::new();
        assert_eq!(answers.missing_required(), crate::constants::REQUIRED_FIELDS.to_vec());
        assert!(!answers.lab_available());
    }

    #[test]
    fn test_apply_merges_partial_updates() {
        let mut answers = CollectedAnswers::new();
        answers
            .apply(AnswerUpdate {
                age: Some(45),
                smoking: Some(Binary::Yes),
                ..Default::default()
            })
            .expect("valid update");
        answers
            .apply(AnswerUpdate {
                diet_quality: Some(7),
                ..Default::default()
            })
            .expect("valid update");

        assert_eq!(answers.age, Some(45));
        assert_eq!(answers.smoking, Some(Binary::Yes));
        assert_eq!(answers.diet_quality, Some(7));
        assert_eq!(
            answers.missing_required(),
            vec![
                "HealthLiteracy",
                "Hypertension",
                "FamilyHistoryDiabetes",
                "FrequentUrination",
                "ExcessiveThirst",
                "UnexplainedWeightLoss",
            ]
        );
    }

    #[test]
    fn test_apply_rejects_out_of_range_without_partial_writes() {
        let mut answers = CollectedAnswers::new();
        let err = answers
            .apply(AnswerUpdate {
                age: Some(19),
                diet_quality: Some(5),
                ..Default::default()
            })
            .expect_err("age below 20 should be rejected");
        assert_eq!(
            err,
            AnswerError::OutOfRange {
                field: "Age",
                min: 20,
                max: 90,
                value: 19
            }
        );
        assert_eq!(answers, CollectedAnswers::new());

        let err = answers
            .apply(AnswerUpdate {
                health_literacy: Some(11),
                ..Default::default()
            })
            .expect_err("score above 10 should be rejected");
        assert!(matches!(err, AnswerError::OutOfRange { field: "HealthLiteracy", .. }));
    }

    #[test]
    fn test_apply_rejects_values_that_do_not_fit_the_answer_type() {
        let mut answers = CollectedAnswers::new();
        for value in [-1, 256, i64::MAX] {
            let err = answers
                .apply(AnswerUpdate {
                    diet_quality: Some(value),
                    ..Default::default()
                })
                .expect_err("value outside 0-10 should be rejected");
            assert_eq!(
                err,
                AnswerError::OutOfRange {
                    field: "DietQuality",
                    min: 0,
                    max: 10,
                    value
                }
            );
        }
        assert!(answers.diet_quality.is_none());
    }

    #[test]
    fn test_apply_normalises_lab_text_and_reports_warnings() {
        let mut answers = CollectedAnswers::new();
        let warnings = answers
            .apply(AnswerUpdate {
                hba1c: Some("12.0".into()),
                fasting_blood_sugar: Some("110".into()),
                ..Default::default()
            })
            .expect("lab text never fails the update");

        assert_eq!(answers.hba1c, 0.0);
        assert_eq!(answers.fasting_blood_sugar, 110.0);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, LabKind::HbA1c);
        assert_eq!(warnings[0].issue, LabIssue::OutOfRange);
        assert!(answers.lab_available());
        assert_eq!(answers.lab_completeness(), LabCompleteness::Partial);
    }

    #[test]
    fn test_features_store_binary_answers_as_numbers() {
        let mut answers = CollectedAnswers::new();
        answers.apply(complete_update()).expect("valid update");
        let features = answers.features();

        assert_eq!(features.len(), 11);
        assert_eq!(features["Age"], 45.0);
        assert_eq!(features["Smoking"], 1.0);
        assert_eq!(features["UnexplainedWeightLoss"], 0.0);
        assert_eq!(features["HbA1c"], 0.0);
        assert!(answers.is_complete());
    }

    #[test]
    fn test_features_omit_absent_answers() {
        let answers = CollectedAnswers::new();
        let features = answers.features();
        assert_eq!(features.len(), 2);
        assert!(!features.contains_key("Age"));
        assert!(features.contains_key("FastingBloodSugar"));
    }
}
