//! Laboratory value normalisation.
//!
//! Lab readings arrive as free text. A reading that cannot be parsed, is zero or falls
//! outside its plausible range is stored as `0.0`, the sentinel for "not provided",
//! and a non-blocking warning is returned for the user. Sentinel values are replaced
//! with population-normal defaults only when the combined model is scored; the stored
//! answers keep the zero.

use crate::constants::{
    DEFAULT_FASTING_BLOOD_SUGAR, DEFAULT_HBA1C, FASTING_BLOOD_SUGAR_MAX, FASTING_BLOOD_SUGAR_MIN,
    FEATURE_FASTING_BLOOD_SUGAR, FEATURE_HBA1C, HBA1C_MAX, HBA1C_MIN_EXCLUSIVE,
};
use serde::Serialize;

/// The two laboratory measurements the combined model understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LabKind {
    HbA1c,
    FastingBloodSugar,
}

impl LabKind {
    /// The model feature name this reading feeds.
    pub fn feature_name(self) -> &'static str {
        match self {
            Self::HbA1c => FEATURE_HBA1C,
            Self::FastingBloodSugar => FEATURE_FASTING_BLOOD_SUGAR,
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Self::HbA1c => "%",
            Self::FastingBloodSugar => "mg/dL",
        }
    }

    /// Whether a non-zero reading is physiologically plausible.
    ///
    /// HbA1c accepts (4.0, 10.0]; fasting blood sugar accepts [70, 200].
    pub fn is_plausible(self, value: f64) -> bool {
        match self {
            Self::HbA1c => value > HBA1C_MIN_EXCLUSIVE && value <= HBA1C_MAX,
            Self::FastingBloodSugar => {
                (FASTING_BLOOD_SUGAR_MIN..=FASTING_BLOOD_SUGAR_MAX).contains(&value)
            }
        }
    }

    /// The population-normal value assumed when no reading was provided.
    pub fn population_default(self) -> f64 {
        match self {
            Self::HbA1c => DEFAULT_HBA1C,
            Self::FastingBloodSugar => DEFAULT_FASTING_BLOOD_SUGAR,
        }
    }

    fn example(self) -> &'static str {
        match self {
            Self::HbA1c => "5.7",
            Self::FastingBloodSugar => "95",
        }
    }

    fn range_description(self) -> &'static str {
        match self {
            Self::HbA1c => "above 4.0 and at most 10.0",
            Self::FastingBloodSugar => "between 70 and 200",
        }
    }
}

impl std::fmt::Display for LabKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.feature_name())
    }
}

/// Why a lab reading was stored as "not provided".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LabIssue {
    Unparseable,
    NotProvided,
    OutOfRange,
}

/// A non-fatal warning raised while normalising a lab reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabWarning {
    pub kind: LabKind,
    pub issue: LabIssue,
}

impl LabWarning {
    /// Message shown to the user next to the lab input.
    pub fn message(&self) -> String {
        let kind = self.kind;
        match self.issue {
            LabIssue::Unparseable => format!(
                "{kind} is not a valid number. Use a decimal such as {} or 0.",
                kind.example()
            ),
            LabIssue::NotProvided => format!(
                "{kind} was not provided; a normal value of {} {} will be assumed.",
                kind.population_default(),
                kind.unit()
            ),
            LabIssue::OutOfRange => format!(
                "{kind} must be {} {}; the value was ignored.",
                kind.range_description(),
                kind.unit()
            ),
        }
    }
}

impl std::fmt::Display for LabWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}

/// A normalised lab reading: either a plausible value or the `0.0` sentinel.
#[derive(Debug, Clone, PartialEq)]
pub struct LabReading {
    pub value: f64,
    pub warning: Option<LabWarning>,
}

impl LabReading {
    fn not_provided(kind: LabKind, issue: LabIssue) -> Self {
        Self {
            value: 0.0,
            warning: Some(LabWarning { kind, issue }),
        }
    }
}

/// Parse and validate a free-text lab reading.
pub fn normalize(raw_text: &str, kind: LabKind) -> LabReading {
    let Ok(value) = raw_text.trim().parse::<f64>() else {
        return LabReading::not_provided(kind, LabIssue::Unparseable);
    };

    if value == 0.0 {
        return LabReading::not_provided(kind, LabIssue::NotProvided);
    }

    if !kind.is_plausible(value) {
        return LabReading::not_provided(kind, LabIssue::OutOfRange);
    }

    LabReading {
        value,
        warning: None,
    }
}

/// Replace the "not provided" sentinel with the population-normal default.
pub fn impute(value: f64, kind: LabKind) -> f64 {
    if value == 0.0 {
        kind.population_default()
    } else {
        value
    }
}

/// How much lab data a session has supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LabCompleteness {
    /// Neither reading was provided; only the lifestyle model is used.
    None,
    /// One reading was provided; the other is assumed normal.
    Partial,
    /// Both readings were provided.
    Complete,
}

impl LabCompleteness {
    pub fn from_stored(hba1c: f64, fasting_blood_sugar: f64) -> Self {
        match (hba1c != 0.0, fasting_blood_sugar != 0.0) {
            (true, true) => Self::Complete,
            (false, false) => Self::None,
            _ => Self::Partial,
        }
    }

    /// Lab data is available when at least one stored reading is non-zero.
    pub fn is_available(self) -> bool {
        !matches!(self, Self::None)
    }
}
