//! Validated primitive types shared across DiaLens crates.

/// Errors that can occur when creating validated primitive types.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum TypesError {
    /// A binary answer was neither 0 nor 1
    #[error("binary value must be 0 or 1, got {0}")]
    NotBinary(i64),

    /// A probability was NaN, infinite or outside [0, 1]
    #[error("probability must be a finite number in [0, 1], got {0}")]
    InvalidProbability(f64),
}

/// A yes/no answer stored as 0 or 1.
///
/// Model inputs are numeric, so binary answers never travel as `bool`. Checkbox-style
/// inputs are converted on entry with `From<bool>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binary {
    No,
    Yes,
}

impl Binary {
    /// Creates a `Binary` from an integer, which must be 0 or 1.
    pub fn new(value: i64) -> Result<Self, TypesError> {
        match value {
            0 => Ok(Self::No),
            1 => Ok(Self::Yes),
            other => Err(TypesError::NotBinary(other)),
        }
    }

    /// Returns the stored value, 0 or 1.
    pub fn as_u8(self) -> u8 {
        match self {
            Self::No => 0,
            Self::Yes => 1,
        }
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.as_u8())
    }
}

impl From<bool> for Binary {
    fn from(value: bool) -> Self {
        if value {
            Self::Yes
        } else {
            Self::No
        }
    }
}

impl std::fmt::Display for Binary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

impl serde::Serialize for Binary {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.as_u8())
    }
}

/// A probability guaranteed to be finite and within `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Probability(f64);

impl Probability {
    /// The neutral probability used when a model cannot produce a score.
    pub const NEUTRAL: Probability = Probability(0.5);

    /// Creates a new `Probability`, rejecting NaN, infinities and values outside `[0, 1]`.
    pub fn new(value: f64) -> Result<Self, TypesError> {
        if value.is_finite() && (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(TypesError::InvalidProbability(value))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Returns the probability as a percentage rounded to one decimal place.
    pub fn as_percent(self) -> f64 {
        (self.0 * 1000.0).round() / 10.0
    }
}

impl std::fmt::Display for Probability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}%", self.0 * 100.0)
    }
}

impl serde::Serialize for Probability {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_f64(self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Probability {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        Probability::new(value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_accepts_zero_and_one_only() {
        assert_eq!(Binary::new(0), Ok(Binary::No));
        assert_eq!(Binary::new(1), Ok(Binary::Yes));
        assert_eq!(Binary::new(2), Err(TypesError::NotBinary(2)));
        assert_eq!(Binary::new(-1), Err(TypesError::NotBinary(-1)));
    }

    #[test]
    fn test_binary_converts_checkbox_booleans_and_serializes_as_integer() {
        assert_eq!(Binary::from(true), Binary::Yes);
        assert_eq!(Binary::from(false), Binary::No);
        assert_eq!(Binary::Yes.as_f64(), 1.0);
        let json = serde_json::to_string(&Binary::from(true)).expect("serialize");
        assert_eq!(json, "1");
    }

    #[test]
    fn test_probability_rejects_out_of_range_values() {
        assert!(Probability::new(0.0).is_ok());
        assert!(Probability::new(1.0).is_ok());
        assert!(Probability::new(-0.01).is_err());
        assert!(Probability::new(1.01).is_err());
        assert!(Probability::new(f64::NAN).is_err());
        assert!(Probability::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_probability_display_and_percent() {
        let p = Probability::new(0.6234).expect("valid probability");
        assert_eq!(p.to_string(), "62.3%");
        assert_eq!(p.as_percent(), 62.3);
        assert_eq!(Probability::NEUTRAL.value(), 0.5);
    }
}
