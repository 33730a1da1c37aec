//! Threshold-based risk classification.

use crate::constants::{HIGH_RISK_THRESHOLD, MEDIUM_RISK_THRESHOLD};
use dialens_types::Probability;
use serde::Serialize;

/// Three-tier risk label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "low",
            RiskTier::Medium => "medium",
            RiskTier::High => "high",
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a probability. Both thresholds are inclusive lower bounds, so ties resolve
/// to the higher tier.
pub fn classify(probability: Probability) -> RiskTier {
    let p = probability.value();
    if p >= HIGH_RISK_THRESHOLD {
        RiskTier::High
    } else if p >= MEDIUM_RISK_THRESHOLD {
        RiskTier::Medium
    } else {
        RiskTier::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier(p: f64) -> RiskTier {
        classify(Probability::new(p).expect("valid probability"))
    }

    #[test]
    fn test_classify_boundaries_resolve_upward() {
        assert_eq!(tier(0.60), RiskTier::High);
        assert_eq!(tier(0.50), RiskTier::Medium);
        assert_eq!(tier(0.5999999), RiskTier::Medium);
        assert_eq!(tier(0.4999999), RiskTier::Low);
    }

    #[test]
    fn test_classify_extremes() {
        assert_eq!(tier(0.0), RiskTier::Low);
        assert_eq!(tier(1.0), RiskTier::High);
        assert_eq!(classify(Probability::NEUTRAL), RiskTier::Medium);
    }

    #[test]
    fn test_classify_matches_threshold_definition_across_range() {
        for i in 0..=1000 {
            let p = f64::from(i) / 1000.0;
            let expected = if p >= 0.60 {
                RiskTier::High
            } else if p >= 0.50 {
                RiskTier::Medium
            } else {
                RiskTier::Low
            };
            assert_eq!(tier(p), expected, "p = {p}");
        }
    }
}
