//! Advisory text for each risk tier.

use crate::risk::RiskTier;
use serde::Serialize;

/// A fixed block of recommendations shown with the effective risk tier.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub headline: &'static str,
    pub actions: &'static [&'static str],
    pub note: Option<&'static str>,
}

static LOW: Recommendation = Recommendation {
    headline: "Low risk: keep up your healthy lifestyle",
    actions: &[
        "Continue a balanced diet and regular physical activity (at least 150 minutes per week).",
        "Check your blood sugar every 2-3 years, especially if you are over 40.",
        "Keep building your health literacy; you are on the right track.",
    ],
    note: None,
};

static MEDIUM: Recommendation = Recommendation {
    headline: "Medium risk: stay alert and take preventive steps",
    actions: &[
        "Cut down on sugar, sweetened drinks and processed food.",
        "Increase physical activity such as brisk walking, cycling or light exercise.",
        "Have a fasting blood sugar or HbA1c test within 3-6 months.",
        "Talk to a health professional about further screening.",
    ],
    note: None,
};

static HIGH: Recommendation = Recommendation {
    headline: "High risk: seek medical advice soon",
    actions: &[
        "You are in a high-risk group for type 2 diabetes.",
        "See a doctor promptly for a full check-up (HbA1c, fasting glucose, lipid profile).",
        "Avoid added sugar, smoking and a sedentary lifestyle.",
        "Consider a structured diabetes prevention programme if one is available.",
    ],
    note: Some(
        "Early diagnosis and lifestyle intervention can reduce the risk of diabetes by up to 58%.",
    ),
};

/// Select the recommendation block for a risk tier.
pub fn advise(tier: RiskTier) -> &'static Recommendation {
    match tier {
        RiskTier::Low => &LOW,
        RiskTier::Medium => &MEDIUM,
        RiskTier::High => &HIGH,
    }
}
