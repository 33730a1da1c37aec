//! Global diabetes context shown next to the results (IDF Diabetes Atlas 2024).

use serde::Serialize;

pub const FACTS_SOURCE_URL: &str = "https://diabetesatlas.org/data/en/world/";

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct GlobalFacts {
    pub title: &'static str,
    pub facts: &'static [&'static str],
    pub source_url: &'static str,
}

pub static GLOBAL_FACTS: GlobalFacts = GlobalFacts {
    title: "Global facts: diabetes worldwide (IDF Diabetes Atlas 2024)",
    facts: &[
        "589 million adults (20-79 years) live with diabetes, 1 in 9 people.",
        "This is projected to rise to 853 million by 2050, 1 in 8 people.",
        "Diabetes caused 3.4 million deaths in 2024, one every 9 seconds.",
        "252 million (43%) people with diabetes are undiagnosed; 81% of them live in low- and middle-income countries.",
        "Global health expenditure on diabetes reached USD 1.015 trillion in 2024.",
        "635 million people have impaired glucose tolerance and 488 million have impaired fasting glucose.",
        "1 in 5 live births is affected by hyperglycaemia in pregnancy.",
    ],
    source_url: FACTS_SOURCE_URL,
};
