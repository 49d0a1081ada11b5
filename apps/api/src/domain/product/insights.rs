use super::entity::Insights;

const SKIN_TYPE_KEYWORDS: &[&str] = &[
    "oily",
    "dry",
    "combination",
    "sensitive",
    "normal",
    "acne-prone",
    "all skin types",
    "mature",
];

/// Benefit keywords paired with the tag they produce. Hydration synonyms
/// collapse onto one canonical tag; everything else is kept as found.
const BENEFIT_KEYWORDS: &[(&str, &str)] = &[
    ("hydration", "hydrating"),
    ("hydrating", "hydrating"),
    ("moisture", "hydrating"),
    ("moisturizing", "hydrating"),
    ("brightening", "brightening"),
    ("radiance", "radiance"),
    ("anti-aging", "anti-aging"),
    ("wrinkles", "wrinkles"),
    ("firming", "firming"),
    ("soothing", "soothing"),
    ("calming", "calming"),
    ("redness", "redness"),
    ("pore minimizing", "pore minimizing"),
    ("exfoliating", "exfoliating"),
    ("acne", "acne"),
    ("blemishes", "blemishes"),
    ("sun protection", "sun protection"),
    ("spf", "spf"),
];

/// Case-insensitive substring scan of free text for skin-type and benefit tags.
pub fn classify_insights(text: &str) -> Insights {
    let lower = text.to_lowercase();
    let mut insights = Insights::default();

    for keyword in SKIN_TYPE_KEYWORDS {
        if lower.contains(keyword) {
            insights.add_skin_type(keyword);
        }
    }
    for (keyword, tag) in BENEFIT_KEYWORDS {
        if lower.contains(keyword) {
            insights.add_benefit(tag);
        }
    }

    insights
}
