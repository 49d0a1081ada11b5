use serde::{Deserialize, Serialize};
use ts_rs::TS;

struct Entry {
    name: &'static str,
    note: &'static str,
}

const fn entry(name: &'static str, note: &'static str) -> Entry {
    Entry { name, note }
}

const BAD: &[Entry] = &[
    entry("paraben", "Potential hormone disruptor"),
    entry("sulfate", "Can strip natural oils, irritate skin"),
    entry("phthalate", "Potential hormone disruptor"),
    entry("formaldehyde", "Known carcinogen"),
    entry("triclosan", "Potential hormone disruptor"),
    entry("oxybenzone", "Hormone disruption concerns"),
    entry("hydroquinone", "Can cause skin sensitivity"),
    entry("coal tar", "Potential carcinogen"),
    entry("mineral oil", "Can clog pores"),
];

const CAUTION: &[Entry] = &[
    entry("fragrance", "May cause irritation for sensitive skin"),
    entry("parfum", "May cause irritation for sensitive skin"),
    entry("alcohol denat", "Can be drying"),
    entry("retinol", "Can cause sensitivity, avoid sun exposure"),
    entry("aha", "Can cause sun sensitivity"),
    entry("bha", "Can cause sun sensitivity"),
    entry("glycolic acid", "Can cause sun sensitivity"),
    entry("salicylic acid", "Can be drying, sun sensitivity"),
];

const GOOD: &[Entry] = &[
    entry("hyaluronic acid", "Intense hydration"),
    entry("niacinamide", "Brightening, pore minimizing"),
    entry("vitamin c", "Antioxidant, brightening"),
    entry("ascorbic acid", "Vitamin C, brightening"),
    entry("ceramide", "Barrier repair"),
    entry("peptide", "Anti-aging, firming"),
    entry("centella", "Soothing, healing"),
    entry("cica", "Soothing, healing"),
    entry("aloe", "Soothing, hydrating"),
    entry("green tea", "Antioxidant"),
    entry("squalane", "Moisturizing, non-comedogenic"),
    entry("snail", "Healing, hydrating"),
    entry("glycerin", "Hydrating"),
    entry("shea butter", "Moisturizing"),
    entry("jojoba", "Balancing, moisturizing"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BeneficialIngredient {
    pub name: String,
    pub benefit: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FlaggedIngredient {
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum SafetyScore {
    Clean,
    #[serde(rename = "Generally Safe")]
    GenerallySafe,
    #[serde(rename = "Concerns Found")]
    ConcernsFound,
}

impl SafetyScore {
    pub fn color(&self) -> &'static str {
        match self {
            Self::Clean => "#22c55e",
            Self::GenerallySafe => "#f59e0b",
            Self::ConcernsFound => "#ef4444",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct IngredientAnalysis {
    pub good: Vec<BeneficialIngredient>,
    pub caution: Vec<FlaggedIngredient>,
    pub bad: Vec<FlaggedIngredient>,
    pub score: SafetyScore,
    pub color: String,
}

fn matches<'a>(lower: &'a str, tier: &'static [Entry]) -> impl Iterator<Item = &'static Entry> + 'a {
    tier.iter().filter(move |e| lower.contains(e.name))
}

fn flagged(lower: &str, tier: &'static [Entry]) -> Vec<FlaggedIngredient> {
    matches(lower, tier)
        .map(|e| FlaggedIngredient {
            name: e.name.to_string(),
            reason: e.note.to_string(),
        })
        .collect()
}

/// Matches the text against the three safety tiers.
///
/// `None` when the text is blank or nothing in any tier matches. A single
/// `bad` hit decides the score regardless of how many good ingredients appear.
pub fn classify_ingredients(text: &str) -> Option<IngredientAnalysis> {
    if text.trim().is_empty() {
        return None;
    }
    let lower = text.to_lowercase();

    let good: Vec<BeneficialIngredient> = matches(&lower, GOOD)
        .map(|e| BeneficialIngredient {
            name: e.name.to_string(),
            benefit: e.note.to_string(),
        })
        .collect();
    let caution = flagged(&lower, CAUTION);
    let bad = flagged(&lower, BAD);

    if good.is_empty() && caution.is_empty() && bad.is_empty() {
        return None;
    }

    let score = if !bad.is_empty() {
        SafetyScore::ConcernsFound
    } else if !caution.is_empty() {
        SafetyScore::GenerallySafe
    } else {
        SafetyScore::Clean
    };

    Some(IngredientAnalysis {
        good,
        caution,
        bad,
        score,
        color: score.color().to_string(),
    })
}
