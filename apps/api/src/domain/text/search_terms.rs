use crate::domain::analysis::value_objects::SearchQuery;
use crate::domain::product::catalog::{BRANDS, Brand};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref MEASUREMENT_TOKEN: Regex =
        Regex::new(r"(?i)^\d+(ml|mg|g|kg|l|oz|fl)$").unwrap();
    static ref BRAND_PATTERNS: Vec<(&'static Brand, Regex)> = BRANDS
        .iter()
        .map(|brand| (brand, brand_pattern(brand)))
        .collect();
}

const MIN_TERM_CHARS: usize = 10;
const FALLBACK_CHARS: usize = 60;
const BRANDED_WORDS: usize = 5;
const UNBRANDED_WORDS: usize = 6;

/// Matches the brand name or any alias as whole words, tolerant of the
/// spacing left behind by [`strip_symbols`].
fn brand_pattern(brand: &Brand) -> Regex {
    let variants = std::iter::once(brand.name)
        .chain(brand.aliases.iter().copied())
        .map(|variant| {
            strip_symbols(variant)
                .split_whitespace()
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(r"\s+")
        })
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(
        r"(?i)(?:^|[^\p{{L}}\p{{N}}])(?:{})(?:$|[^\p{{L}}\p{{N}}])",
        variants
    ))
    .unwrap()
}

fn strip_symbols(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_noise_token(token: &str) -> bool {
    let mut chars = token.chars();
    let single_letter = matches!((chars.next(), chars.next()), (Some(c), None) if c.is_alphabetic());
    let small_number = token.len() <= 2 && token.chars().all(|c| c.is_ascii_digit());
    single_letter || small_number || MEASUREMENT_TOKEN.is_match(token)
}

/// Punctuation, single letters, 1-2 digit numbers and pack sizes removed.
pub fn strip_noise(text: &str) -> String {
    strip_symbols(text)
        .split_whitespace()
        .filter(|token| !is_noise_token(token))
        .collect::<Vec<_>>()
        .join(" ")
}

fn find_brand(text: &str) -> Option<&'static (&'static Brand, Regex)> {
    let normalized = strip_symbols(text);
    BRAND_PATTERNS
        .iter()
        .find(|(_, pattern)| pattern.is_match(&normalized))
}

/// First known brand mentioned in the text, matched case-insensitively on word boundaries.
pub fn detect_brand(text: &str) -> Option<&'static Brand> {
    find_brand(text).map(|(brand, _)| *brand)
}

fn words_longer_than(text: &str, min_exclusive: usize, limit: usize) -> Vec<&str> {
    text.split_whitespace()
        .filter(|word| word.chars().count() > min_exclusive)
        .take(limit)
        .collect()
}

/// Turns noisy extracted or translated text into a compact product query.
///
/// Returns `None` only for blank input.
pub fn build(raw: &str) -> Option<SearchQuery> {
    if raw.trim().is_empty() {
        return None;
    }

    let cleaned = strip_noise(raw);

    let mut term = match find_brand(raw) {
        Some((brand, pattern)) => {
            let rest = pattern.replace_all(&cleaned, " ");
            let words = words_longer_than(&rest, 2, BRANDED_WORDS);
            format!("{} {}", brand.name, words.join(" ")).trim().to_string()
        }
        None => words_longer_than(&cleaned, 3, UNBRANDED_WORDS).join(" "),
    };

    if term.chars().count() < MIN_TERM_CHARS {
        term = cleaned.chars().take(FALLBACK_CHARS).collect();
    }
    if term.trim().is_empty() {
        term = raw.trim().chars().take(FALLBACK_CHARS).collect();
    }

    SearchQuery::new(term)
}
