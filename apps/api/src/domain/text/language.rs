use super::scripts::{Script, contains_script};
use crate::domain::analysis::value_objects::LanguageCode;

/// Letters only Vietnamese uses among Latin-script languages, plus the
/// precomposed tone-mark block U+1EA0..U+1EF9.
fn is_vietnamese_letter(ch: char) -> bool {
    matches!(ch, 'ă' | 'Ă' | 'đ' | 'Đ' | 'ơ' | 'Ơ' | 'ư' | 'Ư') || ('\u{1EA0}'..='\u{1EF9}').contains(&ch)
}

const FRENCH_ACCENTS: &[char] = &['é', 'è', 'ê', 'à', 'â', 'ù', 'û', 'î', 'ï', 'ô', 'ë', 'ç', 'œ'];

const FRENCH_STOPWORDS: &[&str] = &[
    "le", "la", "les", "de", "des", "du", "et", "pour", "avec", "au", "aux", "une", "un", "peau",
];

fn has_any(text: &str, chars: &[char]) -> bool {
    text.chars().any(|ch| chars.contains(&ch))
}

fn is_french(lower: &str) -> bool {
    has_any(lower, FRENCH_ACCENTS)
        && lower
            .split(|c: char| !c.is_alphabetic())
            .any(|word| FRENCH_STOPWORDS.contains(&word))
}

/// Guesses the language from Unicode blocks and Latin diacritics.
///
/// Rules are checked in a fixed priority order and the first match wins;
/// anything unmatched, including empty input, is English.
pub fn detect_by_script(text: &str) -> LanguageCode {
    let text = text.trim();
    if text.is_empty() {
        return LanguageCode::En;
    }

    const SCRIPT_RULES: &[(Script, LanguageCode)] = &[
        (Script::Devanagari, LanguageCode::Hi),
        (Script::Hangul, LanguageCode::Ko),
        (Script::Kana, LanguageCode::Ja),
        (Script::Han, LanguageCode::Zh),
        (Script::Thai, LanguageCode::Th),
        (Script::Arabic, LanguageCode::Ar),
        (Script::Hebrew, LanguageCode::He),
        (Script::Cyrillic, LanguageCode::Ru),
        (Script::Greek, LanguageCode::El),
        (Script::Bengali, LanguageCode::Bn),
        (Script::Tamil, LanguageCode::Ta),
        (Script::Telugu, LanguageCode::Te),
    ];

    if let Some((_, code)) = SCRIPT_RULES
        .iter()
        .find(|(script, _)| contains_script(text, *script))
    {
        return *code;
    }

    let lower = text.to_lowercase();
    if lower.chars().any(is_vietnamese_letter) {
        LanguageCode::Vi
    } else if has_any(&lower, &['ñ', '¿', '¡']) {
        LanguageCode::Es
    } else if is_french(&lower) {
        LanguageCode::Fr
    } else if has_any(&lower, &['ä', 'ö', 'ü', 'ß']) {
        LanguageCode::De
    } else if has_any(&lower, &['ã', 'õ', 'ç']) {
        LanguageCode::Pt
    } else {
        LanguageCode::En
    }
}
