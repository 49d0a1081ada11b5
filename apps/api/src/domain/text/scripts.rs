//! Unicode block table shared by the normalizer and the language heuristics.

/// Non-Latin writing systems recognised on packaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    Devanagari,
    Hangul,
    Kana,
    Han,
    Thai,
    Arabic,
    Hebrew,
    Cyrillic,
    Greek,
    Bengali,
    Tamil,
    Telugu,
}

const BLOCKS: &[(Script, u32, u32)] = &[
    (Script::Devanagari, 0x0900, 0x097F),
    (Script::Hangul, 0xAC00, 0xD7AF),
    (Script::Hangul, 0x1100, 0x11FF),
    (Script::Hangul, 0x3130, 0x318F),
    (Script::Kana, 0x3040, 0x309F),
    (Script::Kana, 0x30A0, 0x30FF),
    (Script::Han, 0x4E00, 0x9FFF),
    (Script::Han, 0x3400, 0x4DBF),
    (Script::Thai, 0x0E00, 0x0E7F),
    (Script::Arabic, 0x0600, 0x06FF),
    (Script::Arabic, 0xFB50, 0xFDFF),
    (Script::Arabic, 0xFE70, 0xFEFF),
    (Script::Hebrew, 0x0590, 0x05FF),
    (Script::Cyrillic, 0x0400, 0x04FF),
    (Script::Greek, 0x0370, 0x03FF),
    (Script::Bengali, 0x0980, 0x09FF),
    (Script::Tamil, 0x0B80, 0x0BFF),
    (Script::Telugu, 0x0C00, 0x0C7F),
];

pub fn script_of(ch: char) -> Option<Script> {
    let code = ch as u32;
    BLOCKS
        .iter()
        .find(|(_, start, end)| (*start..=*end).contains(&code))
        .map(|(script, _, _)| *script)
}

pub fn contains_script(text: &str, script: Script) -> bool {
    text.chars().any(|ch| script_of(ch) == Some(script))
}

/// Letters in any script, including combining vowel signs of the Indic blocks
/// which `char::is_alphabetic` does not always cover.
pub fn is_letter_like(ch: char) -> bool {
    ch.is_alphabetic() || script_of(ch).is_some()
}
