use super::scripts::is_letter_like;

/// Bracket, dash and operator noise that OCR engines emit around package art.
const NOISE_CHARS: &[char] = &[
    '|', '[', ']', '{', '}', '(', ')', '=', '+', '-', '_', '—', '`', '~',
];

const KEPT_PUNCTUATION: &[char] = &['.', ',', '!', '?', '\'', '"', '&'];

const MIN_LINE_CHARS: usize = 2;

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_kept(ch: char) -> bool {
    is_letter_like(ch) || ch.is_numeric() || ch.is_whitespace() || KEPT_PUNCTUATION.contains(&ch)
}

fn is_meaningful_line(line: &str) -> bool {
    line.chars().count() >= MIN_LINE_CHARS && line.chars().any(is_letter_like)
}

/// Cleans raw OCR or vision output into searchable text.
///
/// Never fails; returns an empty string when nothing meaningful survives.
/// `clean(clean(x)) == clean(x)` for every input.
pub fn clean(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    let stripped: String = text
        .chars()
        .map(|ch| if NOISE_CHARS.contains(&ch) { ' ' } else { ch })
        .collect();

    let joined = stripped
        .lines()
        .map(collapse_whitespace)
        .filter(|line| is_meaningful_line(line))
        .collect::<Vec<_>>()
        .join(" ");

    let filtered: String = joined.chars().filter(|ch| is_kept(*ch)).collect();
    let result = collapse_whitespace(&filtered);

    // stripping may leave a single surviving line too short to pass the line filter again
    if is_meaningful_line(&result) {
        result
    } else {
        String::new()
    }
}
