use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Spelled-out cardinals that show up in lane descriptions.
static CARDINAL_WORDS: Lazy<HashMap<&'static str, u32>> = Lazy::new(|| {
    HashMap::from([
        ("zero", 0),
        ("one", 1),
        ("single", 1),
        ("two", 2),
        ("double", 2),
        ("three", 3),
        ("four", 4),
        ("five", 5),
        ("six", 6),
        ("seven", 7),
        ("eight", 8),
        ("nine", 9),
        ("ten", 10),
        ("eleven", 11),
        ("twelve", 12),
    ])
});

/// Ordinal words used to name a travel lane ("the second lane").
static ORDINAL_WORDS: Lazy<HashMap<&'static str, u32>> = Lazy::new(|| {
    HashMap::from([
        ("first", 1),
        ("second", 2),
        ("third", 3),
        ("fourth", 4),
        ("fifth", 5),
        ("sixth", 6),
        ("seventh", 7),
        ("eighth", 8),
        ("ninth", 9),
        ("tenth", 10),
    ])
});

/// Parse a decimal number string into `f64`.
pub fn parse_decimal(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// True when `s` is a plain number (integer or decimal).
pub fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit() || c == '.') && parse_decimal(s).is_some()
}

/// Resolve a standalone numeral token to a non-negative integer.
///
/// Digits and decimals are truncated (`"2.0"` -> 2); spelled-out cardinals
/// up to twelve are accepted.
pub fn numeral_value(word: &str) -> Option<u32> {
    if is_numeric(word) {
        return parse_decimal(word).map(|v| v.trunc() as u32);
    }
    CARDINAL_WORDS.get(word).copied()
}

/// Resolve an ordinal token ("second", "2nd") to its number.
pub fn ordinal_value(word: &str) -> Option<u32> {
    if let Some(n) = ORDINAL_WORDS.get(word) {
        return Some(*n);
    }
    let caps = regex!(r"^(\d+)(?:st|nd|rd|th)$").captures(word)?;
    caps[1].parse::<u32>().ok()
}
