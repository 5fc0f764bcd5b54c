//! Fixed vocabulary: junction names, compass stems, sentence/word splitting.

use crate::model::Cardinal;

/// Words announcing a three-legged junction. Checked before [`INTERSECTION_NAMES`].
pub const T_INTERSECTION_NAMES: &[&str] = &["t-intersection", "t-junction", "three-legged", "merge"];

/// Words announcing a four-way intersection.
pub const INTERSECTION_NAMES: &[&str] = &["intersection", "four-legged", "intersect"];

pub const PARK_STEM: &str = "park";
pub const SIDE_STEM: &str = "side";

/// Relation label joining "side" and the road it belongs to ("side of the road").
pub const SIDE_OF_LABEL: &str = "nmod:of";

/// Endings a compass stem may carry and still read as a heading.
pub const DIRECTION_SUFFIXES: &[&str] = &["bound", "ward", "wards", "ern", "erly"];

const COMPASS_STEMS: [(&str, Cardinal); 4] =
    [("north", Cardinal::North), ("south", Cardinal::South), ("east", Cardinal::East), ("west", Cardinal::West)];

/// Whether `word` is `stem` alone or `stem` plus one of [`DIRECTION_SUFFIXES`].
///
/// Both sides are expected lowercased. "eastwood" and "northampton" do not match.
pub fn is_direction_form(word: &str, stem: &str) -> bool {
    match word.strip_prefix(stem) {
        Some("") => true,
        Some(rest) => DIRECTION_SUFFIXES.contains(&rest),
        None => false,
    }
}

/// Map a direction word to its cardinal by compass stem.
///
/// `"north"`, `"northbound"` and `"northward"` all map to N. Compound headings
/// ("northeast") and names that merely start with a stem map to nothing.
pub fn cardinal_for_word(word: &str) -> Option<Cardinal> {
    let word = word.to_lowercase();
    COMPASS_STEMS.into_iter().find(|(stem, _)| is_direction_form(&word, stem)).map(|(_, cardinal)| cardinal)
}

/// Split a paragraph into sentences on `". "`.
///
/// Abbreviations are not special-cased; the trailing period of the final
/// sentence is kept and removed later by [`words`].
pub fn split_sentences(paragraph: &str) -> impl Iterator<Item = &str> {
    paragraph.split(". ").map(str::trim).filter(|s| !s.is_empty())
}

/// Whitespace words with surrounding punctuation trimmed, lowercased.
///
/// Inner hyphens survive (`"2-lane"`, `"t-junction"`).
pub fn words(sentence: &str) -> impl Iterator<Item = String> + '_ {
    sentence
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
        .filter(|w| !w.is_empty())
}
