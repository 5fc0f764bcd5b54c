//! Cue scanning (paragraph pre-classification).
//!
//! Before any dependency graph is consulted, the raw text is scanned for
//! cheap signals that decide which passes are worth running:
//!
//! - **Cues** (`CueMask`): coarse booleans such as "mentions lanes" or
//!   "mentions parking". The parking pass is gated on `PARK`. The direction
//!   pass runs only with `DIRECTIONAL` or `LANE`, and its lane-only branch
//!   needs `LANE`. Junction streets are created only with `INTERSECTION`.
//! - **Intersection kind**: whether the paragraph names a T-junction, a
//!   four-way intersection, or neither.
//!
//! ## Design notes
//!
//! - This is a *heuristic* scan. False positives are acceptable because the
//!   passes still have to find supporting structure in the dependency graph.
//! - Matching is at word starts on lowercased, punctuation-trimmed words, so
//!   "merge" finds "merged" but not "emerge".

use crate::rules::predicates::is_lane_vocabulary;
use crate::rules::vocabulary::{INTERSECTION_NAMES, PARK_STEM, T_INTERSECTION_NAMES, cardinal_for_word, words};
use serde::Serialize;
use std::fmt;

bitflags::bitflags! {
    /// Coarse cues detected in a paragraph or sentence.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CueMask: u32 {
        const LANE         = 1 << 0;
        const PARK         = 1 << 1;
        const DIRECTIONAL  = 1 << 2;
        const INTERSECTION = 1 << 3;
    }
}

/// Junction layout named in a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IntersectionKind {
    #[default]
    None,
    Intersection,
    TIntersection,
}

impl fmt::Display for IntersectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IntersectionKind::None => "none",
            IntersectionKind::Intersection => "intersection",
            IntersectionKind::TIntersection => "t-intersection",
        })
    }
}

/// Signals detected from raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParagraphCues {
    pub cues: CueMask,
    pub intersection: IntersectionKind,
}

impl ParagraphCues {
    /// Scan `text` (a paragraph or a single sentence).
    pub fn scan(text: &str) -> Self {
        let mut cues = CueMask::empty();
        let words: Vec<String> = words(text).collect();

        if words.iter().any(|w| is_lane_vocabulary(w)) {
            cues |= CueMask::LANE;
        }
        // Plain substring on purpose: "parked", "parking", "park" all count.
        if text.to_lowercase().contains(PARK_STEM) {
            cues |= CueMask::PARK;
        }
        if words.iter().any(|w| cardinal_for_word(w).is_some()) {
            cues |= CueMask::DIRECTIONAL;
        }

        let intersection = intersection_kind(&words);
        if intersection != IntersectionKind::None {
            cues |= CueMask::INTERSECTION;
        }

        tracing::trace!(?cues, %intersection, "cue scan");
        ParagraphCues { cues, intersection }
    }

    pub fn has(&self, cue: CueMask) -> bool {
        self.cues.contains(cue)
    }
}

fn intersection_kind(words: &[String]) -> IntersectionKind {
    let mentions = |names: &[&str]| words.iter().any(|w| names.iter().any(|name| w.starts_with(name)));

    if mentions(T_INTERSECTION_NAMES) {
        IntersectionKind::TIntersection
    } else if mentions(INTERSECTION_NAMES) {
        IntersectionKind::Intersection
    } else {
        IntersectionKind::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t_junction_vocabulary_wins_over_intersection() {
        let cues = ParagraphCues::scan("The crash occurred at a T-intersection. The intersection is controlled.");
        assert_eq!(cues.intersection, IntersectionKind::TIntersection);
        assert!(cues.has(CueMask::INTERSECTION));
    }

    #[test]
    fn detects_plain_intersection_and_none() {
        assert_eq!(ParagraphCues::scan("Two roads intersect here.").intersection, IntersectionKind::Intersection);
        assert_eq!(ParagraphCues::scan("A four-legged junction.").intersection, IntersectionKind::Intersection);
        assert_eq!(ParagraphCues::scan("Vehicles merged into traffic.").intersection, IntersectionKind::TIntersection);
        assert_eq!(ParagraphCues::scan("A straight road.").intersection, IntersectionKind::None);
        assert_eq!(ParagraphCues::scan("Smoke began to emerge.").intersection, IntersectionKind::None);
    }

    #[test]
    fn coarse_cues() {
        let cues = ParagraphCues::scan("V1 was parked on the 2-lane northbound road.");
        assert!(cues.has(CueMask::LANE | CueMask::PARK | CueMask::DIRECTIONAL));
        assert!(!cues.has(CueMask::INTERSECTION));

        let place = ParagraphCues::scan("The car left Eastwood Avenue.");
        assert!(!place.has(CueMask::DIRECTIONAL));

        let quiet = ParagraphCues::scan("It was raining.");
        assert_eq!(quiet.cues, CueMask::empty());
    }
}
