//! Word-level predicates over lowercased tokens.

use super::numeral::numeral_value;

/// "lane", "lanes", "lane-2", ...
pub fn is_lane_word(norm: &str) -> bool {
    norm.starts_with("lane")
}

/// Lane count carried directly by a numeral compound: `3-lane`, `two-lanes`.
pub fn lane_compound(norm: &str) -> Option<u32> {
    let caps = regex!(r"^([a-z0-9.]+)-lanes?$").captures(norm)?;
    numeral_value(&caps[1])
}

/// Any word that signals the sentence talks about lanes of travel.
pub fn is_lane_vocabulary(norm: &str) -> bool {
    is_lane_word(norm) || norm.ends_with("-lane") || norm.ends_with("-lanes") || norm == "travel"
}

/// Modifier naming the main (continuous) road: "main", "main-road".
pub fn is_main_modifier(norm: &str) -> bool {
    norm == "main" || norm.starts_with("main-")
}

/// Modifier naming a road that crosses into or ends at the junction.
pub fn is_terminating_modifier(norm: &str) -> bool {
    norm.contains("cross") || norm.starts_with("end")
}

/// Parking-line evidence next to "side": "line", "lined", "filled".
pub fn is_park_line_word(norm: &str) -> bool {
    norm.starts_with("line") || norm.starts_with("fill")
}

pub fn is_car_word(norm: &str) -> bool {
    norm.starts_with("car")
}

/// Words that place a parked vehicle in the kerbside lane.
pub fn is_kerbside_word(norm: &str) -> bool {
    word_set!["right", "curb", "kerb", "shoulder", "curbside", "roadside"].contains(norm)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lane_compounds() {
        assert_eq!(lane_compound("3-lane"), Some(3));
        assert_eq!(lane_compound("12-lanes"), Some(12));
        assert_eq!(lane_compound("two-lane"), Some(2));
        assert_eq!(lane_compound("lane"), None);
        assert_eq!(lane_compound("3-way"), None);
        assert_eq!(lane_compound("multi-lane"), None);
    }

    #[test]
    fn lane_vocabulary() {
        assert!(is_lane_vocabulary("lanes"));
        assert!(is_lane_vocabulary("4-lane"));
        assert!(is_lane_vocabulary("travel"));
        assert!(!is_lane_vocabulary("plane"));
    }

    #[test]
    fn junction_modifiers() {
        assert!(is_main_modifier("main"));
        assert!(is_main_modifier("main-road"));
        assert!(!is_main_modifier("mainly"));
        assert!(is_terminating_modifier("crossing"));
        assert!(is_terminating_modifier("ends"));
        assert!(!is_terminating_modifier("main"));
    }
}
