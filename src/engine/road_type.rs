//! Road-type fallback: create streets from bare road vocabulary.
//!
//! Runs without the parser. Used when direction assignment found too few
//! roads, e.g. "A car hit a pole on the highway." has no direction word but
//! still describes one street.

use crate::model::Scenario;
use crate::ontology::Ontology;
use crate::rules::vocabulary::{split_sentences, words};

/// Scan `paragraph` word by word and create streets for road-type words.
///
/// A road type that some street already carries is skipped, and no street is
/// created once the scenario holds `max_streets`. Returns the number created.
pub fn assign_road_types_fallback<O: Ontology>(paragraph: &str, ontology: &O, max_streets: usize, scenario: &mut Scenario) -> usize {
    let before = scenario.len();

    for word in split_sentences(paragraph).flat_map(words) {
        if !ontology.is_road_type(&word) {
            continue;
        }
        if scenario.streets().iter().any(|s| s.road_type.as_deref() == Some(word.as_str())) {
            continue;
        }
        if !scenario.is_empty() && scenario.len() >= max_streets {
            continue;
        }

        let id = scenario.create_street();
        tracing::debug!(road_type = %word, street = id.index(), "created street from road-type word");
        scenario[id].road_type = Some(word);
    }

    scenario.len() - before
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ontology::{CATEGORY_DIRECTION, CATEGORY_ROAD_TYPE, Concept, ConceptTable};

    fn ontology() -> ConceptTable {
        [
            Concept::new("road", CATEGORY_ROAD_TYPE),
            Concept::new("highway", CATEGORY_ROAD_TYPE),
            Concept::new("alley", CATEGORY_ROAD_TYPE),
            Concept::new("north", CATEGORY_DIRECTION),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn creates_street_per_distinct_road_type() {
        let mut scenario = Scenario::new();
        let created = assign_road_types_fallback("A car left the highway. It entered the road.", &ontology(), 2, &mut scenario);

        assert_eq!(created, 2);
        assert_eq!(scenario.streets()[0].road_type.as_deref(), Some("highway"));
        assert_eq!(scenario.streets()[1].road_type.as_deref(), Some("road"));
    }

    #[test]
    fn duplicate_types_are_skipped() {
        let mut scenario = Scenario::new();
        assign_road_types_fallback("The road was wet. The road curved.", &ontology(), 2, &mut scenario);
        assert_eq!(scenario.len(), 1);
    }

    #[test]
    fn never_exceeds_cap() {
        let mut scenario = Scenario::new();
        assign_road_types_fallback("A road, a highway and an alley.", &ontology(), 2, &mut scenario);
        assert_eq!(scenario.len(), 2);

        // Already at the cap: nothing more, even for a new type.
        assert_eq!(assign_road_types_fallback("Then an alley.", &ontology(), 2, &mut scenario), 0);
    }

    #[test]
    fn untyped_street_counts_toward_cap() {
        let mut scenario = Scenario::new();
        scenario.create_street();
        scenario.create_street();
        assert_eq!(assign_road_types_fallback("The highway.", &ontology(), 2, &mut scenario), 0);
    }

    #[test]
    fn non_road_words_do_nothing() {
        let mut scenario = Scenario::new();
        assert_eq!(assign_road_types_fallback("Heading north quickly.", &ontology(), 2, &mut scenario), 0);
        assert!(scenario.is_empty());
    }
}
