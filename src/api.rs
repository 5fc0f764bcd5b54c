use crate::dependency::{DependencyParser, Edge, parse_paragraph};
use crate::engine::{self, AnalysisMetrics, IntersectionKind, ParagraphCues, ParkingChanges, PassTimer, CueMask};
use crate::error::{AnalyzerError, Result};
use crate::model::{Scenario, Street, Vehicle};
use crate::ontology::Ontology;
use crate::rules::vocabulary::split_sentences;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Tunables for the analysis passes.
///
/// Every search depth counts hops in the dependency graph. The defaults are
/// the values the heuristics were calibrated with; JSON documents may set any
/// subset of the fields.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// Search depth around a direction word.
    pub direction_depth: usize,
    /// Search depth around a road word when classifying its junction role.
    pub junction_depth: usize,
    /// Search depth around a "lane" word when looking for its numeral.
    pub lane_depth: usize,
    /// Search depth around "park*".
    pub parking_depth: usize,
    /// Search depth around "side" when looking for line evidence.
    pub side_depth: usize,
    /// Search depth around the line word when looking for cars.
    pub line_depth: usize,
    /// The road-type fallback never grows the scenario past this many streets.
    pub max_fallback_streets: usize,
    /// Words matching this pattern name a specific vehicle ("v1", "vehicle2").
    pub vehicle_id_pattern: String,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            direction_depth: 6,
            junction_depth: 2,
            lane_depth: 1,
            parking_depth: 5,
            side_depth: 1,
            line_depth: 2,
            max_fallback_streets: 2,
            vehicle_id_pattern: r"^(?:vehicle|v)\d+$".to_string(),
        }
    }
}

impl Options {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|source| AnalyzerError::Document { what: "options", source })
    }

    fn validate(&self) -> Result<()> {
        let depths = [
            ("direction_depth", self.direction_depth),
            ("junction_depth", self.junction_depth),
            ("lane_depth", self.lane_depth),
            ("parking_depth", self.parking_depth),
            ("side_depth", self.side_depth),
            ("line_depth", self.line_depth),
        ];
        if let Some((name, _)) = depths.iter().find(|(_, depth)| *depth == 0) {
            return Err(AnalyzerError::InvalidOption(format!("{name} must be at least 1")));
        }
        Ok(())
    }
}

/// Everything [`RoadAnalyzer::analyze_paragraph`] found out about one paragraph.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub intersection: IntersectionKind,
    /// Whether direction assignment left every street with a direction.
    pub directions_complete: bool,
    pub streets: Vec<Street>,
    pub vehicles: Vec<Vehicle>,
    pub metrics: AnalysisMetrics,
}

/// The road-network extraction engine.
///
/// Holds the ontology and options; all scenario state lives in the
/// [`Scenario`] passed to each call, so one analyzer can serve any number of
/// scenarios.
///
/// # Example
/// ```
/// use roadlex::{Concept, ConceptTable, PreparsedParser, RoadAnalyzer, Scenario};
///
/// let ontology: ConceptTable = [
///     Concept::new("north", "direction"),
///     Concept::new("road", "road_type"),
/// ]
/// .into_iter()
/// .collect();
///
/// let mut parser = PreparsedParser::new();
/// parser.insert("The road runs north", ["det(road-2, The-1)", "nsubj(runs-3, road-2)", "advmod(runs-3, north-4)"]);
///
/// let analyzer = RoadAnalyzer::new(ontology).unwrap();
/// let mut scenario = Scenario::new();
/// let report = analyzer.analyze_paragraph("The road runs north.", &parser, &mut scenario);
///
/// assert!(report.directions_complete);
/// assert_eq!(scenario.streets()[0].property("road_navigation"), "N");
/// ```
#[derive(Debug, Clone)]
pub struct RoadAnalyzer<O> {
    ontology: O,
    options: Options,
    vehicle_id: Regex,
}

impl<O: Ontology> RoadAnalyzer<O> {
    pub fn new(ontology: O) -> Result<Self> {
        Self::with_options(ontology, Options::default())
    }

    pub fn with_options(ontology: O, options: Options) -> Result<Self> {
        options.validate()?;
        let vehicle_id = Regex::new(&options.vehicle_id_pattern)
            .map_err(|err| AnalyzerError::InvalidOption(format!("vehicle_id_pattern: {err}")))?;
        Ok(RoadAnalyzer { ontology, options, vehicle_id })
    }

    pub fn ontology(&self) -> &O {
        &self.ontology
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Which junction layout, if any, the paragraph names.
    pub fn detect_intersection_kind(&self, paragraph: &str) -> IntersectionKind {
        ParagraphCues::scan(paragraph).intersection
    }

    /// Create the streets of a junction. Returns how many were created.
    pub fn create_junction_streets(&self, kind: IntersectionKind, scenario: &mut Scenario) -> usize {
        engine::create_junction_streets(kind, scenario)
    }

    /// Parse each sentence of `paragraph` and assign directions, road types,
    /// junction roles and lane counts.
    ///
    /// Returns whether every street now has a direction.
    pub fn assign_directions<P: DependencyParser>(
        &self,
        kind: IntersectionKind,
        paragraph: &str,
        parser: &P,
        scenario: &mut Scenario,
    ) -> bool {
        let (sentences, _) = parse_paragraph(paragraph, parser);
        engine::assign_directions(kind, &sentences, &self.ontology, &self.options, scenario)
    }

    /// Create streets from road-type words alone. Returns how many were created.
    pub fn assign_road_types_fallback(&self, paragraph: &str, scenario: &mut Scenario) -> usize {
        engine::assign_road_types_fallback(paragraph, &self.ontology, self.options.max_fallback_streets, scenario)
    }

    /// Apply parking evidence from one sentence's `edges`.
    ///
    /// Does nothing unless `paragraph` mentions parking at all.
    pub fn extract_parking_config(&self, edges: &[Edge], paragraph: &str, scenario: &mut Scenario) -> ParkingChanges {
        if !ParagraphCues::scan(paragraph).has(CueMask::PARK) {
            return ParkingChanges::default();
        }
        engine::extract_parking_config(edges, &self.ontology, &self.options, &self.vehicle_id, scenario)
    }

    pub fn extract_lane_count(&self, edges: &[Edge]) -> u32 {
        engine::extract_lane_count(edges, self.options.lane_depth)
    }

    /// Run every pass over `paragraph` in order: junction streets, directions,
    /// road-type fallback, parking.
    ///
    /// Each sentence is parsed once. Sentences the parser rejects are skipped
    /// and counted in the metrics.
    pub fn analyze_paragraph<P: DependencyParser>(&self, paragraph: &str, parser: &P, scenario: &mut Scenario) -> AnalysisReport {
        let started = Instant::now();
        let mut metrics = AnalysisMetrics::default();
        let cues = ParagraphCues::scan(paragraph);
        let kind = cues.intersection;

        let span = tracing::debug_span!("analyze_paragraph", %kind, cues = ?cues.cues);
        let _enter = span.enter();

        if cues.has(CueMask::INTERSECTION) && scenario.len() < 2 {
            metrics.junction_streets = engine::create_junction_streets(kind, scenario);
        }

        let (sentences, skipped) = parse_paragraph(paragraph, parser);

        let directions_complete = if cues.cues.intersects(CueMask::DIRECTIONAL | CueMask::LANE) {
            let timer = PassTimer::start(scenario.len());
            let complete = engine::assign_directions(kind, &sentences, &self.ontology, &self.options, scenario);
            metrics.direction.sentences = sentences.len();
            metrics.direction.skipped = skipped;
            timer.finish(&mut metrics.direction, scenario.len());
            complete
        } else {
            tracing::debug!("no direction or lane words, direction pass skipped");
            engine::all_streets_have_direction(scenario)
        };

        if scenario.is_empty() || (cues.has(CueMask::INTERSECTION) && scenario.len() < 2) {
            let timer = PassTimer::start(scenario.len());
            self.assign_road_types_fallback(paragraph, scenario);
            metrics.fallback.sentences = split_sentences(paragraph).count();
            timer.finish(&mut metrics.fallback, scenario.len());
        }

        if cues.has(CueMask::PARK) {
            let timer = PassTimer::start(scenario.len());
            for sentence in &sentences {
                engine::extract_parking_config(&sentence.edges, &self.ontology, &self.options, &self.vehicle_id, scenario);
            }
            metrics.parking.sentences = sentences.len();
            metrics.parking.skipped = skipped;
            timer.finish(&mut metrics.parking, scenario.len());
        }

        metrics.total = started.elapsed();
        tracing::debug!(streets = scenario.len(), directions_complete, "paragraph analyzed");

        AnalysisReport {
            intersection: kind,
            directions_complete,
            streets: scenario.streets().to_vec(),
            vehicles: scenario.vehicles().to_vec(),
            metrics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependency::{PreparsedParser, parse_relations};
    use crate::model::{Cardinal, JunctionRole, ParkLineSide};
    use crate::ontology::{CATEGORY_DIRECTION, CATEGORY_ROAD_TYPE, Concept, ConceptTable, PROP_ENDS_AT_JUNCTION};

    fn analyzer() -> RoadAnalyzer<ConceptTable> {
        let ontology = [
            Concept::new("north", CATEGORY_DIRECTION),
            Concept::new("south", CATEGORY_DIRECTION),
            Concept::new("east", CATEGORY_DIRECTION),
            Concept::new("west", CATEGORY_DIRECTION),
            Concept::new("road", CATEGORY_ROAD_TYPE),
            Concept::new("street", CATEGORY_ROAD_TYPE),
            Concept::new("highway", CATEGORY_ROAD_TYPE),
            Concept::new("alley", CATEGORY_ROAD_TYPE).with_property(PROP_ENDS_AT_JUNCTION, "1"),
        ]
        .into_iter()
        .collect();
        RoadAnalyzer::new(ontology).unwrap()
    }

    fn parser() -> PreparsedParser {
        let mut parser = PreparsedParser::new();
        parser.insert(
            "There is a road going north",
            ["expl(is-2, There-1)", "det(road-4, a-3)", "nsubj(is-2, road-4)", "acl(road-4, going-5)", "advmod(going-5, north-6)"],
        );
        parser.insert(
            "The car was on a 2-lane southbound road",
            [
                "det(car-2, The-1)",
                "nsubj(road-8, car-2)",
                "cop(road-8, was-3)",
                "case(road-8, on-4)",
                "det(road-8, a-5)",
                "amod(road-8, 2-lane-6)",
                "amod(road-8, southbound-7)",
            ],
        );
        parser.insert(
            "Main Street runs north into a T-junction",
            [
                "compound(Street-2, Main-1)",
                "nsubj(runs-3, Street-2)",
                "advmod(runs-3, north-4)",
                "case(T-junction-7, into-5)",
                "det(T-junction-7, a-6)",
                "nmod:into(runs-3, T-junction-7)",
            ],
        );
        parser.insert("The alley goes east", ["det(alley-2, The-1)", "nsubj(goes-3, alley-2)", "advmod(goes-3, east-4)"]);
        parser.insert(
            "A car was parked in the second lane of the highway",
            [
                "det(car-2, A-1)",
                "nsubjpass(parked-4, car-2)",
                "auxpass(parked-4, was-3)",
                "case(lane-8, in-5)",
                "det(lane-8, the-6)",
                "amod(lane-8, second-7)",
                "nmod:in(parked-4, lane-8)",
                "case(highway-11, of-9)",
                "det(highway-11, the-10)",
                "nmod:of(lane-8, highway-11)",
            ],
        );
        parser.insert(
            "Both sides of the highway were lined with cars",
            [
                "det(sides-2, Both-1)",
                "case(highway-5, of-3)",
                "det(highway-5, the-4)",
                "nmod:of(sides-2, highway-5)",
                "auxpass(lined-7, were-6)",
                "nsubjpass(lined-7, sides-2)",
                "case(cars-9, with-8)",
                "nmod:with(lined-7, cars-9)",
            ],
        );
        parser
    }

    #[test]
    fn analyze_merges_opposite_headings() {
        let mut scenario = Scenario::new();
        let report = analyzer().analyze_paragraph(
            "There is a road going north. The car was on a 2-lane southbound road.",
            &parser(),
            &mut scenario,
        );

        assert_eq!(report.intersection, IntersectionKind::None);
        assert!(report.directions_complete);
        assert_eq!(report.streets.len(), 1);
        assert_eq!(report.streets[0].navigation, Some(Cardinal::North));
        assert_eq!(report.streets[0].lane_count, Some(2));

        let m = &report.metrics;
        assert!(m.direction.ran);
        assert_eq!(m.direction.sentences, 2);
        assert_eq!(m.direction.streets_created, 1);
        assert!(!m.fallback.ran);
        assert!(!m.parking.ran);
        assert!(m.total >= m.direction.duration);
    }

    #[test]
    fn analyze_t_junction() {
        let mut scenario = Scenario::new();
        let report = analyzer().analyze_paragraph(
            "Main Street runs north into a T-junction. The alley goes east.",
            &parser(),
            &mut scenario,
        );

        assert_eq!(report.intersection, IntersectionKind::TIntersection);
        assert_eq!(report.metrics.junction_streets, 2);
        assert_eq!(report.metrics.direction.streets_created, 0);
        assert!(report.directions_complete);

        let main = &scenario.streets()[0];
        assert_eq!(main.property("road_navigation"), "N");
        assert_eq!(main.property("is_single_road_piece"), "F");
        let alley = &scenario.streets()[1];
        assert_eq!(alley.property("road_navigation"), "E");
        assert_eq!(alley.property("road_type"), "alley");
        assert_eq!(alley.junction_role, Some(JunctionRole::Terminating));
    }

    #[test]
    fn analyze_parking_with_fallback_street() {
        let mut scenario = Scenario::with_vehicles(vec![Vehicle::new("v1")]);
        let report = analyzer().analyze_paragraph(
            "A car was parked in the second lane of the highway. Both sides of the highway were lined with cars.",
            &parser(),
            &mut scenario,
        );

        assert!(!report.directions_complete);
        assert!(report.metrics.fallback.ran);
        assert_eq!(report.metrics.fallback.streets_created, 1);
        assert!(report.metrics.parking.ran);

        let highway = &report.streets[0];
        assert_eq!(highway.road_type.as_deref(), Some("highway"));
        assert_eq!(highway.park_line_filled, Some(true));
        assert_eq!(highway.park_line_side, Some(ParkLineSide::Both));
        assert_eq!(highway.property("road_park_line"), "3");

        assert!(report.vehicles[0].on_roadway);
        assert_eq!(report.vehicles[0].travel_lane, Some(2));
    }

    #[test]
    fn direction_pass_needs_direction_or_lane_words() {
        let mut scenario = Scenario::new();
        let report = analyzer().analyze_paragraph("The highway was wet.", &parser(), &mut scenario);

        assert!(!report.metrics.direction.ran);
        assert!(report.metrics.fallback.ran);
        assert!(!report.directions_complete);
        assert_eq!(scenario.len(), 1);
        assert_eq!(scenario.streets()[0].road_type.as_deref(), Some("highway"));
    }

    #[test]
    fn unparsed_sentences_are_counted() {
        let mut scenario = Scenario::new();
        let report = analyzer().analyze_paragraph("There is a road going north. Nobody captured this sentence.", &parser(), &mut scenario);

        assert_eq!(report.metrics.direction.sentences, 1);
        assert_eq!(report.metrics.direction.skipped, 1);
        assert_eq!(scenario.len(), 1);
    }

    #[test]
    fn second_analysis_is_stable() {
        let paragraph = "Main Street runs north into a T-junction. The alley goes east.";
        let analyzer = analyzer();
        let mut scenario = Scenario::new();
        analyzer.analyze_paragraph(paragraph, &parser(), &mut scenario);
        let first = scenario.streets().to_vec();

        let report = analyzer.analyze_paragraph(paragraph, &parser(), &mut scenario);
        assert_eq!(report.metrics.junction_streets, 0);
        assert_eq!(scenario.streets(), first.as_slice());
    }

    #[test]
    fn parking_is_gated_on_paragraph() {
        let analyzer = analyzer();
        let mut scenario = Scenario::with_vehicles(vec![Vehicle::new("v1")]);
        scenario.create_street();
        let edges = parse_relations(["nsubjpass(lined-7, sides-2)", "nmod:of(sides-2, road-5)", "nmod:with(lined-7, cars-9)"]);

        let changes = analyzer.extract_parking_config(&edges, "Both sides of the road were lined with cars.", &mut scenario);
        assert_eq!(changes, ParkingChanges::default());
        assert_eq!(scenario.streets()[0].park_line_filled, None);

        let changes = analyzer.extract_parking_config(&edges, "Cars were parked. Both sides of the road were lined with cars.", &mut scenario);
        assert_eq!(changes.streets_marked, 1);
    }

    #[test]
    fn lane_count_and_intersection_shortcuts() {
        let analyzer = analyzer();
        assert_eq!(analyzer.extract_lane_count(&parse_relations(["amod(road-5, 3-lane-4)"])), 3);
        assert_eq!(analyzer.detect_intersection_kind("They met at the intersection."), IntersectionKind::Intersection);
    }

    #[test]
    fn options_from_json_and_validation() {
        let options = Options::from_json(r#"{"direction_depth": 4, "max_fallback_streets": 3}"#).unwrap();
        assert_eq!(options.direction_depth, 4);
        assert_eq!(options.max_fallback_streets, 3);
        assert_eq!(options.lane_depth, 1);

        assert!(matches!(Options::from_json(r#"{"depth": 4}"#), Err(AnalyzerError::Document { .. })));

        let zero = Options { side_depth: 0, ..Options::default() };
        assert!(matches!(RoadAnalyzer::with_options(ConceptTable::new(), zero), Err(AnalyzerError::InvalidOption(_))));

        let bad_pattern = Options { vehicle_id_pattern: "(".to_string(), ..Options::default() };
        assert!(matches!(RoadAnalyzer::with_options(ConceptTable::new(), bad_pattern), Err(AnalyzerError::InvalidOption(_))));
    }
}
