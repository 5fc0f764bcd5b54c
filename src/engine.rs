//! Road-network extraction engine.
//!
//! This module is the *public entry point* for the analysis passes. Each pass
//! lives in a focused submodule under `src/engine/`; they all share one
//! retrieval primitive (bounded graph search) and mutate one [`Scenario`].
//!
//! ## How the parts work together
//!
//! ```text
//! paragraph ── ParagraphCues::scan ──┬─ intersection kind ── create_junction_streets
//!              (trigger.rs)          │                        (junction.rs)
//!                                    │
//! sentences ── DependencyParser ─────┼─ assign_directions     (direction.rs)
//!              (once per sentence)   │    - connected(..)      (search.rs)
//!                                    │    - classify role      (junction.rs)
//!                                    │    - lane count         (lanes.rs)
//!                                    │
//! raw words ─────────────────────────┼─ road-type fallback    (road_type.rs)
//!                                    │    only if too few streets
//!                                    │
//!                        PARK cue? ──┴─ extract_parking_config (parking.rs)
//!                                           per sentence
//! ```
//!
//! Passes never remove streets and never overwrite a decided attribute with
//! an incompatible one: later evidence fills unset slots, and parking sides
//! escalate left + right to both.
//!
//! ## Responsibilities by module
//!
//! - `search.rs`: bounded, undirected breadth-first search over one
//!   sentence's edges. Every other pass asks its questions through it.
//! - `trigger.rs`: scans raw text for coarse cues (`CueMask`) and the
//!   intersection kind.
//! - `direction.rs`: maps direction words to streets, deduplicating by axis.
//! - `junction.rs`: junction-role classification and junction street creation.
//! - `lanes.rs`: lane counts and the travelling-lane heuristic.
//! - `road_type.rs`: parser-free street creation from road vocabulary.
//! - `parking.rs`: parked vehicles and parking lines.
//! - `metrics.rs`: per-pass timing and counters for `AnalysisReport`.
//!
//! ## Public surface
//!
//! Most code drives the engine via [`crate::RoadAnalyzer`]. The free
//! functions re-exported here take the ontology and [`crate::Options`]
//! explicitly and are useful for testing a single pass.
//!
//! ## Debugging
//!
//! Every pass emits `tracing` events at `debug` level. With the CLI, run with
//! `RUST_LOG=roadlex=debug` to see connection lists and each assignment.
//!
//! [`Scenario`]: crate::Scenario

#[path = "engine/direction.rs"]
mod direction;
#[path = "engine/junction.rs"]
mod junction;
#[path = "engine/lanes.rs"]
mod lanes;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/parking.rs"]
mod parking;
#[path = "engine/road_type.rs"]
mod road_type;
#[path = "engine/search.rs"]
mod search;
#[path = "engine/trigger.rs"]
mod trigger;


pub use direction::{all_streets_have_direction, assign_directions};
pub use junction::{JunctionOutcome, apply_junction_outcome, classify_junction_role, create_junction_streets};
pub use lanes::{detect_travel_lane, extract_lane_count};
pub use metrics::{AnalysisMetrics, PassMetrics};
pub(crate) use metrics::PassTimer;
pub use parking::{ParkingChanges, extract_parking_config, resolve_parked_street};
pub use road_type::assign_road_types_fallback;
pub use search::{Connection, Connections, SearchQuery, StartWord, connected};
pub use trigger::{CueMask, IntersectionKind, ParagraphCues};
