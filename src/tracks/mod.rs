//! Per-track layout descriptors.
//!
//! Tracks consume the shared `AnchorScale` plus the core domain and lane
//! algorithms and describe where each item goes. They never draw anything;
//! `api::frame_builder` turns them into render primitives.

mod encounters;
mod events;
mod medications;
mod values;

use serde::{Deserialize, Serialize};

pub use encounters::{EncounterMarker, EncounterTrack, layout_encounters};
pub use events::{CardGeometry, EventTrack, layout_events};
pub use medications::{
    IntervalGeometry, MedicationBar, MedicationGroup, MedicationTrack, layout_medications,
};
pub use values::{ChartPoint, ValueChart, ValueTrack, layout_value_chart, layout_value_track};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackKind {
    Encounters,
    Medications,
    Labs,
    RiskScores,
    Events,
}

/// Layout of a whole patient timeline. A `None` track failed and is skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineLayout {
    pub width: f64,
    pub encounters: Option<EncounterTrack>,
    pub medications: Option<MedicationTrack>,
    pub labs: ValueTrack,
    pub risk_scores: ValueTrack,
    pub events: Option<EventTrack>,
    pub skipped_tracks: Vec<TrackKind>,
}
