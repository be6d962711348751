use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{AnchorScale, Encounter};
use crate::error::TimelineResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterMarker {
    pub time: DateTime<Utc>,
    pub label: String,
    pub x: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterTrack {
    pub markers: Vec<EncounterMarker>,
    pub height: f64,
}

/// Places one marker per encounter, in chronological order.
pub fn layout_encounters(
    encounters: &[Encounter],
    scale: &AnchorScale,
    height: f64,
) -> TimelineResult<EncounterTrack> {
    let mut ordered: Vec<&Encounter> = encounters.iter().collect();
    ordered.sort_by_key(|encounter| encounter.time);

    let mut markers = Vec::with_capacity(ordered.len());
    for encounter in ordered {
        markers.push(EncounterMarker {
            time: encounter.time,
            label: encounter.label.clone(),
            x: scale.map(encounter.time)?,
        });
    }

    trace!(markers = markers.len(), "laid out encounters");
    Ok(EncounterTrack { markers, height })
}
