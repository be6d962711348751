use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{
    AnchorScale, PlacedCluster, PointEvent, cluster_events, lane_count, place_clusters,
};
use crate::error::TimelineResult;

/// Fixed-size card geometry used to stack event clusters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CardGeometry {
    pub half_width: f64,
    pub gap: f64,
    pub row_height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventTrack {
    pub placed: Vec<PlacedCluster>,
    pub lane_count: usize,
    pub row_height: f64,
    /// `lane_count * row_height`; zero when there are no events.
    pub height: f64,
}

impl EventTrack {
    #[must_use]
    pub fn card_top(&self, row: usize) -> f64 {
        row as f64 * self.row_height
    }
}

/// Clusters events per day and stacks the cards into non-overlapping rows.
pub fn layout_events(
    events: &[PointEvent],
    scale: &AnchorScale,
    geometry: CardGeometry,
) -> TimelineResult<EventTrack> {
    let clusters = cluster_events(events, scale)?;
    let placed = place_clusters(clusters, geometry.half_width, geometry.gap)?;
    let rows: Vec<usize> = placed.iter().map(|placed| placed.row).collect();
    let lanes = lane_count(&rows);

    debug!(
        events = events.len(),
        cards = placed.len(),
        lanes,
        "laid out event cards"
    );
    Ok(EventTrack {
        placed,
        lane_count: lanes,
        row_height: geometry.row_height,
        height: lanes as f64 * geometry.row_height,
    })
}
