use chrono::{DateTime, NaiveDate, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::core::anchor_scale::AnchorScale;
use crate::core::lanes::{LaneItem, assign_lanes};
use crate::core::primitives::calendar_date;
use crate::core::types::PointEvent;
use crate::error::TimelineResult;

/// Point events that fall on the same UTC calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventCluster {
    pub date: NaiveDate,
    /// Instant of the first member in input order, not the earliest one.
    pub representative: DateTime<Utc>,
    pub events: SmallVec<[PointEvent; 2]>,
    pub position: f64,
}

impl EventCluster {
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// An event cluster with the row it was packed into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedCluster {
    pub cluster: EventCluster,
    pub row: usize,
    pub left: f64,
    pub right: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventClusterer;

impl EventClusterer {
    pub fn cluster(
        self,
        events: &[PointEvent],
        scale: &AnchorScale,
    ) -> TimelineResult<Vec<EventCluster>> {
        cluster_events(events, scale)
    }
}

/// Groups events by UTC calendar date and maps each group onto the axis.
///
/// The result is sorted ascending by representative instant; groups with equal
/// representatives keep first-seen order.
pub fn cluster_events(
    events: &[PointEvent],
    scale: &AnchorScale,
) -> TimelineResult<Vec<EventCluster>> {
    let mut groups = IndexMap::<NaiveDate, SmallVec<[PointEvent; 2]>>::new();
    for event in events {
        groups
            .entry(calendar_date(event.time))
            .or_default()
            .push(event.clone());
    }

    let mut clusters = Vec::with_capacity(groups.len());
    for (date, members) in groups {
        let representative = members[0].time;
        clusters.push(EventCluster {
            date,
            representative,
            position: scale.map(representative)?,
            events: members,
        });
    }
    clusters.sort_by_key(|cluster| cluster.representative);

    debug!(
        events = events.len(),
        clusters = clusters.len(),
        "clustered point events"
    );
    Ok(clusters)
}

/// Packs clusters into rows as fixed-width cards.
///
/// Expects the output of [`cluster_events`], whose positions are already in
/// ascending order because the scale is monotonic.
pub fn place_clusters(
    clusters: Vec<EventCluster>,
    card_half_width: f64,
    card_gap: f64,
) -> TimelineResult<Vec<PlacedCluster>> {
    let items: Vec<LaneItem> = clusters
        .iter()
        .map(|cluster| LaneItem::new(cluster.position, card_half_width))
        .collect();
    let rows = assign_lanes(&items, card_gap)?;

    Ok(clusters
        .into_iter()
        .zip(items)
        .zip(rows)
        .map(|((cluster, item), row)| PlacedCluster {
            cluster,
            row,
            left: item.left(),
            right: item.right(),
        })
        .collect())
}
