use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{AnchorScale, IntervalItem, assign_span_lanes, lane_count};
use crate::error::TimelineResult;

/// Row and bar heights of an interval track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntervalGeometry {
    pub row_height: f64,
    pub bar_height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicationBar {
    pub label: String,
    pub group_key: String,
    pub start: DateTime<Utc>,
    /// Layout end; equals the track's `as_of` instant when `open_ended`.
    pub end: DateTime<Utc>,
    pub open_ended: bool,
    pub x_start: f64,
    pub x_end: f64,
    /// Track-wide row index.
    pub row: usize,
    /// Sub-row inside the bar's group; non-zero only for overlapping courses.
    pub lane: usize,
    pub y: f64,
    pub height: f64,
}

impl MedicationBar {
    #[must_use]
    pub fn width(&self) -> f64 {
        self.x_end - self.x_start
    }
}

/// Rows owned by one group key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicationGroup {
    pub key: String,
    pub first_row: usize,
    pub row_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicationTrack {
    pub bars: Vec<MedicationBar>,
    /// Groups in row order.
    pub groups: Vec<MedicationGroup>,
    pub row_count: usize,
    pub height: f64,
}

/// Lays out interval items grouped by key.
///
/// Groups follow the order in which they first start. Inside a group, bars
/// that overlap in time are packed first-fit into extra sub-rows, so no two
/// bars of one row overlap. Open intervals run to `as_of`; the core never
/// reads the wall clock itself.
pub fn layout_medications(
    items: &[IntervalItem],
    scale: &AnchorScale,
    as_of: DateTime<Utc>,
    geometry: IntervalGeometry,
) -> TimelineResult<MedicationTrack> {
    let mut ordered: Vec<&IntervalItem> = items.iter().collect();
    ordered.sort_by_key(|item| item.start);

    let mut bars = Vec::with_capacity(ordered.len());
    let mut members = IndexMap::<&str, Vec<usize>>::new();
    for item in ordered {
        let end = item.resolved_end(as_of)?;
        members
            .entry(item.group_key.as_str())
            .or_default()
            .push(bars.len());
        bars.push(MedicationBar {
            label: item.label.clone(),
            group_key: item.group_key.clone(),
            start: item.start,
            end,
            open_ended: item.is_open(),
            x_start: scale.map(item.start)?,
            x_end: scale.map(end)?,
            row: 0,
            lane: 0,
            y: 0.0,
            height: geometry.bar_height,
        });
    }

    let inset = (geometry.row_height - geometry.bar_height) * 0.5;
    let mut groups = Vec::with_capacity(members.len());
    let mut next_row = 0;
    for (key, indices) in members {
        let spans: Vec<(f64, f64)> = indices
            .iter()
            .map(|&index| (bars[index].x_start, bars[index].x_end))
            .collect();
        let lanes = assign_span_lanes(&spans, 0.0)?;
        let row_count = lane_count(&lanes);

        for (&index, lane) in indices.iter().zip(lanes) {
            let bar = &mut bars[index];
            bar.lane = lane;
            bar.row = next_row + lane;
            bar.y = bar.row as f64 * geometry.row_height + inset;
        }
        groups.push(MedicationGroup {
            key: key.to_owned(),
            first_row: next_row,
            row_count,
        });
        next_row += row_count;
    }

    trace!(
        bars = bars.len(),
        groups = groups.len(),
        rows = next_row,
        "laid out medications"
    );
    Ok(MedicationTrack {
        bars,
        groups,
        row_count: next_row,
        height: next_row as f64 * geometry.row_height,
    })
}
