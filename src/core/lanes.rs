use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{TimelineError, TimelineResult};

/// Fixed-width item centered on a mapped horizontal position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaneItem {
    pub position: f64,
    pub half_width: f64,
}

impl LaneItem {
    #[must_use]
    pub fn new(position: f64, half_width: f64) -> Self {
        Self {
            position,
            half_width,
        }
    }

    #[must_use]
    pub fn left(self) -> f64 {
        self.position - self.half_width
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.position + self.half_width
    }
}

/// First-fit row packer for items sorted by position.
///
/// For equal-width items the row count equals the largest set of mutually
/// overlapping footprints. Row state lives only for the duration of one call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LaneAssigner;

impl LaneAssigner {
    pub fn assign(self, items: &[LaneItem], min_gap: f64) -> TimelineResult<Vec<usize>> {
        assign_lanes(items, min_gap)
    }
}

/// Assigns a 0-based row to each item.
///
/// `items` must already be sorted ascending by `position`; unsorted input is
/// an error. Two items share a row only when the later one's left edge is at
/// least `min_gap` past the earlier one's right edge.
pub fn assign_lanes(items: &[LaneItem], min_gap: f64) -> TimelineResult<Vec<usize>> {
    validate_items(items, min_gap)?;

    let mut right_edges = Vec::<f64>::new();
    let mut rows = Vec::with_capacity(items.len());
    for item in items {
        rows.push(allocate_lane(
            &mut right_edges,
            item.left(),
            item.right(),
            min_gap,
        ));
    }

    trace!(
        items = items.len(),
        lanes = right_edges.len(),
        "assigned lanes"
    );
    Ok(rows)
}

/// Assigns rows to `(left, right)` spans of arbitrary width.
///
/// Spans must be sorted ascending by `left` and satisfy `left <= right`. The
/// same first-fit rule as [`assign_lanes`] applies.
pub fn assign_span_lanes(spans: &[(f64, f64)], min_gap: f64) -> TimelineResult<Vec<usize>> {
    validate_gap(min_gap)?;
    for &(left, right) in spans {
        if !left.is_finite() || !right.is_finite() || right < left {
            return Err(TimelineError::InvalidInput(
                "lane span must be finite with left <= right".to_owned(),
            ));
        }
    }
    if !spans.is_sorted_by_key(|(left, _)| OrderedFloat(*left)) {
        return Err(TimelineError::InvalidInput(
            "lane spans must be sorted by ascending left edge".to_owned(),
        ));
    }

    let mut right_edges = Vec::<f64>::new();
    let rows = spans
        .iter()
        .map(|&(left, right)| allocate_lane(&mut right_edges, left, right, min_gap))
        .collect();
    Ok(rows)
}

/// Number of rows used by an assignment; `0` for an empty one.
#[must_use]
pub fn lane_count(rows: &[usize]) -> usize {
    rows.iter().max().map_or(0, |max| max + 1)
}

/// Stable sort by position, for callers whose items are not in mapped order.
pub fn sort_by_position(items: &mut [LaneItem]) {
    items.sort_by_key(|item| OrderedFloat(item.position));
}

fn allocate_lane(right_edges: &mut Vec<f64>, left: f64, right: f64, min_gap: f64) -> usize {
    for (lane, lane_right) in right_edges.iter_mut().enumerate() {
        if left >= *lane_right + min_gap {
            *lane_right = right;
            return lane;
        }
    }
    right_edges.push(right);
    right_edges.len() - 1
}

fn validate_gap(min_gap: f64) -> TimelineResult<()> {
    if !min_gap.is_finite() || min_gap < 0.0 {
        return Err(TimelineError::InvalidInput(
            "lane gap must be finite and >= 0".to_owned(),
        ));
    }
    Ok(())
}

fn validate_items(items: &[LaneItem], min_gap: f64) -> TimelineResult<()> {
    validate_gap(min_gap)?;

    for item in items {
        if !item.position.is_finite() {
            return Err(TimelineError::InvalidInput(
                "lane item position must be finite".to_owned(),
            ));
        }
        if !item.half_width.is_finite() || item.half_width < 0.0 {
            return Err(TimelineError::InvalidInput(
                "lane item half width must be finite and >= 0".to_owned(),
            ));
        }
    }

    if !items.is_sorted_by_key(|item| OrderedFloat(item.position)) {
        return Err(TimelineError::InvalidInput(
            "lane items must be sorted by ascending position".to_owned(),
        ));
    }
    Ok(())
}
