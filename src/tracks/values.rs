use chrono::{DateTime, Utc};
#[cfg(feature = "parallel-layout")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::core::{AnchorScale, BandSegment, BandZone, Series, SeriesDomain};
use crate::error::TimelineResult;

/// One projected sample of a value chart. `y` is relative to the chart top.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub time: DateTime<Utc>,
    pub value: f64,
    pub x: f64,
    pub y: f64,
    pub zone: BandZone,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueChart {
    pub name: String,
    pub unit: Option<String>,
    pub domain: SeriesDomain,
    pub points: Vec<ChartPoint>,
    pub segments: SmallVec<[BandSegment; 3]>,
    pub height: f64,
}

/// Stack of value charts sharing one track (all labs, or all risk scores).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValueTrack {
    pub charts: Vec<ValueChart>,
    /// Names of series whose layout failed; they are drawn as nothing.
    pub skipped: Vec<String>,
    pub height: f64,
}

/// Projects one series. Empty series produce no chart.
pub fn layout_value_chart(
    series: &Series,
    scale: &AnchorScale,
    chart_height: f64,
) -> TimelineResult<Option<ValueChart>> {
    if series.is_empty() {
        return Ok(None);
    }

    let domain = SeriesDomain::compute(&series.samples, series.band)?;
    let value_scale = domain.value_scale(chart_height)?;

    let mut samples = series.samples.clone();
    samples.sort_by_key(|sample| sample.time);

    let mut points = Vec::with_capacity(samples.len());
    for sample in samples {
        points.push(ChartPoint {
            time: sample.time,
            value: sample.value,
            x: scale.map(sample.time)?,
            y: value_scale.domain_to_pixel(sample.value)?,
            zone: domain.zone_of(sample.value),
        });
    }

    Ok(Some(ValueChart {
        name: series.name.clone(),
        unit: series.unit.clone(),
        segments: domain.segments(),
        domain,
        points,
        height: chart_height,
    }))
}

/// Lays out every series of a track, skipping the ones that fail.
pub fn layout_value_track(
    series: &[Series],
    scale: &AnchorScale,
    chart_height: f64,
    chart_gap: f64,
) -> ValueTrack {
    #[cfg(feature = "parallel-layout")]
    let results: Vec<_> = series
        .par_iter()
        .map(|item| layout_value_chart(item, scale, chart_height))
        .collect();
    #[cfg(not(feature = "parallel-layout"))]
    let results: Vec<_> = series
        .iter()
        .map(|item| layout_value_chart(item, scale, chart_height))
        .collect();

    let mut track = ValueTrack::default();
    for (item, result) in series.iter().zip(results) {
        match result {
            Ok(Some(chart)) => track.charts.push(chart),
            Ok(None) => debug!(series = %item.name, "empty series has no chart"),
            Err(err) => {
                warn!(series = %item.name, error = %err, "skipping value chart");
                track.skipped.push(item.name.clone());
            }
        }
    }

    let count = track.charts.len();
    track.height =
        count as f64 * chart_height + count.saturating_sub(1) as f64 * chart_gap;
    track
}
