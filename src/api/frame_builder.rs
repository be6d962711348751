use crate::core::BandSegment;
use crate::error::TimelineResult;
use crate::render::{
    GradientStop, LinePrimitive, PolylinePrimitive, RectPrimitive, TextHAlign, TextPrimitive,
    TimelineFrame,
};
use crate::tracks::{EventTrack, MedicationTrack, TimelineLayout, ValueChart, ValueTrack};

use super::{BandPalette, TimelineConfig};

/// Stacks the laid-out tracks top to bottom and turns them into primitives.
///
/// Empty or skipped tracks take no vertical space.
pub fn build_timeline_frame(
    layout: &TimelineLayout,
    config: &TimelineConfig,
) -> TimelineResult<TimelineFrame> {
    let heights = [
        layout.encounters.as_ref().map_or(0.0, |track| {
            if track.markers.is_empty() {
                0.0
            } else {
                track.height
            }
        }),
        layout.medications.as_ref().map_or(0.0, |track| track.height),
        layout.labs.height,
        layout.risk_scores.height,
        layout.events.as_ref().map_or(0.0, |track| track.height),
    ];
    let visible = heights.iter().filter(|height| **height > 0.0).count();
    let total_height =
        heights.iter().sum::<f64>() + visible.saturating_sub(1) as f64 * config.track_gap_px;

    let mut frame = TimelineFrame::new(config.width, total_height);
    let mut cursor = 0.0;
    let advance = |cursor: &mut f64, height: f64| {
        if height > 0.0 {
            *cursor += height + config.track_gap_px;
        }
    };

    if let Some(track) = &layout.encounters {
        let style = &config.style;
        for marker in &track.markers {
            frame.lines.push(LinePrimitive::vertical(
                marker.x,
                0.0,
                total_height,
                style.encounter_line_width,
                style.encounter_line_color,
            ));
            if !marker.label.is_empty() {
                frame.texts.push(TextPrimitive::new(
                    marker.label.clone(),
                    marker.x,
                    track.height * 0.5,
                    style.label_font_size_px,
                    style.label_color,
                    TextHAlign::Center,
                ));
            }
        }
    }
    advance(&mut cursor, heights[0]);

    if let Some(track) = &layout.medications {
        push_medications(&mut frame, track, cursor, config);
    }
    advance(&mut cursor, heights[1]);

    push_value_track(&mut frame, &layout.labs, cursor, config);
    advance(&mut cursor, heights[2]);

    push_value_track(&mut frame, &layout.risk_scores, cursor, config);
    advance(&mut cursor, heights[3]);

    if let Some(track) = &layout.events {
        push_events(&mut frame, track, cursor, config);
    }

    Ok(frame)
}

/// Hard-edged gradient: each zone keeps one flat color across its slice.
#[must_use]
pub fn band_gradient(segments: &[BandSegment], palette: BandPalette) -> Vec<GradientStop> {
    let mut stops = Vec::with_capacity(segments.len() * 2);
    for segment in segments {
        let color = palette.color_for(segment.zone);
        stops.push(GradientStop::new(segment.start, color));
        stops.push(GradientStop::new(segment.end, color));
    }
    stops
}

fn push_medications(
    frame: &mut TimelineFrame,
    track: &MedicationTrack,
    top: f64,
    config: &TimelineConfig,
) {
    let style = &config.style;
    for bar in &track.bars {
        let fill = if bar.open_ended {
            style.ongoing_medication_bar_color
        } else {
            style.medication_bar_color
        };
        frame.rects.push(RectPrimitive::new(
            bar.x_start,
            top + bar.y,
            bar.width(),
            bar.height,
            fill,
        ));
        if !bar.label.is_empty() {
            frame.texts.push(TextPrimitive::new(
                bar.label.clone(),
                bar.x_start,
                top + bar.y + bar.height * 0.5,
                style.label_font_size_px,
                style.label_color,
                TextHAlign::Left,
            ));
        }
    }
}

fn push_value_track(
    frame: &mut TimelineFrame,
    track: &ValueTrack,
    top: f64,
    config: &TimelineConfig,
) {
    let mut chart_top = top;
    for chart in &track.charts {
        push_value_chart(frame, chart, chart_top, config);
        chart_top += chart.height + config.track_gap_px;
    }
}

fn push_value_chart(
    frame: &mut TimelineFrame,
    chart: &ValueChart,
    top: f64,
    config: &TimelineConfig,
) {
    let style = &config.style;
    frame.rects.push(RectPrimitive::new(
        0.0,
        top,
        config.width,
        chart.height,
        style.chart_background_color,
    ));
    frame.polylines.push(PolylinePrimitive {
        points: chart
            .points
            .iter()
            .map(|point| (point.x, top + point.y))
            .collect(),
        stroke_width: style.series_line_width,
        top,
        height: chart.height,
        gradient: band_gradient(&chart.segments, style.band),
    });

    let title = match &chart.unit {
        Some(unit) => format!("{} ({unit})", chart.name),
        None => chart.name.clone(),
    };
    if !title.is_empty() {
        frame.texts.push(TextPrimitive::new(
            title,
            config.padding,
            top + style.label_font_size_px,
            style.label_font_size_px,
            style.label_color,
            TextHAlign::Left,
        ));
    }
}

fn push_events(frame: &mut TimelineFrame, track: &EventTrack, top: f64, config: &TimelineConfig) {
    let style = &config.style;
    let card_height = (track.row_height - config.card_gap_px).max(0.0);
    for placed in &track.placed {
        let card_top = top + track.card_top(placed.row);
        frame.rects.push(RectPrimitive::new(
            placed.left,
            card_top,
            placed.right - placed.left,
            card_height,
            style.event_card_color,
        ));

        let Some(first) = placed.cluster.events.first() else {
            continue;
        };
        let extra = placed.cluster.len() - 1;
        let text = if extra > 0 {
            format!("{} (+{extra})", first.title)
        } else {
            first.title.clone()
        };
        if !text.is_empty() {
            let label = TextPrimitive::new(
                text,
                placed.cluster.position,
                card_top + style.label_font_size_px,
                style.label_font_size_px,
                style.label_color,
                TextHAlign::Center,
            );
            frame
                .texts
                .push(label.with_max_width(placed.right - placed.left));
        }
    }
}
