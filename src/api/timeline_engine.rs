use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use tracing::{debug, trace, warn};

use crate::core::{AnchorScale, Encounter, IntervalItem, PatientRecord, PointEvent, Series};
use crate::error::TimelineResult;
use crate::render::{Renderer, TimelineFrame};
use crate::tracks::{
    CardGeometry, IntervalGeometry, TimelineLayout, TrackKind, layout_encounters, layout_events,
    layout_medications, layout_value_track,
};

use super::{TimelineConfig, TimelineSnapshot, build_timeline_frame};

/// Owns one patient timeline: the record set, its layout config and the
/// shared anchor scale every track is projected through.
///
/// The scale is rebuilt eagerly whenever encounters, width or padding change.
pub struct TimelineEngine<R: Renderer> {
    renderer: R,
    config: TimelineConfig,
    record: PatientRecord,
    as_of: DateTime<Utc>,
    scale: AnchorScale,
    metadata: IndexMap<String, String>,
}

impl<R: Renderer> TimelineEngine<R> {
    /// Creates an engine with an empty record.
    ///
    /// `as_of` is the instant open-ended intervals resolve to.
    pub fn new(renderer: R, config: TimelineConfig, as_of: DateTime<Utc>) -> TimelineResult<Self> {
        let config = config.validate()?;
        let scale = AnchorScale::build(&[], config.width, config.padding)?;

        Ok(Self {
            renderer,
            config,
            record: PatientRecord::default(),
            as_of,
            scale,
            metadata: IndexMap::new(),
        })
    }

    pub fn set_record(&mut self, record: PatientRecord) -> TimelineResult<()> {
        let scale = build_scale(&record.encounters, &self.config)?;
        debug!(
            encounters = record.encounters.len(),
            medications = record.medications.len(),
            labs = record.labs.len(),
            risk_scores = record.risk_scores.len(),
            events = record.events.len(),
            "set patient record"
        );
        self.record = record;
        self.scale = scale;
        Ok(())
    }

    pub fn set_encounters(&mut self, encounters: Vec<Encounter>) -> TimelineResult<()> {
        let scale = build_scale(&encounters, &self.config)?;
        debug!(count = encounters.len(), "set encounters");
        self.record.encounters = encounters;
        self.scale = scale;
        Ok(())
    }

    pub fn set_medications(&mut self, medications: Vec<IntervalItem>) {
        trace!(count = medications.len(), "set medications");
        self.record.medications = medications;
    }

    pub fn set_lab_series(&mut self, labs: Vec<Series>) {
        trace!(count = labs.len(), "set lab series");
        self.record.labs = labs;
    }

    pub fn set_risk_scores(&mut self, risk_scores: Vec<Series>) {
        trace!(count = risk_scores.len(), "set risk scores");
        self.record.risk_scores = risk_scores;
    }

    pub fn set_events(&mut self, events: Vec<PointEvent>) {
        trace!(count = events.len(), "set events");
        self.record.events = events;
    }

    pub fn set_as_of(&mut self, as_of: DateTime<Utc>) {
        self.as_of = as_of;
    }

    /// Replaces the whole config; the previous one is kept if validation fails.
    pub fn set_config(&mut self, config: TimelineConfig) -> TimelineResult<()> {
        let config = config.validate()?;
        let scale = build_scale(&self.record.encounters, &config)?;
        self.config = config;
        self.scale = scale;
        Ok(())
    }

    /// Resizes the timeline, e.g. after a viewport change.
    pub fn set_width(&mut self, width: f64) -> TimelineResult<()> {
        self.set_config(TimelineConfig {
            width,
            ..self.config
        })
    }

    pub fn set_padding(&mut self, padding: f64) -> TimelineResult<()> {
        self.set_config(TimelineConfig {
            padding,
            ..self.config
        })
    }

    pub fn set_metadata(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.metadata.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    #[must_use]
    pub fn record(&self) -> &PatientRecord {
        &self.record
    }

    #[must_use]
    pub fn as_of(&self) -> DateTime<Utc> {
        self.as_of
    }

    #[must_use]
    pub fn scale(&self) -> &AnchorScale {
        &self.scale
    }

    #[must_use]
    pub fn metadata(&self) -> &IndexMap<String, String> {
        &self.metadata
    }

    pub fn map_time_to_pixel(&self, time: DateTime<Utc>) -> TimelineResult<f64> {
        self.scale.map(time)
    }

    /// Lays out every track. A track whose layout fails is logged and left
    /// out instead of failing the whole timeline.
    #[must_use]
    pub fn layout(&self) -> TimelineLayout {
        let config = &self.config;
        let record = &self.record;
        let mut skipped = Vec::new();

        let encounters = keep_track(
            TrackKind::Encounters,
            layout_encounters(
                &record.encounters,
                &self.scale,
                config.encounter_track_height_px,
            ),
            &mut skipped,
        );
        let medications = keep_track(
            TrackKind::Medications,
            layout_medications(
                &record.medications,
                &self.scale,
                self.as_of,
                IntervalGeometry {
                    row_height: config.medication_row_height_px,
                    bar_height: config.interval_bar_height_px,
                },
            ),
            &mut skipped,
        );
        let labs = layout_value_track(
            &record.labs,
            &self.scale,
            config.chart_height_px,
            config.track_gap_px,
        );
        let risk_scores = layout_value_track(
            &record.risk_scores,
            &self.scale,
            config.chart_height_px,
            config.track_gap_px,
        );
        let events = keep_track(
            TrackKind::Events,
            layout_events(
                &record.events,
                &self.scale,
                CardGeometry {
                    half_width: config.card_half_width(),
                    gap: config.card_gap_px,
                    row_height: config.row_height_px,
                },
            ),
            &mut skipped,
        );

        TimelineLayout {
            width: config.width,
            encounters,
            medications,
            labs,
            risk_scores,
            events,
            skipped_tracks: skipped,
        }
    }

    pub fn build_frame(&self) -> TimelineResult<TimelineFrame> {
        build_timeline_frame(&self.layout(), &self.config)
    }

    pub fn render(&mut self) -> TimelineResult<()> {
        let frame = self.build_frame()?;
        self.renderer.render(&frame)
    }

    #[must_use]
    pub fn snapshot(&self) -> TimelineSnapshot {
        TimelineSnapshot {
            config: self.config,
            as_of: self.as_of,
            control_points: self.scale.control_points().to_vec(),
            layout: self.layout(),
            metadata: self.metadata.clone(),
        }
    }

    pub fn snapshot_json_pretty(&self) -> TimelineResult<String> {
        self.snapshot().to_json_pretty()
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}

fn build_scale(encounters: &[Encounter], config: &TimelineConfig) -> TimelineResult<AnchorScale> {
    let instants: Vec<DateTime<Utc>> = encounters.iter().map(|encounter| encounter.time).collect();
    AnchorScale::build(&instants, config.width, config.padding)
}

fn keep_track<T>(
    kind: TrackKind,
    result: TimelineResult<T>,
    skipped: &mut Vec<TrackKind>,
) -> Option<T> {
    match result {
        Ok(track) => Some(track),
        Err(err) => {
            warn!(track = ?kind, error = %err, "skipping track");
            skipped.push(kind);
            None
        }
    }
}
