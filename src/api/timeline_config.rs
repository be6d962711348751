use serde::{Deserialize, Serialize};

use crate::core::primitives::{ensure_non_negative, ensure_positive};
use crate::error::{TimelineError, TimelineResult};

use super::RenderStyle;

/// Public timeline bootstrap configuration.
///
/// All sizes are logical pixels. The type is serializable so host
/// applications can persist their layout setup without an ad-hoc format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineConfig {
    pub width: f64,
    pub padding: f64,
    #[serde(default = "default_track_gap_px")]
    pub track_gap_px: f64,
    #[serde(default = "default_encounter_track_height_px")]
    pub encounter_track_height_px: f64,
    #[serde(default = "default_medication_row_height_px")]
    pub medication_row_height_px: f64,
    #[serde(default = "default_interval_bar_height_px")]
    pub interval_bar_height_px: f64,
    #[serde(default = "default_chart_height_px")]
    pub chart_height_px: f64,
    #[serde(default = "default_card_width_px")]
    pub card_width_px: f64,
    #[serde(default = "default_card_gap_px")]
    pub card_gap_px: f64,
    /// Vertical footprint of one event-card row; supplied, never measured.
    #[serde(default = "default_row_height_px")]
    pub row_height_px: f64,
    #[serde(default)]
    pub style: RenderStyle,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self::new(1200.0, 60.0)
    }
}

impl TimelineConfig {
    /// Creates a config with default track geometry.
    #[must_use]
    pub fn new(width: f64, padding: f64) -> Self {
        Self {
            width,
            padding,
            track_gap_px: default_track_gap_px(),
            encounter_track_height_px: default_encounter_track_height_px(),
            medication_row_height_px: default_medication_row_height_px(),
            interval_bar_height_px: default_interval_bar_height_px(),
            chart_height_px: default_chart_height_px(),
            card_width_px: default_card_width_px(),
            card_gap_px: default_card_gap_px(),
            row_height_px: default_row_height_px(),
            style: RenderStyle::default(),
        }
    }

    /// Sets event-card width and the minimum gap between same-row cards.
    #[must_use]
    pub fn with_card_geometry(mut self, card_width_px: f64, card_gap_px: f64) -> Self {
        self.card_width_px = card_width_px;
        self.card_gap_px = card_gap_px;
        self
    }

    #[must_use]
    pub fn with_row_height(mut self, row_height_px: f64) -> Self {
        self.row_height_px = row_height_px;
        self
    }

    /// Sets the plot height of every lab and risk chart.
    #[must_use]
    pub fn with_chart_height(mut self, chart_height_px: f64) -> Self {
        self.chart_height_px = chart_height_px;
        self
    }

    #[must_use]
    pub fn with_medication_rows(mut self, row_height_px: f64, bar_height_px: f64) -> Self {
        self.medication_row_height_px = row_height_px;
        self.interval_bar_height_px = bar_height_px;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: RenderStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn card_half_width(&self) -> f64 {
        self.card_width_px * 0.5
    }

    pub fn validate(self) -> TimelineResult<Self> {
        let geometry_ok = self.width.is_finite()
            && self.padding.is_finite()
            && self.width > 0.0
            && self.padding >= 0.0
            && self.width >= 2.0 * self.padding;
        if !geometry_ok {
            return Err(TimelineError::InvalidTrackGeometry {
                width: self.width,
                padding: self.padding,
            });
        }

        ensure_non_negative(self.track_gap_px, "track gap")?;
        ensure_positive(self.encounter_track_height_px, "encounter track height")?;
        ensure_positive(self.medication_row_height_px, "medication row height")?;
        ensure_positive(self.interval_bar_height_px, "interval bar height")?;
        ensure_positive(self.chart_height_px, "chart height")?;
        ensure_positive(self.card_width_px, "card width")?;
        ensure_non_negative(self.card_gap_px, "card gap")?;
        ensure_positive(self.row_height_px, "row height")?;
        if self.interval_bar_height_px > self.medication_row_height_px {
            return Err(TimelineError::InvalidInput(
                "interval bar height must fit inside the medication row".to_owned(),
            ));
        }
        self.style.validate()?;
        Ok(self)
    }
}

fn default_track_gap_px() -> f64 {
    16.0
}

fn default_encounter_track_height_px() -> f64 {
    36.0
}

fn default_medication_row_height_px() -> f64 {
    22.0
}

fn default_interval_bar_height_px() -> f64 {
    14.0
}

fn default_chart_height_px() -> f64 {
    120.0
}

fn default_card_width_px() -> f64 {
    160.0
}

fn default_card_gap_px() -> f64 {
    8.0
}

fn default_row_height_px() -> f64 {
    56.0
}
