use serde::{Deserialize, Serialize};

use crate::core::BandZone;
use crate::core::primitives::ensure_positive;
use crate::error::TimelineResult;
use crate::render::Color;

/// Colors of the three reference-band zones plus the unbanded fallback.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandPalette {
    pub above: Color,
    pub within: Color,
    pub below: Color,
    pub unbanded: Color,
}

impl Default for BandPalette {
    fn default() -> Self {
        Self {
            above: Color::rgb(0.863, 0.208, 0.271),
            within: Color::rgb(0.157, 0.655, 0.271),
            below: Color::rgb(0.992, 0.494, 0.078),
            unbanded: Color::rgb(0.051, 0.431, 0.992),
        }
    }
}

impl BandPalette {
    #[must_use]
    pub fn color_for(self, zone: BandZone) -> Color {
        match zone {
            BandZone::Above => self.above,
            BandZone::Within => self.within,
            BandZone::Below => self.below,
            BandZone::Unbanded => self.unbanded,
        }
    }

    fn validate(self) -> TimelineResult<Self> {
        for color in [self.above, self.within, self.below, self.unbanded] {
            color.validate()?;
        }
        Ok(self)
    }
}

const MEDICATION_BAR: Color = Color::rgb(0.400, 0.063, 0.949);

/// Style contract for one timeline frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderStyle {
    pub encounter_line_color: Color,
    pub medication_bar_color: Color,
    pub ongoing_medication_bar_color: Color,
    pub event_card_color: Color,
    pub chart_background_color: Color,
    pub label_color: Color,
    pub band: BandPalette,
    pub label_font_size_px: f64,
    pub encounter_line_width: f64,
    pub series_line_width: f64,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            encounter_line_color: Color::rgba(0.424, 0.459, 0.490, 0.6),
            medication_bar_color: MEDICATION_BAR,
            ongoing_medication_bar_color: MEDICATION_BAR.with_alpha(0.55),
            event_card_color: Color::rgb(0.973, 0.843, 0.855),
            chart_background_color: Color::rgb(0.973, 0.976, 0.980),
            label_color: Color::rgb(0.129, 0.145, 0.161),
            band: BandPalette::default(),
            label_font_size_px: 11.0,
            encounter_line_width: 1.0,
            series_line_width: 2.0,
        }
    }
}

impl RenderStyle {
    pub(crate) fn validate(self) -> TimelineResult<Self> {
        for color in [
            self.encounter_line_color,
            self.medication_bar_color,
            self.ongoing_medication_bar_color,
            self.event_card_color,
            self.chart_background_color,
            self.label_color,
        ] {
            color.validate()?;
        }
        self.band.validate()?;
        ensure_positive(self.label_font_size_px, "label font size")?;
        ensure_positive(self.encounter_line_width, "encounter line width")?;
        ensure_positive(self.series_line_width, "series line width")?;
        Ok(self)
    }
}
