use serde::{Deserialize, Serialize};

use crate::error::{TimelineError, TimelineResult};

fn ensure_all_finite(values: &[f64], what: &str) -> TimelineResult<()> {
    if values.iter().all(|value| value.is_finite()) {
        Ok(())
    } else {
        Err(TimelineError::InvalidInput(format!("{what} must be finite")))
    }
}

fn ensure_stroke(width: f64, what: &str) -> TimelineResult<()> {
    if width.is_finite() && width > 0.0 {
        Ok(())
    } else {
        Err(TimelineError::InvalidInput(format!(
            "{what} stroke width must be finite and > 0"
        )))
    }
}

/// RGBA color; every channel is a fraction in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Same hue with a different opacity, e.g. for ongoing intervals.
    #[must_use]
    pub const fn with_alpha(self, alpha: f64) -> Self {
        Self { alpha, ..self }
    }

    pub fn validate(self) -> TimelineResult<()> {
        let channels = [self.red, self.green, self.blue, self.alpha];
        if channels
            .iter()
            .all(|channel| channel.is_finite() && (0.0..=1.0).contains(channel))
        {
            Ok(())
        } else {
            Err(TimelineError::InvalidInput(format!(
                "color channels must be finite and in [0, 1]: {channels:?}"
            )))
        }
    }
}

/// Straight stroke between two points in frame pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_width: f64,
    pub color: Color,
}

impl LinePrimitive {
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64, stroke_width: f64, color: Color) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke_width,
            color,
        }
    }

    /// Guide line spanning `[top, bottom]` at a fixed `x`.
    #[must_use]
    pub const fn vertical(x: f64, top: f64, bottom: f64, stroke_width: f64, color: Color) -> Self {
        Self::new(x, top, x, bottom, stroke_width, color)
    }

    pub fn validate(self) -> TimelineResult<()> {
        ensure_all_finite(&[self.x1, self.y1, self.x2, self.y2], "line endpoints")?;
        ensure_stroke(self.stroke_width, "line")?;
        self.color.validate()
    }
}

/// Filled axis-aligned rectangle in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectPrimitive {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Color,
}

impl RectPrimitive {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64, fill: Color) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill,
        }
    }

    pub fn validate(self) -> TimelineResult<()> {
        ensure_all_finite(&[self.x, self.y], "rect origin")?;
        if !self.width.is_finite()
            || !self.height.is_finite()
            || self.width < 0.0
            || self.height < 0.0
        {
            return Err(TimelineError::InvalidInput(
                "rect size must be finite and >= 0".to_owned(),
            ));
        }
        self.fill.validate()
    }
}

/// One stop of a vertical gradient; `offset` is a fraction of the area height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Color,
}

impl GradientStop {
    #[must_use]
    pub const fn new(offset: f64, color: Color) -> Self {
        Self { offset, color }
    }
}

/// Connected line through projected samples, stroked with a vertical gradient.
///
/// Gradient offsets are fractions of `[top, top + height]` in pixel space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolylinePrimitive {
    pub points: Vec<(f64, f64)>,
    pub stroke_width: f64,
    pub top: f64,
    pub height: f64,
    pub gradient: Vec<GradientStop>,
}

impl PolylinePrimitive {
    pub fn validate(&self) -> TimelineResult<()> {
        for &(x, y) in &self.points {
            ensure_all_finite(&[x, y], "polyline points")?;
        }
        ensure_all_finite(&[self.top, self.height], "polyline band area")?;
        ensure_stroke(self.stroke_width, "polyline")?;
        if self.gradient.is_empty() {
            return Err(TimelineError::InvalidInput(
                "polyline gradient needs at least one stop".to_owned(),
            ));
        }
        let mut previous = 0.0;
        for stop in &self.gradient {
            if !(0.0..=1.0).contains(&stop.offset) || stop.offset < previous {
                return Err(TimelineError::InvalidInput(
                    "gradient offsets must be ascending within [0, 1]".to_owned(),
                ));
            }
            previous = stop.offset;
            stop.color.validate()?;
        }
        Ok(())
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// One label anchored at `(x, y)`.
///
/// `max_width_px` asks the backend to ellipsize text that would overflow its
/// container, such as an event card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub color: Color,
    pub h_align: TextHAlign,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_width_px: Option<f64>,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
        h_align: TextHAlign,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size_px,
            color,
            h_align,
            max_width_px: None,
        }
    }

    #[must_use]
    pub fn with_max_width(mut self, max_width_px: f64) -> Self {
        self.max_width_px = Some(max_width_px);
        self
    }

    pub fn validate(&self) -> TimelineResult<()> {
        if self.text.is_empty() {
            return Err(TimelineError::InvalidInput(
                "label text must not be empty".to_owned(),
            ));
        }
        ensure_all_finite(&[self.x, self.y], "label anchor")?;
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(TimelineError::InvalidInput(
                "label font size must be finite and > 0".to_owned(),
            ));
        }
        if self
            .max_width_px
            .is_some_and(|max_width| !max_width.is_finite() || max_width <= 0.0)
        {
            return Err(TimelineError::InvalidInput(
                "label max width must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}
