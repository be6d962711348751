use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::primitives::{datetime_to_unix_seconds, shift_one_year};
use crate::error::{TimelineError, TimelineResult};

/// One `(instant, pixel)` pair of the piecewise-linear time mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub time: DateTime<Utc>,
    pub seconds: f64,
    pub pixel: f64,
    /// `true` for the two extrapolation points outside the real anchors.
    pub synthetic: bool,
}

impl ControlPoint {
    fn new(time: DateTime<Utc>, pixel: f64, synthetic: bool) -> Self {
        Self {
            time,
            seconds: datetime_to_unix_seconds(time),
            pixel,
            synthetic,
        }
    }
}

/// Non-uniform time axis pinned to a set of irregularly spaced anchors.
///
/// Real anchors are spread evenly across `[padding, target_width - padding]`
/// regardless of the wall-clock distance between them. One synthetic point is
/// added a calendar year before the first anchor and one a calendar year after
/// the last, each a full `step` further out in pixel space, so instants outside
/// the anchor span still map linearly and in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorScale {
    points: Vec<ControlPoint>,
    step: f64,
    target_width: f64,
    padding: f64,
}

impl AnchorScale {
    /// Builds the scale from unsorted reference instants.
    ///
    /// An empty instant set produces a scale whose [`AnchorScale::map`] always
    /// fails with [`TimelineError::EmptyAnchorSet`].
    pub fn build(
        instants: &[DateTime<Utc>],
        target_width: f64,
        padding: f64,
    ) -> TimelineResult<Self> {
        validate_geometry(target_width, padding)?;

        let mut sorted = instants.to_vec();
        sorted.sort_unstable();

        let divisor = sorted.len().saturating_sub(1).max(1) as f64;
        let step = (target_width - 2.0 * padding) / divisor;

        let (Some(&first), Some(&last)) = (sorted.first(), sorted.last()) else {
            trace!(target_width, padding, "built empty anchor scale");
            return Ok(Self {
                points: Vec::new(),
                step,
                target_width,
                padding,
            });
        };

        let mut points = Vec::with_capacity(sorted.len() + 2);
        points.push(ControlPoint::new(
            shift_one_year(first, false)?,
            padding - step,
            true,
        ));
        for (index, instant) in sorted.iter().enumerate() {
            points.push(ControlPoint::new(
                *instant,
                padding + index as f64 * step,
                false,
            ));
        }
        points.push(ControlPoint::new(
            shift_one_year(last, true)?,
            target_width - padding + step,
            true,
        ));

        trace!(
            anchors = sorted.len(),
            step, target_width, padding, "built anchor scale"
        );

        Ok(Self {
            points,
            step,
            target_width,
            padding,
        })
    }

    /// Maps an instant to its horizontal pixel coordinate.
    pub fn map(&self, instant: DateTime<Utc>) -> TimelineResult<f64> {
        self.map_unix_seconds(datetime_to_unix_seconds(instant))
    }

    /// Maps a unix timestamp in (fractional) seconds.
    ///
    /// Inside the control span the segment is located with bisect-right, so an
    /// instant equal to several duplicated anchors lands on the last of them.
    /// Outside the span the nearest outer segment is extended linearly.
    pub fn map_unix_seconds(&self, seconds: f64) -> TimelineResult<f64> {
        if self.points.is_empty() {
            return Err(TimelineError::EmptyAnchorSet);
        }
        if !seconds.is_finite() {
            return Err(TimelineError::InvalidInput(
                "instant must be finite".to_owned(),
            ));
        }

        let upper = self.points.partition_point(|point| point.seconds <= seconds);
        let right = upper.clamp(1, self.points.len() - 1);
        let a = self.points[right - 1];
        let b = self.points[right];

        let span = b.seconds - a.seconds;
        if span == 0.0 {
            return Ok(b.pixel);
        }
        Ok(a.pixel + (seconds - a.seconds) / span * (b.pixel - a.pixel))
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    #[must_use]
    pub fn target_width(&self) -> f64 {
        self.target_width
    }

    #[must_use]
    pub fn padding(&self) -> f64 {
        self.padding
    }

    /// All control points, synthetic ones included, in ascending order.
    #[must_use]
    pub fn control_points(&self) -> &[ControlPoint] {
        &self.points
    }

    pub fn anchors(&self) -> impl Iterator<Item = &ControlPoint> {
        self.points.iter().filter(|point| !point.synthetic)
    }

    #[must_use]
    pub fn anchor_count(&self) -> usize {
        self.points.len().saturating_sub(2)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Pixel extent covered by the real anchors.
    #[must_use]
    pub fn anchor_range(&self) -> Option<(f64, f64)> {
        let mut anchors = self.anchors();
        let first = anchors.next()?.pixel;
        let last = anchors.last().map_or(first, |point| point.pixel);
        Some((first, last))
    }
}

fn validate_geometry(target_width: f64, padding: f64) -> TimelineResult<()> {
    let invalid = !target_width.is_finite()
        || !padding.is_finite()
        || target_width < 0.0
        || padding < 0.0
        || target_width < 2.0 * padding;
    if invalid {
        return Err(TimelineError::InvalidTrackGeometry {
            width: target_width,
            padding,
        });
    }
    Ok(())
}
