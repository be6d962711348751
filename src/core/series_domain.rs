use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

use crate::core::scale::LinearScale;
use crate::core::types::{ReferenceBand, ValueSample};
use crate::error::{TimelineError, TimelineResult};

/// Fraction of the observed span (or of the magnitude, for flat series) added
/// above and below the observed extremes.
pub const DOMAIN_BUFFER_RATIO: f64 = 0.2;

/// Vertical zone of a value relative to the reference band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BandZone {
    Above,
    Within,
    Below,
    /// Series without a reference band: one uniform zone.
    Unbanded,
}

/// Contiguous vertical slice of the chart, as fractions from the top edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandSegment {
    pub zone: BandZone,
    pub start: f64,
    pub end: f64,
}

/// Plotting domain of one value series plus its normalized band boundaries.
///
/// `band_fraction_low` is the upper band edge (`band.max`) and
/// `band_fraction_high` the lower edge (`band.min`), both measured from the
/// top of the chart in `[0, 1]`. Without a band they are `0` and `1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesDomain {
    pub domain_min: f64,
    pub domain_max: f64,
    pub band_fraction_low: f64,
    pub band_fraction_high: f64,
    pub band: Option<ReferenceBand>,
}

impl SeriesDomain {
    /// Computes the domain for a non-empty, finite sample set.
    pub fn compute(samples: &[ValueSample], band: Option<ReferenceBand>) -> TimelineResult<Self> {
        if samples.is_empty() {
            return Err(TimelineError::InvalidInput(
                "series domain requires at least one sample".to_owned(),
            ));
        }
        let band = band.map(ReferenceBand::validate).transpose()?;

        let mut observed_min = f64::INFINITY;
        let mut observed_max = f64::NEG_INFINITY;
        for sample in samples {
            if !sample.value.is_finite() {
                return Err(TimelineError::InvalidInput(format!(
                    "sample value at {} must be finite",
                    sample.time
                )));
            }
            observed_min = observed_min.min(sample.value);
            observed_max = observed_max.max(sample.value);
        }
        if let Some(band) = band {
            observed_min = observed_min.min(band.min);
            observed_max = observed_max.max(band.max);
        }

        let span = observed_max - observed_min;
        let buffer = if span > 0.0 {
            span * DOMAIN_BUFFER_RATIO
        } else {
            observed_max.max(1.0) * DOMAIN_BUFFER_RATIO
        };

        let mut domain_min = observed_min - buffer;
        let domain_max = observed_max + buffer;
        // `observed_min` already folds in the band minimum.
        if observed_min >= 0.0 {
            domain_min = domain_min.max(0.0);
        }
        if !span.is_finite()
            || !domain_min.is_finite()
            || !domain_max.is_finite()
            || !(domain_max - domain_min).is_finite()
        {
            return Err(TimelineError::InvalidInput(format!(
                "series domain overflows f64: observed [{observed_min}, {observed_max}]"
            )));
        }

        let mut domain = Self {
            domain_min,
            domain_max,
            band_fraction_low: 0.0,
            band_fraction_high: 1.0,
            band,
        };

        if let Some(band) = band {
            // Fractions are height-independent, so a unit-height chart suffices.
            let unit = domain.value_scale(1.0)?;
            domain.band_fraction_low = unit.domain_to_pixel(band.max)?.clamp(0.0, 1.0);
            domain.band_fraction_high = unit.domain_to_pixel(band.min)?.clamp(0.0, 1.0);
        }

        Ok(domain)
    }

    /// Value→pixel map over `[domain_min, domain_max]` onto `[height, 0]`.
    pub fn value_scale(&self, height: f64) -> TimelineResult<LinearScale> {
        if !height.is_finite() || height <= 0.0 {
            return Err(TimelineError::InvalidInput(
                "chart height must be finite and > 0".to_owned(),
            ));
        }
        LinearScale::new(self.domain_min, self.domain_max, height, 0.0)
    }

    pub fn value_to_pixel(&self, value: f64, height: f64) -> TimelineResult<f64> {
        self.value_scale(height)?.domain_to_pixel(value)
    }

    #[must_use]
    pub fn span(&self) -> f64 {
        self.domain_max - self.domain_min
    }

    #[must_use]
    pub fn zone_of(&self, value: f64) -> BandZone {
        match self.band {
            None => BandZone::Unbanded,
            Some(band) if value > band.max => BandZone::Above,
            Some(band) if value < band.min => BandZone::Below,
            Some(_) => BandZone::Within,
        }
    }

    /// Vertical zone slices from top to bottom, ready for a banded gradient.
    #[must_use]
    pub fn segments(&self) -> SmallVec<[BandSegment; 3]> {
        if self.band.is_none() {
            return smallvec![BandSegment {
                zone: BandZone::Unbanded,
                start: 0.0,
                end: 1.0,
            }];
        }

        smallvec![
            BandSegment {
                zone: BandZone::Above,
                start: 0.0,
                end: self.band_fraction_low,
            },
            BandSegment {
                zone: BandZone::Within,
                start: self.band_fraction_low,
                end: self.band_fraction_high,
            },
            BandSegment {
                zone: BandZone::Below,
                start: self.band_fraction_high,
                end: 1.0,
            },
        ]
    }
}
