use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::decimal_to_f64;
use crate::error::{TimelineError, TimelineResult};

/// One clinical encounter; its instant is a reference anchor of the time axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Encounter {
    pub time: DateTime<Utc>,
    pub label: String,
}

impl Encounter {
    #[must_use]
    pub fn new(time: DateTime<Utc>, label: impl Into<String>) -> Self {
        Self {
            time,
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueSample {
    pub time: DateTime<Utc>,
    pub value: f64,
}

impl ValueSample {
    #[must_use]
    pub fn new(time: DateTime<Utc>, value: f64) -> Self {
        Self { time, value }
    }

    pub fn from_decimal(time: DateTime<Utc>, value: Decimal) -> TimelineResult<Self> {
        Ok(Self {
            time,
            value: decimal_to_f64(value, "sample value")?,
        })
    }
}

/// Clinically normal range of a measured quantity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceBand {
    pub min: f64,
    pub max: f64,
}

impl ReferenceBand {
    pub fn new(min: f64, max: f64) -> TimelineResult<Self> {
        Self { min, max }.validate()
    }

    pub fn validate(self) -> TimelineResult<Self> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(TimelineError::InvalidInput(
                "reference band bounds must be finite".to_owned(),
            ));
        }
        if self.min > self.max {
            return Err(TimelineError::InvalidInput(format!(
                "reference band min {} exceeds max {}",
                self.min, self.max
            )));
        }
        Ok(self)
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// A named value series: a lab biomarker or a computed risk score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub unit: Option<String>,
    pub band: Option<ReferenceBand>,
    pub samples: Vec<ValueSample>,
}

impl Series {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unit: None,
            band: None,
            samples: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    #[must_use]
    pub fn with_band(mut self, band: ReferenceBand) -> Self {
        self.band = Some(band);
        self
    }

    #[must_use]
    pub fn with_samples(mut self, samples: Vec<ValueSample>) -> Self {
        self.samples = samples;
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// A time interval such as a medication course. `end = None` means ongoing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalItem {
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
    pub label: String,
    pub group_key: String,
}

impl IntervalItem {
    #[must_use]
    pub fn new(
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
        label: impl Into<String>,
        group_key: impl Into<String>,
    ) -> Self {
        Self {
            start,
            end,
            label: label.into(),
            group_key: group_key.into(),
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }

    /// Resolves the layout end: open intervals run until `as_of`.
    pub fn resolved_end(&self, as_of: DateTime<Utc>) -> TimelineResult<DateTime<Utc>> {
        let end = self.end.unwrap_or(as_of);
        if end < self.start {
            return Err(TimelineError::InvalidInput(format!(
                "interval `{}` ends at {end} before it starts at {}",
                self.label, self.start
            )));
        }
        Ok(end)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointEvent {
    pub time: DateTime<Utc>,
    pub title: String,
    pub note: Option<String>,
}

impl PointEvent {
    #[must_use]
    pub fn new(time: DateTime<Utc>, title: impl Into<String>) -> Self {
        Self {
            time,
            title: title.into(),
            note: None,
        }
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Everything drawn on one patient timeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    #[serde(default)]
    pub encounters: Vec<Encounter>,
    #[serde(default)]
    pub medications: Vec<IntervalItem>,
    #[serde(default)]
    pub labs: Vec<Series>,
    #[serde(default)]
    pub risk_scores: Vec<Series>,
    #[serde(default)]
    pub events: Vec<PointEvent>,
}
