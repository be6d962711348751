use chrono::{DateTime, Months, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{TimelineError, TimelineResult};

/// Width of the synthetic extrapolation interval on each side of the anchors.
pub const EXTRAPOLATION_MONTHS: u32 = 12;

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> TimelineResult<f64> {
    value.to_f64().ok_or_else(|| {
        TimelineError::InvalidInput(format!("{field_name} cannot be represented as f64"))
    })
}

#[must_use]
pub fn datetime_to_unix_seconds(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64 / 1000.0
}

/// Calendar date used to group same-day events. Always evaluated in UTC.
#[must_use]
pub fn calendar_date(time: DateTime<Utc>) -> NaiveDate {
    time.date_naive()
}

/// Shifts an instant by one calendar year (12 months) in either direction.
///
/// Month arithmetic saturates day-of-month, so Feb 29 lands on Feb 28.
pub fn shift_one_year(time: DateTime<Utc>, forward: bool) -> TimelineResult<DateTime<Utc>> {
    let months = Months::new(EXTRAPOLATION_MONTHS);
    let shifted = if forward {
        time.checked_add_months(months)
    } else {
        time.checked_sub_months(months)
    };
    shifted.ok_or_else(|| {
        TimelineError::InvalidInput(format!("instant {time} cannot be shifted by one year"))
    })
}

pub(crate) fn ensure_non_negative(value: f64, name: &str) -> TimelineResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(TimelineError::InvalidInput(format!(
            "{name} must be finite and >= 0"
        )))
    }
}

pub(crate) fn ensure_positive(value: f64, name: &str) -> TimelineResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(TimelineError::InvalidInput(format!(
            "{name} must be finite and > 0"
        )))
    }
}
