use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::ControlPoint;
use crate::error::{TimelineError, TimelineResult};
use crate::tracks::TimelineLayout;

use super::TimelineConfig;

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineSnapshot {
    pub config: TimelineConfig,
    pub as_of: DateTime<Utc>,
    pub control_points: Vec<ControlPoint>,
    pub layout: TimelineLayout,
    pub metadata: IndexMap<String, String>,
}

impl TimelineSnapshot {
    pub fn to_json_pretty(&self) -> TimelineResult<String> {
        serde_json::to_string_pretty(self).map_err(|err| {
            TimelineError::InvalidInput(format!("failed to serialize snapshot: {err}"))
        })
    }

    pub fn from_json(json: &str) -> TimelineResult<Self> {
        serde_json::from_str(json).map_err(|err| {
            TimelineError::InvalidInput(format!("failed to parse snapshot: {err}"))
        })
    }
}
