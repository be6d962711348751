//! clinical-timeline: temporal layout engine for patient timelines.
//!
//! Encounters pin a non-uniform time axis, value series get banded plotting
//! domains, and point events are clustered per day and packed into
//! non-overlapping card rows. Everything is a pure computation over explicit
//! inputs; drawing is delegated to a [`render::Renderer`] backend.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;
pub mod tracks;

pub use api::{TimelineConfig, TimelineEngine};
pub use error::{TimelineError, TimelineResult};
