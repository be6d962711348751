mod frame_builder;
mod render_style;
mod timeline_config;
mod timeline_engine;
mod timeline_snapshot;

pub use frame_builder::{band_gradient, build_timeline_frame};
pub use render_style::{BandPalette, RenderStyle};
pub use timeline_config::TimelineConfig;
pub use timeline_engine::TimelineEngine;
pub use timeline_snapshot::TimelineSnapshot;
