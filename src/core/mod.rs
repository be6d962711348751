pub mod anchor_scale;
pub mod clusters;
pub mod lanes;
pub mod primitives;
pub mod scale;
pub mod series_domain;
pub mod types;

pub use anchor_scale::{AnchorScale, ControlPoint};
pub use clusters::{EventCluster, EventClusterer, PlacedCluster, cluster_events, place_clusters};
pub use lanes::{
    LaneAssigner, LaneItem, assign_lanes, assign_span_lanes, lane_count, sort_by_position,
};
pub use scale::LinearScale;
pub use series_domain::{BandSegment, BandZone, DOMAIN_BUFFER_RATIO, SeriesDomain};
pub use types::{
    Encounter, IntervalItem, PatientRecord, PointEvent, ReferenceBand, Series, ValueSample,
};
