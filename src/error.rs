use thiserror::Error;

pub type TimelineResult<T> = Result<T, TimelineError>;

#[derive(Debug, Error)]
pub enum TimelineError {
    #[error("anchor scale has no reference instants to map against")]
    EmptyAnchorSet,

    #[error("invalid track geometry: width={width}, padding={padding}")]
    InvalidTrackGeometry { width: f64, padding: f64 },

    #[error("invalid input: {0}")]
    InvalidInput(String),
}
