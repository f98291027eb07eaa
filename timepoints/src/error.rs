use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InterpolationError {
    #[error("no stops")]
    EmptyInput,
    #[error("need at least 2 timepoints to interpolate, but only found {found}")]
    InsufficientTimepoints { found: usize },
    #[error("invalid ETA order: destination {destination} comes before origin {origin}")]
    InvalidOrder { origin: usize, destination: usize },
    #[error("stop index {index} is out of range for {len} stops")]
    StopIndexOutOfRange { index: usize, len: usize },
}
