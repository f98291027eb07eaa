#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod deltas;
mod error;
mod eta;
mod ids;
mod position;
pub mod stops;

pub use deltas::interpolate_deltas;
pub use error::InterpolationError;
pub use eta::{estimate_times, get_eta};
pub use ids::StopID;
pub use position::{distance, GeoPosition, MEAN_RADIUS_METERS};
pub use stops::Stop;
