use serde::{Deserialize, Serialize};

/// Mean radius of the Earth, treated as a perfect sphere.
pub const MEAN_RADIUS_METERS: f64 = 6_371_000.79;

const PI_OVER_180: f64 = std::f64::consts::PI / 180.0;

/// A WGS84-ish position in decimal degrees. Nothing checks the range, so a latitude of 200 just
/// produces a meaningless distance.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPosition {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPosition {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance in meters
    pub fn dist_to(&self, other: &GeoPosition) -> f64 {
        distance(*self, *other)
    }
}

fn radians(degrees: f64) -> f64 {
    degrees * PI_OVER_180
}

fn sin_squared(x: f64) -> f64 {
    let sin = x.sin();
    sin * sin
}

/// Haversine distance in meters between two positions.
pub fn distance(a: GeoPosition, b: GeoPosition) -> f64 {
    let lat1 = radians(a.latitude);
    let lat2 = radians(b.latitude);
    let lat_h = sin_squared((lat1 - lat2) / 2.0);
    // The longitude difference is taken in degrees before converting
    let lon_h = sin_squared(radians(a.longitude - b.longitude) / 2.0);
    let h = lat_h + lat1.cos() * lat2.cos() * lon_h;
    2.0 * MEAN_RADIUS_METERS * h.sqrt().asin()
}
