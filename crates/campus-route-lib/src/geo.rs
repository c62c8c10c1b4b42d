use serde::{Deserialize, Serialize};

/// Mean Earth radius in metres used by the spherical distance model.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to another coordinate in metres.
    pub fn distance_to(&self, other: &Self) -> f64 {
        haversine_distance(*self, *other)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}

/// Great-circle distance between two coordinates in metres.
///
/// Uses the haversine formula on a sphere of radius [`EARTH_RADIUS_M`]. Inputs
/// are not range-checked; for finite inputs, latitudes outside [-90, 90] or
/// longitudes outside [-180, 180] produce a finite but meaningless value. NaN
/// or infinite coordinates yield NaN.
///
/// The result is exactly symmetric: swapping `a` and `b` returns the same bits.
pub fn haversine_distance(a: Coordinate, b: Coordinate) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let lon_a = a.longitude.to_radians();
    let lon_b = b.longitude.to_radians();

    let half_dlat = ((lat_b - lat_a) / 2.0).sin();
    let half_dlon = ((lon_b - lon_a) / 2.0).sin();
    // The cosine product is grouped so both argument orders round identically.
    let h = half_dlat * half_dlat + half_dlon * half_dlon * (lat_a.cos() * lat_b.cos());

    // Rounding can push h marginally past 1 for antipodal points.
    2.0 * EARTH_RADIUS_M * h.clamp(0.0, 1.0).sqrt().asin()
}
