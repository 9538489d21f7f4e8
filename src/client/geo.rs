//! Great-circle distance and the nearby-thread lookup.

use super::state::ClientTag;
use serde::{Deserialize, Serialize};

/// Mean earth radius used by the spherical model, in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// A tag closer than this to the current position counts as nearby.
pub const NEARBY_THRESHOLD_METERS: f64 = 200.0;

/// A device or tag position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl Position {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Map center used when no device position is available.
    pub const fn origin() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Haversine distance between two positions, in meters.
pub fn distance_meters(a: Position, b: Position) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_METERS * c
}

/// Returns the first tag, in list order, strictly within
/// [`NEARBY_THRESHOLD_METERS`] of `position`.
///
/// This is a first-match scan, not a nearest-neighbour search.
pub fn find_nearby(position: Position, tags: &[ClientTag]) -> Option<&ClientTag> {
    tags.iter()
        .find(|tag| distance_meters(position, tag.position()) < NEARBY_THRESHOLD_METERS)
}
