//! Haversine distance estimator (fallback when OSRM unavailable).
//!
//! Uses great-circle distance scaled by a road circuity factor.
//! Less accurate than OSRM (ignores roads) but always available.

use crate::model::Waypoint;
use crate::traits::{DistanceEstimator, EstimateError, ensure_positive};

/// Typical ratio of road miles to straight-line miles across the plains.
const DEFAULT_ROAD_FACTOR: f64 = 1.2;

/// Earth radius in miles.
const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Haversine-based distance estimator.
#[derive(Debug, Clone)]
pub struct HaversineEstimator {
    /// Multiplier applied to straight-line distance.
    pub road_factor: f64,
}

impl Default for HaversineEstimator {
    fn default() -> Self {
        Self {
            road_factor: DEFAULT_ROAD_FACTOR,
        }
    }
}

impl HaversineEstimator {
    pub fn new(road_factor: f64) -> Self {
        Self { road_factor }
    }

    /// Great-circle distance between two (lat, lng) points in miles.
    pub fn haversine_miles(from: (f64, f64), to: (f64, f64)) -> f64 {
        let (lat1, lng1) = from;
        let (lat2, lng2) = to;

        let lat1_rad = lat1.to_radians();
        let lat2_rad = lat2.to_radians();
        let delta_lat = (lat2 - lat1).to_radians();
        let delta_lng = (lng2 - lng1).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().asin();

        EARTH_RADIUS_MILES * c
    }
}

impl DistanceEstimator for HaversineEstimator {
    fn estimate_miles(&self, from: &Waypoint, to: &Waypoint) -> Result<f64, EstimateError> {
        ensure_positive(Self::haversine_miles(from.coordinates, to.coordinates) * self.road_factor)
    }
}
