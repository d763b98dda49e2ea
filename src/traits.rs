//! Collaborator seams for the trip feasibility engine.
//!
//! The engine only needs three things from the surrounding application: a
//! reference dataset of waypoints, a way to turn free text into one of those
//! waypoints, and a mileage estimate between two of them. Concrete apps
//! implement these for their own storage and routing backends.

use thiserror::Error;

use crate::model::Waypoint;

/// Supplies the reference waypoint dataset.
pub trait WaypointSource {
    fn load_waypoints(&self) -> Result<Vec<Waypoint>, SourceError>;
}

/// Maps a free-text place name to a canonical waypoint.
pub trait LocationResolver {
    fn resolve(&self, name: &str) -> Result<Waypoint, ResolveError>;
}

/// Estimates driving distance between two resolved waypoints.
///
/// Implementations must return a positive, finite number of miles or an error.
pub trait DistanceEstimator {
    fn estimate_miles(&self, from: &Waypoint, to: &Waypoint) -> Result<f64, EstimateError>;
}

impl<T: WaypointSource + ?Sized> WaypointSource for &T {
    fn load_waypoints(&self) -> Result<Vec<Waypoint>, SourceError> {
        (**self).load_waypoints()
    }
}

impl<T: LocationResolver + ?Sized> LocationResolver for &T {
    fn resolve(&self, name: &str) -> Result<Waypoint, ResolveError> {
        (**self).resolve(name)
    }
}

impl<T: DistanceEstimator + ?Sized> DistanceEstimator for &T {
    fn estimate_miles(&self, from: &Waypoint, to: &Waypoint) -> Result<f64, EstimateError> {
        (**self).estimate_miles(from, to)
    }
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("waypoint request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("waypoint payload could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("waypoint source unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("location not found: {0}")]
    NotFound(String),
    #[error("location lookup unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimateError {
    #[error("distance estimate unavailable: {0}")]
    Unavailable(String),
    #[error("distance estimate timed out")]
    Timeout,
    #[error("distance estimate was not positive: {0}")]
    NonPositive(f64),
}

/// Rejects estimates the feasibility calculator cannot work with.
pub fn ensure_positive(miles: f64) -> Result<f64, EstimateError> {
    if miles.is_finite() && miles > 0.0 {
        Ok(miles)
    } else {
        Err(EstimateError::NonPositive(miles))
    }
}
