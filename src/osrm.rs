//! OSRM HTTP adapter for road distances.

use serde::Deserialize;
use tracing::warn;

use crate::model::Waypoint;
use crate::traits::{DistanceEstimator, EstimateError, ensure_positive};

const METERS_PER_MILE: f64 = 1609.344;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            profile: "car".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmEstimator {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmEstimator {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn route_url(&self, from: &Waypoint, to: &Waypoint) -> String {
        let coords = [from, to]
            .iter()
            .map(|w| format!("{:.6},{:.6}", w.coordinates.1, w.coordinates.0))
            .collect::<Vec<_>>()
            .join(";");

        format!(
            "{}/route/v1/{}/{}?overview=false",
            self.config.base_url, self.config.profile, coords
        )
    }
}

impl DistanceEstimator for OsrmEstimator {
    fn estimate_miles(&self, from: &Waypoint, to: &Waypoint) -> Result<f64, EstimateError> {
        let response = self
            .client
            .get(self.route_url(from, to))
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<OsrmRouteResponse>());

        let body = match response {
            Ok(body) => body,
            Err(err) if err.is_timeout() => return Err(EstimateError::Timeout),
            Err(err) => return Err(EstimateError::Unavailable(err.to_string())),
        };

        if body.code != "Ok" {
            return Err(EstimateError::Unavailable(format!("OSRM returned {}", body.code)));
        }

        let meters = body
            .routes
            .first()
            .map(|route| route.distance)
            .ok_or_else(|| EstimateError::Unavailable("OSRM returned no routes".to_string()))?;

        ensure_positive(meters / METERS_PER_MILE)
    }
}

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    code: String,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    /// Meters.
    distance: f64,
}

/// Tries `primary`, then `secondary` if the first estimate fails.
#[derive(Debug, Clone)]
pub struct FallbackEstimator<P, S> {
    primary: P,
    secondary: S,
}

impl<P, S> FallbackEstimator<P, S> {
    pub fn new(primary: P, secondary: S) -> Self {
        Self { primary, secondary }
    }
}

impl<P: DistanceEstimator, S: DistanceEstimator> DistanceEstimator for FallbackEstimator<P, S> {
    fn estimate_miles(&self, from: &Waypoint, to: &Waypoint) -> Result<f64, EstimateError> {
        self.primary.estimate_miles(from, to).or_else(|err| {
            warn!(
                error = %err,
                from = %from.display_name(),
                to = %to.display_name(),
                "primary distance estimate failed, using fallback"
            );
            self.secondary.estimate_miles(from, to)
        })
    }
}
