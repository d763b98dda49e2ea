//! Trip validation entry point.
//!
//! Resolves both endpoints, estimates the mileage between them and hands the
//! result to the feasibility calculator. Every collaborator failure becomes an
//! issue on the returned result; validation itself cannot fail.

use rayon::prelude::*;
use tracing::{info, warn};

use crate::feasibility::FeasibilityCalculator;
use crate::model::{TripRequest, TripValidationResult, Waypoint};
use crate::traits::{DistanceEstimator, LocationResolver, ResolveError, ensure_positive};

pub struct TripValidator<R, D> {
    resolver: R,
    estimator: D,
    calculator: FeasibilityCalculator,
}

impl<R, D> TripValidator<R, D>
where
    R: LocationResolver,
    D: DistanceEstimator,
{
    pub fn new(resolver: R, estimator: D) -> Self {
        Self::with_calculator(resolver, estimator, FeasibilityCalculator::default())
    }

    pub fn with_calculator(resolver: R, estimator: D, calculator: FeasibilityCalculator) -> Self {
        Self {
            resolver,
            estimator,
            calculator,
        }
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub fn estimator(&self) -> &D {
        &self.estimator
    }

    pub fn validate_trip(
        &self,
        start: &str,
        end: &str,
        requested_days: i64,
    ) -> TripValidationResult {
        let days = match u32::try_from(requested_days) {
            Ok(days) if days >= 1 => days,
            _ => {
                return TripValidationResult::blocked(format!(
                    "Trip length must be a positive number of days, got {}",
                    requested_days
                ));
            }
        };

        let from = match self.resolve(start) {
            Ok(waypoint) => waypoint,
            Err(issue) => return TripValidationResult::blocked(issue),
        };
        let to = match self.resolve(end) {
            Ok(waypoint) => waypoint,
            Err(issue) => return TripValidationResult::blocked(issue),
        };

        let distance = match self
            .estimator
            .estimate_miles(&from, &to)
            .and_then(ensure_positive)
        {
            Ok(miles) => miles,
            Err(err) => {
                warn!(
                    error = %err,
                    from = %from.display_name(),
                    to = %to.display_name(),
                    "distance unavailable"
                );
                return TripValidationResult::blocked(format!(
                    "Could not calculate route distance from {} to {}",
                    from.display_name(),
                    to.display_name()
                ));
            }
        };

        let result = self.calculator.evaluate(distance, days);
        info!(
            from = %from.display_name(),
            to = %to.display_name(),
            distance_miles = distance.round(),
            requested_days = days,
            valid = result.is_valid,
            score = result.feasibility_score,
            "validated trip"
        );
        result
    }

    pub fn validate_request(&self, request: &TripRequest) -> TripValidationResult {
        self.validate_trip(&request.start_location, &request.end_location, request.requested_days)
    }

    fn resolve(&self, name: &str) -> Result<Waypoint, String> {
        self.resolver.resolve(name).map_err(|err| {
            warn!(error = %err, "endpoint unresolved");
            match err {
                ResolveError::NotFound(_) => {
                    format!("Could not find location \"{}\" on the route", name.trim())
                }
                ResolveError::Unavailable(reason) => {
                    format!("Could not look up location \"{}\": {}", name.trim(), reason)
                }
            }
        })
    }
}

impl<R, D> TripValidator<R, D>
where
    R: LocationResolver + Sync,
    D: DistanceEstimator + Sync,
{
    /// Validates independent requests in parallel, preserving input order.
    pub fn validate_batch(&self, requests: &[TripRequest]) -> Vec<TripValidationResult> {
        requests
            .par_iter()
            .map(|request| self.validate_request(request))
            .collect()
    }
}
