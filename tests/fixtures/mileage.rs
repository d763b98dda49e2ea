//! Pinned road mileages between Route 66 stops.
//!
//! Figures are rounded road distances, chosen so the day budgets in the tests
//! can be worked out by hand.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use ramble_planner::directory::WaypointDirectory;
use ramble_planner::route66::StaticWaypoints;
use ramble_planner::traits::{DistanceEstimator, EstimateError};
use ramble_planner::{TripValidator, Waypoint};

/// Approximate length of the full route.
pub const FULL_ROUTE_MILES: f64 = 2448.0;

pub const LEGS: &[(&str, &str, f64)] = &[
    ("Chicago, IL", "Santa Monica, CA", FULL_ROUTE_MILES),
    ("Tulsa, OK", "Amarillo, TX", 300.0),
    ("Springfield, IL", "Springfield, MO", 290.0),
    ("Chicago, IL", "Springfield, IL", 202.0),
];

/// Symmetric distance table keyed by display name.
#[derive(Debug, Default)]
pub struct MileageTable {
    miles: HashMap<(String, String), f64>,
    pub lookups: AtomicUsize,
}

impl MileageTable {
    pub fn route66() -> Self {
        let mut table = Self::default();
        for (from, to, miles) in LEGS {
            table.insert(from, to, *miles);
        }
        table
    }

    pub fn insert(&mut self, from: &str, to: &str, miles: f64) {
        self.miles.insert((from.to_string(), to.to_string()), miles);
        self.miles.insert((to.to_string(), from.to_string()), miles);
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl DistanceEstimator for MileageTable {
    fn estimate_miles(&self, from: &Waypoint, to: &Waypoint) -> Result<f64, EstimateError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.miles
            .get(&(from.display_name(), to.display_name()))
            .copied()
            .ok_or_else(|| {
                EstimateError::Unavailable(format!(
                    "no mileage for {} -> {}",
                    from.display_name(),
                    to.display_name()
                ))
            })
    }
}

pub type Route66Validator = TripValidator<WaypointDirectory<StaticWaypoints>, MileageTable>;

pub fn route66_validator() -> Route66Validator {
    TripValidator::new(
        WaypointDirectory::new(StaticWaypoints::default()),
        MileageTable::route66(),
    )
}
