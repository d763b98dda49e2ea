//! ramble-planner
//!
//! Road-trip feasibility engine: resolves trip endpoints against a waypoint
//! directory, estimates the drive between them, and scores a requested day
//! count against daily driving limits.

pub mod traits;
pub mod model;
pub mod feasibility;
pub mod validation;
pub mod directory;
pub mod route66;
pub mod source;
pub mod osrm;
pub mod haversine;

pub use feasibility::{DayBudget, DrivingLimits, FeasibilityCalculator, LimitsError};
pub use model::{
    OptimizationSuggestion, Priority, SuggestionKind, TripRequest, TripValidationResult, Waypoint,
};
pub use validation::TripValidator;
