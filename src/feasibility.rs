//! Day-budget feasibility scoring.
//!
//! Given a trip distance and a requested number of days, decides whether the
//! request fits under the daily driving ceiling, scores how close it is to the
//! comfortable optimum, and proposes corrective suggestions.

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::model::{OptimizationSuggestion, Priority, SuggestionKind, TripValidationResult};

pub const MAX_DAILY_DRIVE_HOURS: f64 = 10.0;
pub const MIN_DAILY_DRIVE_HOURS: f64 = 2.0;
pub const AVERAGE_SPEED_MPH: f64 = 55.0;
pub const COMFORT_DRIVE_HOURS: f64 = 6.0;

/// Penalty applied when the request is below the minimum day count.
const TOO_SHORT_PENALTY: i32 = 50;
/// Penalty applied when the request exceeds the comfortable maximum.
const TOO_LONG_PENALTY: i32 = 20;
/// The too-long rule never pushes the score below this on its own.
const TOO_LONG_FLOOR: i32 = 60;
/// Largest penalty the proximity measure can apply to a valid trip.
const PROXIMITY_WEIGHT: f64 = 30.0;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DrivingLimits {
    /// Hard daily ceiling; exceeding it makes a trip invalid.
    pub max_daily_drive_hours: f64,
    /// Below this a day is considered wasted.
    pub min_daily_drive_hours: f64,
    pub average_speed_mph: f64,
    /// Target daily drive used for the optimal day count.
    pub comfort_drive_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LimitsError {
    #[error("average speed must be positive, got {0}")]
    Speed(f64),
    #[error("drive hours must satisfy 0 < min ({min}) <= comfort ({comfort}) <= max ({max})")]
    HoursOutOfOrder { min: f64, comfort: f64, max: f64 },
}

impl DrivingLimits {
    /// Checks the ordering the day budget relies on.
    pub fn validate(&self) -> Result<(), LimitsError> {
        if !(self.average_speed_mph.is_finite() && self.average_speed_mph > 0.0) {
            return Err(LimitsError::Speed(self.average_speed_mph));
        }
        let (min, comfort, max) = (
            self.min_daily_drive_hours,
            self.comfort_drive_hours,
            self.max_daily_drive_hours,
        );
        if !(max.is_finite() && min > 0.0 && min <= comfort && comfort <= max) {
            return Err(LimitsError::HoursOutOfOrder { min, comfort, max });
        }
        Ok(())
    }
}

impl Default for DrivingLimits {
    fn default() -> Self {
        Self {
            max_daily_drive_hours: MAX_DAILY_DRIVE_HOURS,
            min_daily_drive_hours: MIN_DAILY_DRIVE_HOURS,
            average_speed_mph: AVERAGE_SPEED_MPH,
            comfort_drive_hours: COMFORT_DRIVE_HOURS,
        }
    }
}

/// Day counts derived from a distance.
///
/// `min_days_needed <= optimal_days <= max_comfortable_days` for any positive
/// distance, given limits with `min <= comfort <= max` hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayBudget {
    pub min_days_needed: u32,
    pub optimal_days: u32,
    pub max_comfortable_days: u32,
}

impl DayBudget {
    pub fn for_distance(distance_miles: f64, limits: &DrivingLimits) -> Self {
        let days_at = |hours: f64| ceil_days(distance_miles, hours * limits.average_speed_mph);
        Self {
            min_days_needed: days_at(limits.max_daily_drive_hours),
            optimal_days: days_at(limits.comfort_drive_hours),
            max_comfortable_days: days_at(limits.min_daily_drive_hours),
        }
    }
}

fn ceil_days(distance_miles: f64, miles_per_day: f64) -> u32 {
    (distance_miles / miles_per_day).ceil() as u32
}

#[derive(Debug, Clone, Default)]
pub struct FeasibilityCalculator {
    limits: DrivingLimits,
}

impl FeasibilityCalculator {
    pub fn new(limits: DrivingLimits) -> Result<Self, LimitsError> {
        limits.validate()?;
        Ok(Self { limits })
    }

    pub fn day_budget(&self, distance_miles: f64) -> DayBudget {
        DayBudget::for_distance(distance_miles, &self.limits)
    }

    /// Average miles driven per day.
    pub fn daily_miles(&self, distance_miles: f64, days: u32) -> f64 {
        distance_miles / f64::from(days.max(1))
    }

    /// Average hours behind the wheel per day.
    pub fn daily_hours(&self, distance_miles: f64, days: u32) -> f64 {
        self.daily_miles(distance_miles, days) / self.limits.average_speed_mph
    }

    /// Scores `requested_days` against a known positive distance.
    pub fn evaluate(&self, distance_miles: f64, requested_days: u32) -> TripValidationResult {
        let budget = self.day_budget(distance_miles);
        let miles = distance_miles.round();
        debug!(
            distance_miles,
            requested_days,
            min_days = budget.min_days_needed,
            optimal_days = budget.optimal_days,
            max_days = budget.max_comfortable_days,
            "computed day budget"
        );

        let mut result = TripValidationResult::passing();
        let mut score: i32 = 100;
        let mut too_short = false;

        if requested_days < budget.min_days_needed {
            too_short = true;
            result.is_valid = false;
            result.issues.push(format!(
                "Trip requires at least {} days to cover {} miles without exceeding {} hours \
                 of driving per day ({} days would mean {:.0} miles, {:.1} hours, per day)",
                budget.min_days_needed,
                miles,
                self.limits.max_daily_drive_hours,
                requested_days,
                self.daily_miles(distance_miles, requested_days),
                self.daily_hours(distance_miles, requested_days),
            ));
            score = clamp_score(score - TOO_SHORT_PENALTY);
            result.optimization_suggestions.push(OptimizationSuggestion {
                kind: SuggestionKind::IncreaseDays,
                title: format!("Extend to {} days", budget.min_days_needed),
                description: format!(
                    "Add {} day(s) so no single day exceeds {} hours of driving",
                    budget.min_days_needed - requested_days,
                    self.limits.max_daily_drive_hours,
                ),
                action_value: Some(budget.min_days_needed),
                priority: Priority::High,
            });
        }

        if requested_days > budget.max_comfortable_days {
            result.recommendations.push(format!(
                "{} days leaves about {:.0} miles ({:.1} hours) of driving per day, under the \
                 {} hour minimum; consider {} days for {} miles",
                requested_days,
                self.daily_miles(distance_miles, requested_days),
                self.daily_hours(distance_miles, requested_days),
                self.limits.min_daily_drive_hours,
                budget.optimal_days,
                miles,
            ));
            score = clamp_score(score.min((score - TOO_LONG_PENALTY).max(TOO_LONG_FLOOR)));
            result.optimization_suggestions.push(OptimizationSuggestion {
                kind: SuggestionKind::DecreaseDays,
                title: format!("Shorten to {} days", budget.optimal_days),
                description: format!(
                    "About {} hours of driving per day keeps the trip moving without idle days",
                    self.limits.comfort_drive_hours,
                ),
                action_value: Some(budget.optimal_days),
                priority: Priority::Medium,
            });
        }

        if result.is_valid {
            score = score.min(proximity_score(requested_days, &budget));
        }

        result.suggested_days = Some(budget.optimal_days);

        if result.is_valid && requested_days != budget.optimal_days {
            result.optimization_suggestions.push(OptimizationSuggestion {
                kind: SuggestionKind::OptimizeRoute,
                title: "Generate optimal itinerary".to_string(),
                description: format!(
                    "Plan the trip over {} days for about {} hours of driving per day",
                    budget.optimal_days, self.limits.comfort_drive_hours,
                ),
                action_value: Some(budget.optimal_days),
                priority: Priority::Low,
            });
        }

        if too_short {
            result.optimization_suggestions.push(OptimizationSuggestion {
                kind: SuggestionKind::ChangeCities,
                title: "Choose closer endpoints".to_string(),
                description: format!(
                    "Pick a start or end point that fits {} days of driving",
                    requested_days
                ),
                action_value: None,
                priority: Priority::Medium,
            });
        }

        // Vec::sort_by_key is stable, so insertion order holds within a priority.
        result.optimization_suggestions.sort_by_key(|suggestion| suggestion.priority);
        result.can_be_optimized = !result.optimization_suggestions.is_empty();
        result.feasibility_score = clamp_score(score) as u8;
        result
    }
}

/// 100 at the optimum, falling linearly to 70 at the widest valid spread.
fn proximity_score(requested_days: u32, budget: &DayBudget) -> i32 {
    let days_difference = f64::from(requested_days.abs_diff(budget.optimal_days));
    let max_difference = budget
        .optimal_days
        .saturating_sub(budget.min_days_needed)
        .max(budget.max_comfortable_days.saturating_sub(budget.optimal_days));
    if max_difference == 0 {
        return 100;
    }
    let spread = days_difference / f64::from(max_difference);
    let proximity = (100.0 - spread * PROXIMITY_WEIGHT).max(0.0);
    proximity.round() as i32
}

fn clamp_score(score: i32) -> i32 {
    score.clamp(0, 100)
}
