//! Request and result types shared by the engine and its callers.

use serde::{Deserialize, Serialize};

/// A canonical named stop usable as a trip endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub name: String,
    /// Two-letter state code, e.g. "MO".
    pub state: String,
    /// (latitude, longitude)
    pub coordinates: (f64, f64),
}

impl Waypoint {
    pub fn new(name: impl Into<String>, state: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            name: name.into(),
            state: state.into(),
            coordinates: (lat, lng),
        }
    }

    /// "Name, ST"
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.name, self.state)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripRequest {
    pub start_location: String,
    pub end_location: String,
    pub requested_days: i64,
}

impl TripRequest {
    pub fn new(start: impl Into<String>, end: impl Into<String>, requested_days: i64) -> Self {
        Self {
            start_location: start.into(),
            end_location: end.into(),
            requested_days,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    IncreaseDays,
    DecreaseDays,
    ChangeCities,
    OptimizeRoute,
}

/// Presentation priority. Ordering puts `High` first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizationSuggestion {
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    pub title: String,
    pub description: String,
    /// Day count the suggestion proposes, if it has a single numeric target.
    pub action_value: Option<u32>,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripValidationResult {
    pub is_valid: bool,
    pub issues: Vec<String>,
    pub recommendations: Vec<String>,
    /// Always within 0..=100.
    pub feasibility_score: u8,
    pub suggested_days: Option<u32>,
    pub can_be_optimized: bool,
    pub optimization_suggestions: Vec<OptimizationSuggestion>,
}

impl TripValidationResult {
    /// A fresh result before any rule has been applied.
    pub fn passing() -> Self {
        Self {
            is_valid: true,
            issues: Vec::new(),
            recommendations: Vec::new(),
            feasibility_score: 100,
            suggested_days: None,
            can_be_optimized: false,
            optimization_suggestions: Vec::new(),
        }
    }

    /// A result carrying a single blocking issue and nothing else.
    pub fn blocked(issue: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            issues: vec![issue.into()],
            feasibility_score: 0,
            ..Self::passing()
        }
    }

    pub fn suggestions_of(
        &self,
        kind: SuggestionKind,
    ) -> impl Iterator<Item = &OptimizationSuggestion> {
        self.optimization_suggestions
            .iter()
            .filter(move |suggestion| suggestion.kind == kind)
    }
}
