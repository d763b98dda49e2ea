//! Built-in Route 66 stops, used when no dynamic dataset is reachable.
//!
//! Ordered east to west. Resolution ties pick the first match, so the order is
//! part of the lookup behavior.

use crate::model::Waypoint;
use crate::traits::{SourceError, WaypointSource};

/// A compile-time waypoint record.
#[derive(Debug, Clone, Copy)]
pub struct Stop {
    pub name: &'static str,
    pub state: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Stop {
    pub const fn new(name: &'static str, state: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, state, lat, lng }
    }

    pub fn to_waypoint(&self) -> Waypoint {
        Waypoint::new(self.name, self.state, self.lat, self.lng)
    }
}

pub const ROUTE_66_STOPS: &[Stop] = &[
    Stop::new("Chicago", "IL", 41.8781, -87.6298),
    Stop::new("Joliet", "IL", 41.5250, -88.0817),
    Stop::new("Pontiac", "IL", 40.8808, -88.6298),
    Stop::new("Bloomington", "IL", 40.4842, -88.9937),
    Stop::new("Springfield", "IL", 39.7817, -89.6501),
    Stop::new("St. Louis", "MO", 38.6270, -90.1994),
    Stop::new("Cuba", "MO", 38.0628, -91.4035),
    Stop::new("Rolla", "MO", 37.9514, -91.7713),
    Stop::new("Springfield", "MO", 37.2090, -93.2923),
    Stop::new("Joplin", "MO", 37.0842, -94.5133),
    Stop::new("Galena", "KS", 37.0759, -94.6391),
    Stop::new("Miami", "OK", 36.8745, -94.8775),
    Stop::new("Tulsa", "OK", 36.1540, -95.9928),
    Stop::new("Oklahoma City", "OK", 35.4676, -97.5164),
    Stop::new("Elk City", "OK", 35.4120, -99.4043),
    Stop::new("Shamrock", "TX", 35.2142, -100.2490),
    Stop::new("Amarillo", "TX", 35.2220, -101.8313),
    Stop::new("Tucumcari", "NM", 35.1717, -103.7250),
    Stop::new("Santa Rosa", "NM", 34.9387, -104.6825),
    Stop::new("Albuquerque", "NM", 35.0844, -106.6504),
    Stop::new("Gallup", "NM", 35.5281, -108.7426),
    Stop::new("Holbrook", "AZ", 34.9022, -110.1582),
    Stop::new("Winslow", "AZ", 35.0242, -110.6974),
    Stop::new("Flagstaff", "AZ", 35.1983, -111.6513),
    Stop::new("Williams", "AZ", 35.2495, -112.1910),
    Stop::new("Seligman", "AZ", 35.3256, -112.8774),
    Stop::new("Kingman", "AZ", 35.1894, -114.0530),
    Stop::new("Oatman", "AZ", 35.0264, -114.3838),
    Stop::new("Needles", "CA", 34.8481, -114.6141),
    Stop::new("Barstow", "CA", 34.8958, -117.0173),
    Stop::new("San Bernardino", "CA", 34.1083, -117.2898),
    Stop::new("Pasadena", "CA", 34.1478, -118.1445),
    Stop::new("Santa Monica", "CA", 34.0195, -118.4912),
];

/// Serves a fixed slice of stops as the waypoint dataset.
#[derive(Debug, Clone, Copy)]
pub struct StaticWaypoints {
    stops: &'static [Stop],
}

impl StaticWaypoints {
    pub const fn new(stops: &'static [Stop]) -> Self {
        Self { stops }
    }

    pub fn waypoints(&self) -> Vec<Waypoint> {
        self.stops.iter().map(Stop::to_waypoint).collect()
    }
}

impl Default for StaticWaypoints {
    fn default() -> Self {
        Self::new(ROUTE_66_STOPS)
    }
}

impl WaypointSource for StaticWaypoints {
    fn load_waypoints(&self) -> Result<Vec<Waypoint>, SourceError> {
        Ok(self.waypoints())
    }
}
