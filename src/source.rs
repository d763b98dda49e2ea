//! HTTP adapter for a hosted waypoint table.
//!
//! The hosted table has accumulated records with inconsistent field names, so
//! decoding goes through a loose record type and is normalized into `Waypoint`
//! here. Nothing past this module sees the raw shape.

use serde::Deserialize;
use tracing::{debug, warn};

use crate::model::Waypoint;
use crate::traits::{SourceError, WaypointSource};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpSourceConfig {
    /// Full URL of the endpoint returning a JSON array of records.
    pub url: String,
    /// Sent as the `apikey` header when present.
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for HttpSourceConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:54321/rest/v1/route66_waypoints?select=*".to_string(),
            api_key: None,
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpWaypointSource {
    config: HttpSourceConfig,
    client: reqwest::blocking::Client,
}

impl HttpWaypointSource {
    pub fn new(config: HttpSourceConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }
}

impl WaypointSource for HttpWaypointSource {
    fn load_waypoints(&self) -> Result<Vec<Waypoint>, SourceError> {
        let mut request = self.client.get(&self.config.url);
        if let Some(key) = &self.config.api_key {
            request = request.header("apikey", key).bearer_auth(key);
        }

        let body = request.send()?.error_for_status()?.text()?;
        let waypoints = decode_records(&body)?;
        debug!(count = waypoints.len(), url = %self.config.url, "loaded waypoints");
        Ok(waypoints)
    }
}

/// A waypoint row as stored remotely.
#[derive(Debug, Default, Deserialize)]
struct RawWaypointRecord {
    #[serde(alias = "city_name", alias = "city")]
    name: Option<String>,
    #[serde(alias = "state_code")]
    state: Option<String>,
    #[serde(alias = "lat")]
    latitude: Option<f64>,
    #[serde(alias = "lng", alias = "lon")]
    longitude: Option<f64>,
}

impl RawWaypointRecord {
    fn normalize(self) -> Option<Waypoint> {
        let name = self.name?.trim().to_string();
        let state = self.state?.trim().to_uppercase();
        if name.is_empty() || state.is_empty() {
            return None;
        }
        let (lat, lng) = (self.latitude?, self.longitude?);
        if !valid_coordinates(lat, lng) {
            return None;
        }
        Some(Waypoint::new(name, state, lat, lng))
    }
}

fn valid_coordinates(lat: f64, lng: f64) -> bool {
    (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng)
}

/// Decodes a JSON array of loosely shaped records, skipping unusable rows.
pub fn decode_records(body: &str) -> Result<Vec<Waypoint>, SourceError> {
    let records: Vec<RawWaypointRecord> = serde_json::from_str(body)?;
    let total = records.len();
    let waypoints: Vec<Waypoint> = records
        .into_iter()
        .filter_map(RawWaypointRecord::normalize)
        .collect();
    if waypoints.len() < total {
        warn!(
            skipped = total - waypoints.len(),
            "dropped waypoint records without name, state or coordinates"
        );
    }
    Ok(waypoints)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_accepts_field_aliases() {
        let body = r#"[
            {"name": "Tulsa", "state": "OK", "latitude": 36.15, "longitude": -95.99},
            {"city_name": " Amarillo ", "state_code": "tx", "lat": 35.22, "lng": -101.83},
            {"city": "Kingman", "state": "AZ", "lat": 35.19, "lon": -114.05}
        ]"#;
        let waypoints = decode_records(body).unwrap();
        assert_eq!(waypoints.len(), 3);
        assert_eq!(waypoints[1].display_name(), "Amarillo, TX");
        assert_eq!(waypoints[2].coordinates, (35.19, -114.05));
    }

    #[test]
    fn test_decode_skips_records_missing_identity() {
        let body = r#"[
            {"name": "Gallup"},
            {"state": "NM"},
            {"name": "  ", "state": "NM"},
            {"name": "Gallup", "state": "NM", "id": 7, "lat": 35.53, "lng": -108.74}
        ]"#;
        let waypoints = decode_records(body).unwrap();
        assert_eq!(waypoints.len(), 1);
        assert_eq!(waypoints[0].name, "Gallup");
    }

    #[test]
    fn test_decode_skips_records_without_usable_coordinates() {
        let body = r#"[
            {"name": "Tulsa", "state": "OK"},
            {"name": "Joplin", "state": "MO", "lat": 37.08},
            {"name": "Rolla", "state": "MO", "lat": 137.95, "lng": -91.77},
            {"name": "Amarillo", "state": "TX", "lat": 35.22, "lng": -101.83}
        ]"#;
        let waypoints = decode_records(body).unwrap();
        assert_eq!(waypoints.len(), 1);
        assert_eq!(waypoints[0].display_name(), "Amarillo, TX");
    }

    #[test]
    fn test_record_without_coordinates_is_not_resolvable() {
        use crate::directory::WaypointDirectory;
        use crate::haversine::HaversineEstimator;
        use crate::traits::LocationResolver;
        use crate::validation::TripValidator;

        struct Decoded;

        impl WaypointSource for Decoded {
            fn load_waypoints(&self) -> Result<Vec<Waypoint>, SourceError> {
                decode_records(
                    r#"[
                        {"name": "Tulsa", "state": "OK"},
                        {"name": "Amarillo", "state": "TX", "lat": 35.22, "lng": -101.83}
                    ]"#,
                )
            }
        }

        let directory = WaypointDirectory::with_fallback(Decoded, Vec::new());
        assert!(directory.resolve("Tulsa").is_err());

        let validator = TripValidator::new(directory, HaversineEstimator::default());
        let result = validator.validate_trip("Tulsa", "Amarillo", 1);
        assert!(!result.is_valid);
        assert!(result.issues[0].contains("Tulsa"));
        assert!(result.suggested_days.is_none());
    }

    #[test]
    fn test_decode_rejects_non_array() {
        let err = decode_records(r#"{"error": "permission denied"}"#).unwrap_err();
        assert!(matches!(err, SourceError::Decode(_)));
    }

    #[test]
    fn test_unreachable_source_errors() {
        let source = HttpWaypointSource::new(HttpSourceConfig {
            url: "http://127.0.0.1:9/waypoints".to_string(),
            api_key: None,
            timeout_secs: 1,
        })
        .unwrap();
        assert!(matches!(source.load_waypoints(), Err(SourceError::Http(_))));
    }
}
