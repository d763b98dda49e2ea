//! Cached waypoint directory and free-text location matching.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, warn};

use crate::model::Waypoint;
use crate::route66::StaticWaypoints;
use crate::traits::{LocationResolver, ResolveError, WaypointSource};

/// Which matching rule produced a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    /// "Name, ST"
    DisplayName,
    Name,
    Substring,
}

/// Read-through cache over a waypoint source.
///
/// The dataset is loaded on first use and held until `reset`. A failing or
/// empty source degrades to the fallback list, which is then cached in its
/// place. Concurrent first lookups may both hit the source; the last one to
/// finish wins.
#[derive(Debug)]
pub struct WaypointDirectory<S> {
    source: S,
    fallback: Vec<Waypoint>,
    cache: RwLock<Option<Arc<Vec<Waypoint>>>>,
}

impl<S: WaypointSource> WaypointDirectory<S> {
    /// Uses the built-in Route 66 stops as the fallback.
    pub fn new(source: S) -> Self {
        Self::with_fallback(source, StaticWaypoints::default().waypoints())
    }

    pub fn with_fallback(source: S, fallback: Vec<Waypoint>) -> Self {
        Self {
            source,
            fallback,
            cache: RwLock::new(None),
        }
    }

    /// Returns the cached dataset, loading it if needed.
    pub fn waypoints(&self) -> Arc<Vec<Waypoint>> {
        if let Some(cached) = self.cache.read().unwrap_or_else(PoisonError::into_inner).as_ref() {
            return Arc::clone(cached);
        }

        let loaded = match self.source.load_waypoints() {
            Ok(waypoints) if !waypoints.is_empty() => waypoints,
            Ok(_) => {
                warn!(
                    fallback = self.fallback.len(),
                    "waypoint source returned no rows, using fallback"
                );
                self.fallback.clone()
            }
            Err(err) => {
                warn!(
                    error = %err,
                    fallback = self.fallback.len(),
                    "waypoint source failed, using fallback"
                );
                self.fallback.clone()
            }
        };

        let loaded = Arc::new(loaded);
        *self.cache.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&loaded));
        loaded
    }

    /// Drops the cached dataset so the next lookup reloads it.
    pub fn reset(&self) {
        *self.cache.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn is_loaded(&self) -> bool {
        self.cache.read().unwrap_or_else(PoisonError::into_inner).is_some()
    }

    /// Resolves a name and reports which rule matched.
    pub fn lookup(&self, name: &str) -> Option<(Waypoint, MatchTier)> {
        find_waypoint(&self.waypoints(), name).map(|(waypoint, tier)| (waypoint.clone(), tier))
    }
}

impl<S: WaypointSource> LocationResolver for WaypointDirectory<S> {
    fn resolve(&self, name: &str) -> Result<Waypoint, ResolveError> {
        match self.lookup(name) {
            Some((waypoint, tier)) => {
                debug!(
                    query = name,
                    resolved = %waypoint.display_name(),
                    ?tier,
                    "resolved location"
                );
                Ok(waypoint)
            }
            None => Err(ResolveError::NotFound(name.trim().to_string())),
        }
    }
}

/// Matches `query` against `waypoints`, first hit per tier wins.
pub fn find_waypoint<'a>(
    waypoints: &'a [Waypoint],
    query: &str,
) -> Option<(&'a Waypoint, MatchTier)> {
    let needle = normalize(query);
    if needle.is_empty() {
        return None;
    }

    if let Some((name, state)) = needle.split_once(',') {
        let (name, state) = (name.trim(), state.trim());
        if let Some(hit) = waypoints
            .iter()
            .find(|w| normalize(&w.name) == name && normalize(&w.state) == state)
        {
            return Some((hit, MatchTier::DisplayName));
        }
    }

    if let Some(hit) = waypoints.iter().find(|w| normalize(&w.name) == needle) {
        return Some((hit, MatchTier::Name));
    }

    waypoints
        .iter()
        .find(|w| {
            let name = normalize(&w.name);
            !name.is_empty() && (name.contains(&needle) || needle.contains(&name))
        })
        .map(|hit| (hit, MatchTier::Substring))
}

fn normalize(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::traits::SourceError;

    struct CountingSource {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingSource {
        fn new(fail: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail,
            }
        }
    }

    impl WaypointSource for CountingSource {
        fn load_waypoints(&self) -> Result<Vec<Waypoint>, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(SourceError::Unavailable("offline".to_string()))
            } else {
                Ok(vec![Waypoint::new("Tulsa", "OK", 36.15, -95.99)])
            }
        }
    }

    fn route() -> Vec<Waypoint> {
        StaticWaypoints::default().waypoints()
    }

    #[test]
    fn test_display_name_disambiguates_springfield() {
        let waypoints = route();
        let (hit, tier) = find_waypoint(&waypoints, "springfield, mo").unwrap();
        assert_eq!(hit.state, "MO");
        assert_eq!(tier, MatchTier::DisplayName);
    }

    #[test]
    fn test_name_only_picks_first_in_order() {
        let waypoints = route();
        let (hit, tier) = find_waypoint(&waypoints, "  SPRINGFIELD ").unwrap();
        assert_eq!(hit.state, "IL");
        assert_eq!(tier, MatchTier::Name);
    }

    #[test]
    fn test_unknown_state_falls_through_to_substring() {
        let waypoints = route();
        let (hit, tier) = find_waypoint(&waypoints, "Tulsa, TX").unwrap();
        assert_eq!(hit.display_name(), "Tulsa, OK");
        assert_eq!(tier, MatchTier::Substring);
    }

    #[test]
    fn test_substring_either_direction() {
        let waypoints = route();
        let (hit, _) = find_waypoint(&waypoints, "Downtown Amarillo").unwrap();
        assert_eq!(hit.name, "Amarillo");
        let (hit, tier) = find_waypoint(&waypoints, "Monica").unwrap();
        assert_eq!(hit.name, "Santa Monica");
        assert_eq!(tier, MatchTier::Substring);
    }

    #[test]
    fn test_unresolvable_and_empty() {
        let waypoints = route();
        assert!(find_waypoint(&waypoints, "Atlantis").is_none());
        assert!(find_waypoint(&waypoints, "   ").is_none());
    }

    #[test]
    fn test_directory_caches_until_reset() {
        let directory = WaypointDirectory::new(CountingSource::new(false));
        assert!(!directory.is_loaded());
        assert!(directory.resolve("tulsa").is_ok());
        assert!(directory.resolve("Tulsa, OK").is_ok());
        assert_eq!(directory.source.calls.load(Ordering::SeqCst), 1);

        directory.reset();
        assert!(!directory.is_loaded());
        assert!(directory.resolve("tulsa").is_ok());
        assert_eq!(directory.source.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_failing_source_degrades_to_fallback() {
        let directory = WaypointDirectory::new(CountingSource::new(true));
        let resolved = directory.resolve("Chicago").unwrap();
        assert_eq!(resolved.state, "IL");
        directory.resolve("Gallup").unwrap();
        assert_eq!(directory.source.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_not_found_names_the_query() {
        let directory = WaypointDirectory::new(StaticWaypoints::default());
        assert_eq!(
            directory.resolve(" Atlantis "),
            Err(ResolveError::NotFound("Atlantis".to_string()))
        );
    }
}
