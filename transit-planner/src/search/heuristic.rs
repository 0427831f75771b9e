//! Great-circle heuristic for the A* search.
//!
//! In `time` mode the heuristic is expressed in raw kilometres, not
//! converted to seconds; it is therefore not a strictly admissible
//! estimate of remaining travel time, only a best-effort guide for search
//! ordering, matching the source's behaviour.

use std::collections::HashMap;

use crate::domain::StationCode;

const EARTH_RADIUS_KM: f64 = 6371.0;

pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (lat1, lon1, lat2, lon2) = (
        lat1.to_radians(),
        lon1.to_radians(),
        lat2.to_radians(),
        lon2.to_radians(),
    );
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();
    EARTH_RADIUS_KM * c
}

/// Lookup of station coordinates, built once per search from the
/// catalogue so the hot loop never re-queries it.
pub struct LatLonCache {
    coords: HashMap<StationCode, (f64, f64)>,
}

impl LatLonCache {
    pub fn new(coords: HashMap<StationCode, (f64, f64)>) -> Self {
        Self { coords }
    }

    /// The minimum great-circle distance from `station` to any station
    /// in `targets`, or 0.0 if coordinates are missing for either side.
    pub fn heuristic_km(&self, station: &StationCode, targets: &[StationCode]) -> f64 {
        let Some(&(lat1, lon1)) = self.coords.get(station) else {
            return 0.0;
        };
        let mut best = f64::INFINITY;
        for target in targets {
            if let Some(&(lat2, lon2)) = self.coords.get(target) {
                let dist = haversine_km(lat1, lon1, lat2, lon2);
                if dist < best {
                    best = dist;
                }
            }
        }
        if best.is_finite() { best } else { 0.0 }
    }

    pub fn edge_distance_km(&self, a: &StationCode, b: &StationCode) -> f64 {
        match (self.coords.get(a), self.coords.get(b)) {
            (Some(&(lat1, lon1)), Some(&(lat2, lon2))) => haversine_km(lat1, lon1, lat2, lon2),
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> StationCode {
        StationCode::parse(s).unwrap()
    }

    #[test]
    fn haversine_zero_for_same_point() {
        assert!(haversine_km(51.5, -0.1, 51.5, -0.1).abs() < 1e-9);
    }

    #[test]
    fn heuristic_picks_nearest_target() {
        let mut coords = HashMap::new();
        coords.insert(code("a"), (0.0, 0.0));
        coords.insert(code("b"), (0.0, 1.0));
        coords.insert(code("c"), (0.0, 50.0));
        let cache = LatLonCache::new(coords);

        let dist = cache.heuristic_km(&code("a"), &[code("b"), code("c")]);
        let expected = haversine_km(0.0, 0.0, 0.0, 1.0);
        assert!((dist - expected).abs() < 1e-6);
    }

    #[test]
    fn heuristic_missing_coords_is_zero() {
        let cache = LatLonCache::new(HashMap::new());
        assert_eq!(cache.heuristic_km(&code("a"), &[code("b")]), 0.0);
    }
}
