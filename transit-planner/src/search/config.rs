//! Search configuration for the bidirectional A* core.

use chrono::Duration;

/// Tuning parameters for one journey search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Radius, in km, within which two stations are considered walkable.
    pub walk_radius_km: f64,

    /// Assumed walking speed, expressed as seconds per kilometre.
    pub walk_seconds_per_km: f64,

    /// Fallback cost-per-km ratio used for transport edges in `cost` mode.
    pub transport_ratio: f64,

    /// How far beyond the query instant (in hours) to search for
    /// connections before giving up on a frontier.
    pub horizon_hours: i64,

    /// Upper bound on the number of stations batched into one parallel
    /// materialisation fan-out.
    pub batch_size: usize,

    /// Wall-clock budget for one search call.
    pub deadline: std::time::Duration,
}

impl SearchConfig {
    pub fn new(
        walk_radius_km: f64,
        walk_seconds_per_km: f64,
        transport_ratio: f64,
        horizon_hours: i64,
        batch_size: usize,
        deadline: std::time::Duration,
    ) -> Self {
        Self {
            walk_radius_km,
            walk_seconds_per_km,
            transport_ratio,
            horizon_hours,
            batch_size,
            deadline,
        }
    }

    pub fn horizon(&self) -> Duration {
        Duration::hours(self.horizon_hours)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            walk_radius_km: 1.0,
            walk_seconds_per_km: 720.0,
            transport_ratio: 1.0,
            horizon_hours: 48,
            batch_size: 8,
            deadline: std::time::Duration::from_secs(30),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = SearchConfig::default();
        assert_eq!(config.walk_radius_km, 1.0);
        assert_eq!(config.walk_seconds_per_km, 720.0);
        assert_eq!(config.transport_ratio, 1.0);
        assert_eq!(config.horizon_hours, 48);
        assert_eq!(config.batch_size, 8);
    }

    #[test]
    fn horizon_duration() {
        let config = SearchConfig::default();
        assert_eq!(config.horizon(), Duration::hours(48));
    }

    #[test]
    fn custom_config() {
        let config = SearchConfig::new(2.0, 600.0, 1.5, 24, 16, std::time::Duration::from_secs(10));
        assert_eq!(config.walk_radius_km, 2.0);
        assert_eq!(config.horizon_hours, 24);
    }
}
