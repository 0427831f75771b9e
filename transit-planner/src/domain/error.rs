//! Domain-level error types.

use super::StationCode;

/// Validation and data-consistency errors in the domain layer, distinct
/// from upstream I/O failures (see [`crate::schedule::ScheduleError`] and
/// [`crate::graph::GraphError`]).
#[derive(Debug, Clone, thiserror::Error)]
pub enum DomainError {
    /// A journey was constructed with no segments.
    #[error("journey must have at least one segment")]
    EmptyJourney,

    /// Consecutive segments don't share a station.
    #[error("segment ending at {0} does not connect to segment starting at {1}")]
    SegmentsNotConnected(StationCode, StationCode),

    /// A transport segment's arrival is before its departure.
    #[error("transport segment arrives ({arrival}) before it departs ({departure})")]
    ArrivalBeforeDeparture {
        departure: chrono::DateTime<chrono::Utc>,
        arrival: chrono::DateTime<chrono::Utc>,
    },

    /// A walk segment has non-positive distance.
    #[error("walk distance must be positive, got {0} km")]
    NonPositiveWalkDistance(f64),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn error_display() {
        let err = DomainError::EmptyJourney;
        assert_eq!(err.to_string(), "journey must have at least one segment");

        let a = StationCode::parse("s1").unwrap();
        let b = StationCode::parse("s2").unwrap();
        let err = DomainError::SegmentsNotConnected(a, b);
        assert_eq!(
            err.to_string(),
            "segment ending at s1 does not connect to segment starting at s2"
        );

        let dep = Utc.with_ymd_and_hms(2026, 1, 1, 11, 0, 0).unwrap();
        let arr = Utc.with_ymd_and_hms(2026, 1, 1, 10, 0, 0).unwrap();
        let err = DomainError::ArrivalBeforeDeparture {
            departure: dep,
            arrival: arr,
        };
        assert!(err.to_string().contains("arrives"));

        let err = DomainError::NonPositiveWalkDistance(-0.5);
        assert_eq!(err.to_string(), "walk distance must be positive, got -0.5 km");
    }
}
