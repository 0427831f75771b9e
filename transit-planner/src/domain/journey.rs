//! Journeys assembled from walk and transport segments.

use chrono::{DateTime, Utc};

use super::{DomainError, StationCode};

/// A single on-foot connection between two stations.
#[derive(Debug, Clone, PartialEq)]
pub struct Walk {
    pub from: StationCode,
    pub to: StationCode,
    pub distance_km: f64,
}

/// A single scheduled ride on one vehicle between two consecutive stops.
#[derive(Debug, Clone, PartialEq)]
pub struct Transport {
    pub from: StationCode,
    pub to: StationCode,
    pub thread_uid: String,
    pub departure: DateTime<Utc>,
    pub arrival: DateTime<Utc>,
}

/// One leg of a journey: either on foot or aboard a vehicle.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Walk(Walk),
    Transport(Transport),
}

impl Segment {
    pub fn origin(&self) -> &StationCode {
        match self {
            Segment::Walk(w) => &w.from,
            Segment::Transport(t) => &t.from,
        }
    }

    pub fn destination(&self) -> &StationCode {
        match self {
            Segment::Walk(w) => &w.to,
            Segment::Transport(t) => &t.to,
        }
    }

    pub fn is_walk(&self) -> bool {
        matches!(self, Segment::Walk(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Segment::Transport(_))
    }

    pub fn as_walk(&self) -> Option<&Walk> {
        match self {
            Segment::Walk(w) => Some(w),
            Segment::Transport(_) => None,
        }
    }

    pub fn as_transport(&self) -> Option<&Transport> {
        match self {
            Segment::Transport(t) => Some(t),
            Segment::Walk(_) => None,
        }
    }
}

/// A validated, ordered sequence of segments from one station to another.
///
/// ```
/// # use transit_planner::domain::{Journey, Segment, Transport, StationCode};
/// # use chrono::{TimeZone, Utc};
/// let a = StationCode::parse("a").unwrap();
/// let b = StationCode::parse("b").unwrap();
/// let dep = Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap();
/// let arr = Utc.with_ymd_and_hms(2026, 1, 1, 9, 30, 0).unwrap();
/// let journey = Journey::new(vec![Segment::Transport(Transport {
///     from: a, to: b, thread_uid: "t1".to_string(), departure: dep, arrival: arr,
/// })]).unwrap();
/// assert_eq!(journey.segment_count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Journey {
    segments: Vec<Segment>,
}

impl Journey {
    /// Validate and construct a journey from an ordered list of segments.
    ///
    /// Rejects an empty list, segments whose endpoints don't chain, and
    /// transport segments with non-positive duration.
    pub fn new(segments: Vec<Segment>) -> Result<Self, DomainError> {
        if segments.is_empty() {
            return Err(DomainError::EmptyJourney);
        }
        for pair in segments.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if prev.destination() != next.origin() {
                return Err(DomainError::SegmentsNotConnected(
                    prev.destination().clone(),
                    next.origin().clone(),
                ));
            }
        }
        for segment in &segments {
            if let Segment::Transport(t) = segment {
                if t.arrival <= t.departure {
                    return Err(DomainError::ArrivalBeforeDeparture {
                        departure: t.departure,
                        arrival: t.arrival,
                    });
                }
            }
            if let Segment::Walk(w) = segment {
                if w.distance_km <= 0.0 {
                    return Err(DomainError::NonPositiveWalkDistance(w.distance_km));
                }
            }
        }
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn origin(&self) -> &StationCode {
        self.segments.first().expect("non-empty by construction").origin()
    }

    pub fn destination(&self) -> &StationCode {
        self.segments.last().expect("non-empty by construction").destination()
    }

    /// Departure time of the first transport segment, if any.
    pub fn departure_time(&self) -> Option<DateTime<Utc>> {
        self.segments.iter().find_map(|s| s.as_transport().map(|t| t.departure))
    }

    /// Arrival time of the last transport segment, if any.
    pub fn arrival_time(&self) -> Option<DateTime<Utc>> {
        self.segments.iter().rev().find_map(|s| s.as_transport().map(|t| t.arrival))
    }

    /// Number of vehicle changes: one fewer than the number of transport segments.
    pub fn change_count(&self) -> usize {
        let transports = self.segments.iter().filter(|s| s.is_transport()).count();
        transports.saturating_sub(1)
    }

    pub fn walk_count(&self) -> usize {
        self.segments.iter().filter(|s| s.is_walk()).count()
    }

    pub fn total_walk_distance_km(&self) -> f64 {
        self.segments.iter().filter_map(|s| s.as_walk()).map(|w| w.distance_km).sum()
    }

    pub fn is_direct(&self) -> bool {
        self.segments.iter().filter(|s| s.is_transport()).count() <= 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn code(s: &str) -> StationCode {
        StationCode::parse(s).unwrap()
    }

    fn transport(from: &str, to: &str, dep_h: u32, arr_h: u32) -> Segment {
        Segment::Transport(Transport {
            from: code(from),
            to: code(to),
            thread_uid: format!("{from}-{to}"),
            departure: Utc.with_ymd_and_hms(2026, 1, 1, dep_h, 0, 0).unwrap(),
            arrival: Utc.with_ymd_and_hms(2026, 1, 1, arr_h, 0, 0).unwrap(),
        })
    }

    fn walk(from: &str, to: &str, km: f64) -> Segment {
        Segment::Walk(Walk { from: code(from), to: code(to), distance_km: km })
    }

    #[test]
    fn rejects_empty() {
        assert!(matches!(Journey::new(vec![]), Err(DomainError::EmptyJourney)));
    }

    #[test]
    fn rejects_disconnected_segments() {
        let segs = vec![transport("a", "b", 9, 10), transport("c", "d", 11, 12)];
        assert!(matches!(
            Journey::new(segs),
            Err(DomainError::SegmentsNotConnected(_, _))
        ));
    }

    #[test]
    fn rejects_non_positive_walk() {
        let segs = vec![walk("a", "b", 0.0)];
        assert!(matches!(
            Journey::new(segs),
            Err(DomainError::NonPositiveWalkDistance(_))
        ));
    }

    #[test]
    fn rejects_backwards_transport() {
        let segs = vec![transport("a", "b", 10, 9)];
        assert!(matches!(
            Journey::new(segs),
            Err(DomainError::ArrivalBeforeDeparture { .. })
        ));
    }

    #[test]
    fn accepts_mixed_chain_and_reports_accessors() {
        let segs = vec![walk("a", "b", 0.5), transport("b", "c", 9, 10), transport("c", "d", 10, 11)];
        let journey = Journey::new(segs).unwrap();
        assert_eq!(journey.origin().as_str(), "a");
        assert_eq!(journey.destination().as_str(), "d");
        assert_eq!(journey.change_count(), 1);
        assert_eq!(journey.walk_count(), 1);
        assert!((journey.total_walk_distance_km() - 0.5).abs() < 1e-9);
        assert!(!journey.is_direct());
        assert_eq!(
            journey.departure_time().unwrap(),
            Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap()
        );
        assert_eq!(
            journey.arrival_time().unwrap(),
            Utc.with_ymd_and_hms(2026, 1, 1, 11, 0, 0).unwrap()
        );
    }

    #[test]
    fn single_transport_is_direct() {
        let journey = Journey::new(vec![transport("a", "b", 9, 10)]).unwrap();
        assert!(journey.is_direct());
        assert_eq!(journey.change_count(), 0);
    }
}
