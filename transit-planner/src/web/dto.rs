//! Data transfer objects for the web layer.

use serde::{Deserialize, Serialize};

use crate::domain::{Journey, Mode, Segment};

/// `POST /journey/plan` request body.
#[derive(Debug, Deserialize)]
pub struct PlanJourneyRequest {
    pub origin_settlement: String,
    pub destination_settlement: String,
    /// RFC 3339 instant, e.g. `2026-01-01T09:00:00Z`.
    pub start_instant: chrono::DateTime<chrono::Utc>,
    pub mode: Mode,
}

/// One segment of a planned itinerary.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SegmentDto {
    Walk {
        from: String,
        to: String,
        distance_km: f64,
    },
    Transport {
        from: String,
        to: String,
        thread_uid: String,
        departure: chrono::DateTime<chrono::Utc>,
        arrival: chrono::DateTime<chrono::Utc>,
    },
}

impl SegmentDto {
    fn from_segment(segment: &Segment) -> Self {
        match segment {
            Segment::Walk(w) => SegmentDto::Walk {
                from: w.from.as_str().to_string(),
                to: w.to.as_str().to_string(),
                distance_km: w.distance_km,
            },
            Segment::Transport(t) => SegmentDto::Transport {
                from: t.from.as_str().to_string(),
                to: t.to.as_str().to_string(),
                thread_uid: t.thread_uid.clone(),
                departure: t.departure,
                arrival: t.arrival,
            },
        }
    }
}

/// `POST /journey/plan` response body: the itinerary's edge list, plus a
/// few convenience summary fields. Station codes, not names — name
/// resolution for display is an external collaborator's job.
#[derive(Debug, Serialize)]
pub struct JourneyResponse {
    pub segments: Vec<SegmentDto>,
    pub departure_time: Option<chrono::DateTime<chrono::Utc>>,
    pub arrival_time: Option<chrono::DateTime<chrono::Utc>>,
    pub change_count: usize,
    pub walk_count: usize,
}

impl JourneyResponse {
    pub fn from_journey(journey: &Journey) -> Self {
        Self {
            segments: journey.segments().iter().map(SegmentDto::from_segment).collect(),
            departure_time: journey.departure_time(),
            arrival_time: journey.arrival_time(),
            change_count: journey.change_count(),
            walk_count: journey.walk_count(),
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
