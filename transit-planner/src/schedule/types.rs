//! DTOs for the schedule source's `/schedule` and `/thread` endpoints.

use serde::Deserialize;

/// Which side of a transport leg a `/schedule` query anchors on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    Departure,
    Arrival,
}

impl Event {
    pub fn as_str(self) -> &'static str {
        match self {
            Event::Departure => "departure",
            Event::Arrival => "arrival",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleResponse {
    #[serde(default)]
    pub schedule: Vec<ScheduleItem>,
    #[serde(default)]
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleItem {
    pub thread: ThreadInfo,
    /// Wire-format (`YYYY-MM-DD HH:MM:SS`) local departure, if this station
    /// isn't the thread's terminus.
    pub departure: Option<String>,
    /// Wire-format local arrival.
    pub arrival: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ThreadInfo {
    pub uid: String,
    pub title: Option<String>,
    pub number: Option<String>,
    pub transport_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ThreadStopsResponse {
    pub uid: String,
    #[serde(default)]
    pub stops: Vec<StopItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StopItem {
    pub station: StationRef,
    pub arrival: Option<String>,
    pub departure: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StationRef {
    pub code: String,
    pub title: Option<String>,
}
