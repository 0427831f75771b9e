//! Property-graph records mirroring the store's node and edge schema.

use chrono::{DateTime, Utc};

use crate::domain::StationCode;

/// A `Station` node.
#[derive(Debug, Clone, PartialEq)]
pub struct StationRecord {
    pub code: StationCode,
    pub title: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub transport_type: Option<String>,
}

/// A `WALKABLE` edge. Always created as a symmetric pair by the caller;
/// the store itself treats each direction as an independent edge.
#[derive(Debug, Clone, PartialEq)]
pub struct WalkEdgeRecord {
    pub from: StationCode,
    pub to: StationCode,
    pub distance_km: f64,
}

/// A `TRANSPORT` edge: one scheduled hop of one vehicle thread. The
/// natural key is the 5-tuple `(from, to, thread_uid, departure, arrival)`,
/// since the same thread can legitimately produce more than one edge
/// between the same pair of stations on different days.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportEdgeRecord {
    pub from: StationCode,
    pub to: StationCode,
    pub thread_uid: String,
    pub departure: DateTime<Utc>,
    pub arrival: DateTime<Utc>,
}

/// A neighbour reachable from a station by one edge, as returned by a
/// windowed neighbour query.
#[derive(Debug, Clone, PartialEq)]
pub enum Neighbor {
    Walk(WalkEdgeRecord),
    Transport(TransportEdgeRecord),
}

impl Neighbor {
    pub fn to(&self) -> &StationCode {
        match self {
            Neighbor::Walk(w) => &w.to,
            Neighbor::Transport(t) => &t.to,
        }
    }
}
