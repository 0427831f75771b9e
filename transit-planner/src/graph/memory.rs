//! In-memory `GraphStore` fake for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};

use crate::domain::StationCode;

use super::error::GraphError;
use super::model::{Neighbor, StationRecord, TransportEdgeRecord, WalkEdgeRecord};
use super::store::GraphStore;

#[derive(Default)]
pub struct InMemoryGraphStore {
    stations: Mutex<HashMap<StationCode, StationRecord>>,
    walks: Mutex<Vec<WalkEdgeRecord>>,
    transports: Mutex<Vec<TransportEdgeRecord>>,
}

impl InMemoryGraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn station_count(&self) -> usize {
        self.stations.lock().expect("mutex poisoned").len()
    }

    pub fn transport_edge_count(&self) -> usize {
        self.transports.lock().expect("mutex poisoned").len()
    }
}

impl GraphStore for InMemoryGraphStore {
    async fn upsert_station(&self, station: StationRecord) -> Result<(), GraphError> {
        self.stations
            .lock()
            .expect("mutex poisoned")
            .insert(station.code.clone(), station);
        Ok(())
    }

    async fn upsert_walk_edges(&self, edges: Vec<WalkEdgeRecord>) -> Result<(), GraphError> {
        let mut walks = self.walks.lock().expect("mutex poisoned");
        for edge in edges {
            if !walks.iter().any(|w| w.from == edge.from && w.to == edge.to) {
                walks.push(edge);
            }
        }
        Ok(())
    }

    async fn upsert_transport_edges(&self, edges: Vec<TransportEdgeRecord>) -> Result<(), GraphError> {
        let mut transports = self.transports.lock().expect("mutex poisoned");
        for edge in edges {
            let exists = transports.iter().any(|t| {
                t.from == edge.from
                    && t.to == edge.to
                    && t.thread_uid == edge.thread_uid
                    && t.departure == edge.departure
                    && t.arrival == edge.arrival
            });
            if !exists {
                transports.push(edge);
            }
        }
        Ok(())
    }

    async fn outbound_neighbors(
        &self,
        station: &StationCode,
        after: DateTime<Utc>,
        horizon: chrono::Duration,
    ) -> Result<Vec<Neighbor>, GraphError> {
        let until = after + horizon;
        let mut neighbors = Vec::new();
        for edge in self.transports.lock().expect("mutex poisoned").iter() {
            if edge.from == *station && edge.departure >= after && edge.departure <= until {
                neighbors.push(Neighbor::Transport(edge.clone()));
            }
        }
        for edge in self.walks.lock().expect("mutex poisoned").iter() {
            if edge.from == *station {
                neighbors.push(Neighbor::Walk(edge.clone()));
            }
        }
        Ok(neighbors)
    }

    async fn inbound_neighbors(
        &self,
        station: &StationCode,
        before: DateTime<Utc>,
        horizon: chrono::Duration,
    ) -> Result<Vec<Neighbor>, GraphError> {
        let since = before - horizon;
        let mut neighbors = Vec::new();
        for edge in self.transports.lock().expect("mutex poisoned").iter() {
            if edge.to == *station && edge.arrival <= before && edge.arrival >= since {
                neighbors.push(Neighbor::Transport(edge.clone()));
            }
        }
        for edge in self.walks.lock().expect("mutex poisoned").iter() {
            if edge.to == *station {
                neighbors.push(Neighbor::Walk(edge.clone()));
            }
        }
        Ok(neighbors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn code(s: &str) -> StationCode {
        StationCode::parse(s).unwrap()
    }

    #[tokio::test]
    async fn upsert_transport_edge_is_idempotent() {
        let store = InMemoryGraphStore::new();
        let edge = TransportEdgeRecord {
            from: code("a"),
            to: code("b"),
            thread_uid: "t1".into(),
            departure: Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap(),
            arrival: Utc.with_ymd_and_hms(2026, 1, 1, 9, 30, 0).unwrap(),
        };
        store.upsert_transport_edges(vec![edge.clone()]).await.unwrap();
        store.upsert_transport_edges(vec![edge]).await.unwrap();
        assert_eq!(store.transport_edge_count(), 1);
    }

    #[tokio::test]
    async fn outbound_neighbors_respects_window() {
        let store = InMemoryGraphStore::new();
        let early = TransportEdgeRecord {
            from: code("a"),
            to: code("b"),
            thread_uid: "t1".into(),
            departure: Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap(),
            arrival: Utc.with_ymd_and_hms(2026, 1, 1, 9, 30, 0).unwrap(),
        };
        let late = TransportEdgeRecord {
            from: code("a"),
            to: code("c"),
            thread_uid: "t2".into(),
            departure: Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0).unwrap(),
            arrival: Utc.with_ymd_and_hms(2026, 1, 5, 9, 30, 0).unwrap(),
        };
        store.upsert_transport_edges(vec![early, late]).await.unwrap();

        let neighbors = store
            .outbound_neighbors(
                &code("a"),
                Utc.with_ymd_and_hms(2026, 1, 1, 8, 0, 0).unwrap(),
                chrono::Duration::hours(48),
            )
            .await
            .unwrap();
        assert_eq!(neighbors.len(), 1);
        assert_eq!(neighbors[0].to(), &code("b"));
    }
}
