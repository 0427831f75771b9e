//! Graph store backed by a real graph database over Bolt.

use chrono::{DateTime, Utc};
use neo4rs::{Graph, query};

use crate::domain::StationCode;

use super::error::GraphError;
use super::model::{Neighbor, StationRecord, TransportEdgeRecord, WalkEdgeRecord};
use super::store::GraphStore;

pub struct Neo4jGraphStore {
    graph: Graph,
}

impl Neo4jGraphStore {
    pub async fn connect(uri: &str, user: &str, password: &str) -> Result<Self, GraphError> {
        let graph = Graph::new(uri, user, password)
            .await
            .map_err(|e| GraphError::Connection(e.to_string()))?;
        Ok(Self { graph })
    }
}

impl GraphStore for Neo4jGraphStore {
    async fn upsert_station(&self, station: StationRecord) -> Result<(), GraphError> {
        let q = query(
            "MERGE (s:Station {yandex_code: $code}) \
             SET s.title = $title, s.latitude = $lat, s.longitude = $lon, \
                 s.transport_type = $transport_type",
        )
        .param("code", station.code.as_str())
        .param("title", station.title)
        .param("lat", station.latitude.unwrap_or(0.0))
        .param("lon", station.longitude.unwrap_or(0.0))
        .param("transport_type", station.transport_type.unwrap_or_default());
        self.graph.run(q).await.map_err(|e| GraphError::Query(e.to_string()))
    }

    async fn upsert_walk_edges(&self, edges: Vec<WalkEdgeRecord>) -> Result<(), GraphError> {
        let futures = edges.into_iter().map(|edge| {
            let graph = &self.graph;
            async move {
                let q = query(
                    "MATCH (s1:Station {yandex_code: $from}) \
                     MATCH (s2:Station {yandex_code: $to}) \
                     MERGE (s1)-[r:WALKABLE]->(s2) \
                     ON CREATE SET r.distance_km = $distance",
                )
                .param("from", edge.from.as_str())
                .param("to", edge.to.as_str())
                .param("distance", edge.distance_km);
                graph.run(q).await.map_err(|e| GraphError::Query(e.to_string()))
            }
        });
        futures::future::try_join_all(futures).await?;
        Ok(())
    }

    async fn upsert_transport_edges(&self, edges: Vec<TransportEdgeRecord>) -> Result<(), GraphError> {
        // Written sequentially, in the order given: a thread's stops must
        // never become visible out of order to a concurrent reader.
        for edge in edges {
            let q = query(
                "MATCH (s1:Station {yandex_code: $from}) \
                 MATCH (s2:Station {yandex_code: $to}) \
                 MERGE (s1)-[r:TRANSPORT {thread_uid: $thread_uid, \
                     departure_time: $departure, arrival_time: $arrival}]->(s2)",
            )
            .param("from", edge.from.as_str())
            .param("to", edge.to.as_str())
            .param("thread_uid", edge.thread_uid)
            .param("departure", edge.departure.timestamp() as f64)
            .param("arrival", edge.arrival.timestamp() as f64);
            self.graph.run(q).await.map_err(|e| GraphError::Query(e.to_string()))?;
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
        let q = query(
            "MATCH (s:Station {yandex_code: $code})-[r:TRANSPORT]->(nbr:Station) \
             WHERE r.departure_time >= $after AND r.departure_time <= $until \
             RETURN nbr.yandex_code as nbr, r.thread_uid as thread_uid, \
                    r.departure_time as departure, r.arrival_time as arrival \
             UNION \
             MATCH (s:Station {yandex_code: $code})-[r:WALKABLE]->(nbr:Station) \
             RETURN nbr.yandex_code as nbr, null as thread_uid, \
                    null as departure, r.distance_km as arrival",
        )
        .param("code", station.as_str())
        .param("after", after.timestamp() as f64)
        .param("until", until.timestamp() as f64);

        self.run_neighbor_query(q, station, true).await
    }

    async fn inbound_neighbors(
        &self,
        station: &StationCode,
        before: DateTime<Utc>,
        horizon: chrono::Duration,
    ) -> Result<Vec<Neighbor>, GraphError> {
        let since = before - horizon;
        let q = query(
            "MATCH (nbr:Station)-[r:TRANSPORT]->(s:Station {yandex_code: $code}) \
             WHERE r.arrival_time <= $before AND r.arrival_time >= $since \
             RETURN nbr.yandex_code as nbr, r.thread_uid as thread_uid, \
                    r.departure_time as departure, r.arrival_time as arrival \
             UNION \
             MATCH (nbr:Station)-[r:WALKABLE]->(s:Station {yandex_code: $code}) \
             RETURN nbr.yandex_code as nbr, null as thread_uid, \
                    null as departure, r.distance_km as arrival",
        )
        .param("code", station.as_str())
        .param("before", before.timestamp() as f64)
        .param("since", since.timestamp() as f64);

        self.run_neighbor_query(q, station, false).await
    }
}

impl Neo4jGraphStore {
    /// `outbound`: true if `nbr` in the result set is the destination of
    /// the edge from `anchor`; false if `nbr` is the origin of an edge
    /// into `anchor` (the inbound-query case).
    async fn run_neighbor_query(
        &self,
        q: neo4rs::Query,
        anchor: &StationCode,
        outbound: bool,
    ) -> Result<Vec<Neighbor>, GraphError> {
        let mut stream = self
            .graph
            .execute(q)
            .await
            .map_err(|e| GraphError::Query(e.to_string()))?;

        let mut neighbors = Vec::new();
        while let Some(row) = stream.next().await.map_err(|e| GraphError::Query(e.to_string()))? {
            let nbr_code: String = row.get("nbr").map_err(|e| GraphError::Malformed(e.to_string()))?;
            let nbr = StationCode::parse(&nbr_code).map_err(|e| GraphError::Malformed(e.to_string()))?;
            let thread_uid: Option<String> = row.get("thread_uid").ok();

            let (from, to) = if outbound {
                (anchor.clone(), nbr.clone())
            } else {
                (nbr.clone(), anchor.clone())
            };

            match thread_uid {
                Some(thread_uid) => {
                    let departure: f64 =
                        row.get("departure").map_err(|e| GraphError::Malformed(e.to_string()))?;
                    let arrival: f64 =
                        row.get("arrival").map_err(|e| GraphError::Malformed(e.to_string()))?;
                    neighbors.push(Neighbor::Transport(TransportEdgeRecord {
                        from,
                        to,
                        thread_uid,
                        departure: DateTime::<Utc>::from_timestamp(departure as i64, 0)
                            .ok_or_else(|| GraphError::Malformed(format!("invalid POSIX timestamp {departure}")))?,
                        arrival: DateTime::<Utc>::from_timestamp(arrival as i64, 0)
                            .ok_or_else(|| GraphError::Malformed(format!("invalid POSIX timestamp {arrival}")))?,
                    }));
                }
                None => {
                    let distance_km: f64 =
                        row.get("arrival").map_err(|e| GraphError::Malformed(e.to_string()))?;
                    neighbors.push(Neighbor::Walk(WalkEdgeRecord {
                        from,
                        to,
                        distance_km,
                    }));
                }
            }
        }
        Ok(neighbors)
    }
}
