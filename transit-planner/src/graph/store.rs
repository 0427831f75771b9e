//! The `GraphStore` trait: idempotent batched upserts plus windowed
//! neighbour queries, implemented against a real graph database
//! ([`super::neo4j::Neo4jGraphStore`]) or an in-memory fake
//! ([`super::memory::InMemoryGraphStore`]) for tests.

use std::future::Future;

use chrono::{DateTime, Utc};

use crate::domain::StationCode;

use super::error::GraphError;
use super::model::{Neighbor, StationRecord, TransportEdgeRecord, WalkEdgeRecord};

pub trait GraphStore: Send + Sync {
    /// Upsert a single station node, keyed by its code.
    fn upsert_station(
        &self,
        station: StationRecord,
    ) -> impl Future<Output = Result<(), GraphError>> + Send;

    /// Upsert a batch of `WALKABLE` edges. Order is not significant;
    /// implementations may run these concurrently.
    fn upsert_walk_edges(
        &self,
        edges: Vec<WalkEdgeRecord>,
    ) -> impl Future<Output = Result<(), GraphError>> + Send;

    /// Upsert a batch of `TRANSPORT` edges. Edges belonging to the same
    /// thread must be written in the order given, so a thread's stop
    /// sequence is never partially visible out of order.
    fn upsert_transport_edges(
        &self,
        edges: Vec<TransportEdgeRecord>,
    ) -> impl Future<Output = Result<(), GraphError>> + Send;

    /// Neighbours reachable by departing `station` at or after `after`,
    /// within `horizon`.
    fn outbound_neighbors(
        &self,
        station: &StationCode,
        after: DateTime<Utc>,
        horizon: chrono::Duration,
    ) -> impl Future<Output = Result<Vec<Neighbor>, GraphError>> + Send;

    /// Neighbours from which `station` is reachable by arriving at or
    /// before `before`, within `horizon` looking backward.
    fn inbound_neighbors(
        &self,
        station: &StationCode,
        before: DateTime<Utc>,
        horizon: chrono::Duration,
    ) -> impl Future<Output = Result<Vec<Neighbor>, GraphError>> + Send;
}
