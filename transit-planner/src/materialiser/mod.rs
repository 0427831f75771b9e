//! Lazy graph materialisation: fetches schedule data on demand and
//! persists it as durable graph edges, so the same station is never
//! re-fetched once the search has already visited it in this horizon.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::catalogue::StationCatalogue;
use crate::domain::{parse_wire_timestamp, StationCode};
use crate::graph::{GraphStore, Neighbor, StationRecord, TransportEdgeRecord, WalkEdgeRecord};
use crate::schedule::{Event, ScheduleError, ScheduleSource};

#[derive(Debug, thiserror::Error)]
pub enum MaterialiserError {
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
    #[error(transparent)]
    Graph(#[from] crate::graph::GraphError),
}

/// Default horizon for a single lazy fetch: the schedule source's
/// pagination covers a day at a time, and the search horizon goes out to
/// 48 hours either side of the query instant.
pub const DEFAULT_HORIZON_HOURS: i64 = 48;

pub struct Materialiser<S, G> {
    schedule: Arc<S>,
    graph: Arc<G>,
    catalogue: Arc<StationCatalogue>,
}

impl<S, G> Materialiser<S, G>
where
    S: ScheduleSource,
    G: GraphStore,
{
    pub fn new(schedule: Arc<S>, graph: Arc<G>, catalogue: Arc<StationCatalogue>) -> Self {
        Self {
            schedule,
            graph,
            catalogue,
        }
    }

    /// Outbound neighbours of `station` departing at or after `after`.
    /// If the graph store has nothing in the window yet, fetches the
    /// station's schedule, pulls each thread's full stop sequence,
    /// populates walk edges from the catalogue, and persists every hop
    /// before returning the graph's own view.
    pub async fn ensure_outbound(
        &self,
        station: &StationCode,
        after: DateTime<Utc>,
        walk_radius_km: f64,
    ) -> Result<Vec<Neighbor>, MaterialiserError> {
        let horizon = chrono::Duration::hours(DEFAULT_HORIZON_HOURS);
        let existing = self.graph.outbound_neighbors(station, after, horizon).await?;
        if !existing.is_empty() {
            return Ok(existing);
        }

        self.fetch_and_persist_threads(station, after, horizon, Event::Departure).await?;
        self.ensure_walk_edges(station, walk_radius_km).await?;
        Ok(self.graph.outbound_neighbors(station, after, horizon).await?)
    }

    /// Inbound neighbours of `station` arriving at or before `before`.
    pub async fn ensure_inbound(
        &self,
        station: &StationCode,
        before: DateTime<Utc>,
        walk_radius_km: f64,
    ) -> Result<Vec<Neighbor>, MaterialiserError> {
        let horizon = chrono::Duration::hours(DEFAULT_HORIZON_HOURS);
        let existing = self.graph.inbound_neighbors(station, before, horizon).await?;
        if !existing.is_empty() {
            return Ok(existing);
        }

        let after = before - horizon;
        self.fetch_and_persist_threads(station, after, horizon, Event::Arrival).await?;
        self.ensure_walk_edges(station, walk_radius_km).await?;
        Ok(self.graph.inbound_neighbors(station, before, horizon).await?)
    }

    /// Make sure `station`'s walk candidates are persisted as symmetric
    /// `WALKABLE` edge pairs. Idempotent: the graph store dedupes on
    /// `(from, to)`.
    pub async fn ensure_walk_edges(
        &self,
        station: &StationCode,
        radius_km: f64,
    ) -> Result<(), MaterialiserError> {
        let Some(origin) = self.catalogue.station(station) else {
            return Ok(());
        };
        self.graph
            .upsert_station(StationRecord {
                code: origin.code.clone(),
                title: origin.title.clone(),
                latitude: origin.latitude,
                longitude: origin.longitude,
                transport_type: origin.transport_type.clone(),
            })
            .await?;

        let candidates = self.catalogue.walkable_from(station, radius_km);
        let mut edges = Vec::with_capacity(candidates.len() * 2);
        for (candidate, distance_km) in candidates {
            self.graph
                .upsert_station(StationRecord {
                    code: candidate.code.clone(),
                    title: candidate.title.clone(),
                    latitude: candidate.latitude,
                    longitude: candidate.longitude,
                    transport_type: candidate.transport_type.clone(),
                })
                .await?;
            edges.push(WalkEdgeRecord {
                from: station.clone(),
                to: candidate.code.clone(),
                distance_km,
            });
            edges.push(WalkEdgeRecord {
                from: candidate.code.clone(),
                to: station.clone(),
                distance_km,
            });
        }
        self.graph.upsert_walk_edges(edges).await?;
        Ok(())
    }

    async fn fetch_and_persist_threads(
        &self,
        station: &StationCode,
        after: DateTime<Utc>,
        horizon: chrono::Duration,
        event: Event,
    ) -> Result<(), MaterialiserError> {
        let mut seen_threads = std::collections::HashSet::new();
        let end_date = (after + horizon).date_naive();
        let mut cursor = after.date_naive();
        loop {
            let date = cursor.format("%Y-%m-%d").to_string();
            if let Some(response) = self.schedule.station_schedule(station, &date, event).await? {
                for item in &response.schedule {
                    seen_threads.insert(item.thread.uid.clone());
                }
            }
            if cursor >= end_date {
                break;
            }
            cursor = cursor.succ_opt().unwrap_or(end_date);
        }
        if seen_threads.is_empty() {
            return Ok(());
        }

        let date = after.format("%Y-%m-%d").to_string();
        let queries: Vec<(String, Option<String>)> =
            seen_threads.iter().map(|uid| (uid.clone(), Some(date.clone()))).collect();
        let responses = self.schedule.bulk_thread_stops(queries).await;

        for stops in responses.into_iter().flatten() {
            let mut ordered_edges = Vec::new();
            for pair in stops.stops.windows(2) {
                let (Ok(from), Ok(to)) = (
                    StationCode::parse(&pair[0].station.code),
                    StationCode::parse(&pair[1].station.code),
                ) else {
                    continue;
                };
                let (Some(departure_raw), Some(arrival_raw)) =
                    (pair[0].departure.as_deref(), pair[1].arrival.as_deref())
                else {
                    continue;
                };
                let (Ok(departure), Ok(arrival)) = (
                    parse_wire_timestamp(departure_raw),
                    parse_wire_timestamp(arrival_raw),
                ) else {
                    continue;
                };
                if arrival <= departure {
                    continue;
                }

                for code in [&from, &to] {
                    if let Some(station_meta) = self.catalogue.station(code) {
                        self.graph
                            .upsert_station(StationRecord {
                                code: station_meta.code.clone(),
                                title: station_meta.title.clone(),
                                latitude: station_meta.latitude,
                                longitude: station_meta.longitude,
                                transport_type: station_meta.transport_type.clone(),
                            })
                            .await?;
                    }
                }

                ordered_edges.push(TransportEdgeRecord {
                    from,
                    to,
                    thread_uid: stops.uid.clone(),
                    departure,
                    arrival,
                });
            }
            self.graph.upsert_transport_edges(ordered_edges).await?;
        }
        Ok(())
    }
}
