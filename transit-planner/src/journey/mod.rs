//! The Journey Service: a thin facade over the Search Core that expands
//! settlements to station sets and runs one (or a chained sequence of)
//! searches.

mod error;

pub use error::JourneyError;

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::catalogue::StationCatalogue;
use crate::domain::{Journey, Mode, SettlementCode};
use crate::graph::GraphStore;
use crate::schedule::ScheduleSource;
use crate::search::AStarSearch;

/// Given (origin settlement, destination settlement, start instant, mode),
/// expands settlements to station sets, runs the Search Core, and returns
/// the resulting itinerary unchanged. Pretty-printing and settlement
/// autocomplete are an external CLI's job, not this service's.
pub struct JourneyService<S, G> {
    catalogue: Arc<StationCatalogue>,
    search: Arc<AStarSearch<S, G>>,
}

impl<S, G> JourneyService<S, G>
where
    S: ScheduleSource,
    G: GraphStore,
{
    pub fn new(catalogue: Arc<StationCatalogue>, search: Arc<AStarSearch<S, G>>) -> Self {
        Self { catalogue, search }
    }

    #[tracing::instrument(skip(self))]
    pub async fn plan(
        &self,
        origin_settlement: &SettlementCode,
        destination_settlement: &SettlementCode,
        start_instant: DateTime<Utc>,
        mode: Mode,
    ) -> Result<Journey, JourneyError> {
        let origins = self.settlement_stations(origin_settlement)?;
        let destinations = self.settlement_stations(destination_settlement)?;

        Ok(self.search.search(&origins, &destinations, start_instant, mode).await?)
    }

    /// Chains a sequence of settlement waypoints into consecutive
    /// single-leg searches. In `time` mode the next leg's start instant is
    /// the previous leg's arrival instant; in `cost` mode every leg starts
    /// from the same given instant, since cost mode does not track a
    /// running clock.
    pub async fn plan_waypoints(
        &self,
        waypoints: &[SettlementCode],
        start_instant: DateTime<Utc>,
        mode: Mode,
    ) -> Result<Vec<Journey>, JourneyError> {
        if waypoints.len() < 2 {
            return Ok(Vec::new());
        }

        let mut legs = Vec::with_capacity(waypoints.len() - 1);
        let mut current_instant = start_instant;

        for pair in waypoints.windows(2) {
            let journey = self.plan(&pair[0], &pair[1], current_instant, mode).await?;
            if mode == Mode::Time {
                if let Some(arrival) = journey.arrival_time() {
                    current_instant = arrival;
                }
            }
            legs.push(journey);
        }

        Ok(legs)
    }

    fn settlement_stations(&self, settlement: &SettlementCode) -> Result<Vec<crate::domain::StationCode>, JourneyError> {
        if self.catalogue.settlement(settlement).is_none() {
            return Err(JourneyError::UnknownSettlement(settlement.clone()));
        }
        let stations = self.catalogue.stations_in_settlement(settlement);
        if stations.is_empty() {
            return Err(JourneyError::EmptySettlement(settlement.clone()));
        }
        Ok(stations.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::TimeZone;

    use crate::catalogue::StationsListResponse;
    use crate::domain::StationCode;
    use crate::graph::{InMemoryGraphStore, TransportEdgeRecord};
    use crate::materialiser::Materialiser;
    use crate::schedule::MockScheduleSource;
    use crate::search::{LatLonCache, SearchConfig};

    use super::*;

    fn settlement_code(s: &str) -> SettlementCode {
        SettlementCode::parse(s).unwrap()
    }

    fn station_code(s: &str) -> StationCode {
        StationCode::parse(s).unwrap()
    }

    fn catalogue_with_one_station_per_settlement() -> StationCatalogue {
        let json = r#"{
            "countries": [{
                "regions": [{
                    "settlements": [
                        {"title": "Origin Town", "codes": {"yandex_code": "c1"}, "stations": [
                            {"title": "Origin Station", "codes": {"yandex_code": "a"}, "latitude": 0.0, "longitude": 0.0, "transport_type": "train", "station_type": null}
                        ]},
                        {"title": "Dest Town", "codes": {"yandex_code": "c2"}, "stations": [
                            {"title": "Dest Station", "codes": {"yandex_code": "b"}, "latitude": 0.0, "longitude": 1.0, "transport_type": "train", "station_type": null}
                        ]}
                    ]
                }]
            }]
        }"#;
        let response: StationsListResponse = serde_json::from_str(json).unwrap();
        StationCatalogue::from_response(&response)
    }

    #[tokio::test]
    async fn plans_a_direct_journey_between_settlements() {
        let catalogue = Arc::new(catalogue_with_one_station_per_settlement());
        let graph = Arc::new(InMemoryGraphStore::new());
        let departure = Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap();
        let arrival = Utc.with_ymd_and_hms(2026, 1, 1, 9, 30, 0).unwrap();
        graph
            .upsert_transport_edges(vec![TransportEdgeRecord {
                from: station_code("a"),
                to: station_code("b"),
                thread_uid: "t1".into(),
                departure,
                arrival,
            }])
            .await
            .unwrap();
        let schedule = Arc::new(MockScheduleSource::new());
        let materialiser = Arc::new(Materialiser::new(schedule, graph, catalogue.clone()));

        let mut coords = HashMap::new();
        coords.insert(station_code("a"), (0.0, 0.0));
        coords.insert(station_code("b"), (0.0, 1.0));
        let search = Arc::new(AStarSearch::new(materialiser, LatLonCache::new(coords), SearchConfig::default()));

        let service = JourneyService::new(catalogue, search);
        let journey = service
            .plan(
                &settlement_code("c1"),
                &settlement_code("c2"),
                departure - chrono::Duration::minutes(5),
                Mode::Time,
            )
            .await
            .unwrap();

        assert_eq!(journey.origin(), &station_code("a"));
        assert_eq!(journey.destination(), &station_code("b"));
    }

    #[tokio::test]
    async fn unknown_settlement_is_rejected_before_search() {
        let catalogue = Arc::new(catalogue_with_one_station_per_settlement());
        let graph = Arc::new(InMemoryGraphStore::new());
        let schedule = Arc::new(MockScheduleSource::new());
        let materialiser = Arc::new(Materialiser::new(schedule, graph, catalogue.clone()));
        let search = Arc::new(AStarSearch::new(materialiser, LatLonCache::new(HashMap::new()), SearchConfig::default()));
        let service = JourneyService::new(catalogue, search);

        let result = service
            .plan(
                &settlement_code("unknown"),
                &settlement_code("c2"),
                Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap(),
                Mode::Time,
            )
            .await;

        assert!(matches!(result, Err(JourneyError::UnknownSettlement(_))));
    }
}
