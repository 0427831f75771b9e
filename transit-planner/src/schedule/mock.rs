//! In-memory schedule fixture for tests, implementing [`ScheduleSource`]
//! without touching the network.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::StationCode;

use super::error::ScheduleError;
use super::source::ScheduleSource;
use super::types::{Event, ScheduleResponse, ThreadStopsResponse};

#[derive(Default)]
pub struct MockScheduleSource {
    schedules: HashMap<(StationCode, String, Event), Arc<ScheduleResponse>>,
    threads: HashMap<String, ThreadStopsResponse>,
}

impl MockScheduleSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_schedule(
        mut self,
        station: StationCode,
        date: &str,
        event: Event,
        response: ScheduleResponse,
    ) -> Self {
        self.schedules.insert((station, date.to_string(), event), Arc::new(response));
        self
    }

    pub fn with_thread(mut self, response: ThreadStopsResponse) -> Self {
        self.threads.insert(response.uid.clone(), response);
        self
    }
}

impl ScheduleSource for MockScheduleSource {
    async fn station_schedule(
        &self,
        station: &StationCode,
        date: &str,
        event: Event,
    ) -> Result<Option<Arc<ScheduleResponse>>, ScheduleError> {
        Ok(self.schedules.get(&(station.clone(), date.to_string(), event)).cloned())
    }

    async fn thread_stops(
        &self,
        uid: &str,
        _date: Option<&str>,
    ) -> Result<ThreadStopsResponse, ScheduleError> {
        self.threads
            .get(uid)
            .cloned()
            .ok_or_else(|| ScheduleError::Api {
                status: 404,
                message: format!("no fixture for thread {uid}"),
            })
    }

    async fn bulk_thread_stops(
        &self,
        queries: Vec<(String, Option<String>)>,
    ) -> Vec<Option<ThreadStopsResponse>> {
        let mut results = Vec::with_capacity(queries.len());
        for (uid, date) in queries {
            results.push(self.thread_stops(&uid, date.as_deref()).await.ok());
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::types::{Pagination, ScheduleItem, ThreadInfo};

    #[tokio::test]
    async fn returns_fixture_schedule() {
        let station = StationCode::parse("s1").unwrap();
        let response = ScheduleResponse {
            schedule: vec![ScheduleItem {
                thread: ThreadInfo {
                    uid: "t1".into(),
                    title: Some("Express".into()),
                    number: None,
                    transport_type: Some("train".into()),
                },
                departure: Some("2026-01-01 09:00:00".into()),
                arrival: None,
            }],
            pagination: Pagination { total: 1, limit: 100, offset: 0 },
        };
        let mock = MockScheduleSource::new().with_schedule(
            station.clone(),
            "2026-01-01",
            Event::Departure,
            response,
        );

        let result = mock
            .station_schedule(&station, "2026-01-01", Event::Departure)
            .await
            .unwrap();
        assert!(result.is_some());
        assert_eq!(result.unwrap().schedule.len(), 1);
    }

    #[tokio::test]
    async fn missing_station_returns_none() {
        let mock = MockScheduleSource::new();
        let station = StationCode::parse("unknown").unwrap();
        let result = mock
            .station_schedule(&station, "2026-01-01", Event::Departure)
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn missing_thread_is_an_error() {
        let mock = MockScheduleSource::new();
        assert!(mock.thread_stops("missing", None).await.is_err());
    }
}
