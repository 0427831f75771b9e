//! Short-TTL in-process cache in front of [`super::client::ScheduleClient`].
//!
//! Bidirectional search touches the same station from both the forward
//! and backward frontier within the same search, often within the same
//! second; this cache avoids paying for the same HTTP round trip twice.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;

use crate::domain::StationCode;

use super::client::ScheduleClient;
use super::error::ScheduleError;
use super::source::ScheduleSource;
use super::types::{Event, ScheduleResponse, ThreadStopsResponse};

#[derive(Debug, Clone)]
pub struct MemoConfig {
    pub ttl: Duration,
    pub max_capacity: u64,
}

impl Default for MemoConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_capacity: 10_000,
        }
    }
}

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
struct CacheKey {
    station: StationCode,
    date: String,
    event: Event,
}

/// Wraps a [`ScheduleClient`] with a short-TTL response cache.
pub struct MemoizedScheduleClient {
    inner: Arc<ScheduleClient>,
    cache: Cache<CacheKey, Option<Arc<ScheduleResponse>>>,
}

impl MemoizedScheduleClient {
    pub fn new(inner: Arc<ScheduleClient>, config: MemoConfig) -> Self {
        let cache = Cache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();
        Self { inner, cache }
    }

    pub async fn station_schedule(
        &self,
        station: &StationCode,
        date: &str,
        event: Event,
    ) -> Result<Option<Arc<ScheduleResponse>>, ScheduleError> {
        let key = CacheKey {
            station: station.clone(),
            date: date.to_string(),
            event,
        };
        if let Some(hit) = self.cache.get(&key).await {
            return Ok(hit);
        }
        let fetched = self.inner.station_schedule(station, date, event).await?.map(Arc::new);
        self.cache.insert(key, fetched.clone()).await;
        Ok(fetched)
    }

    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }
}

impl ScheduleSource for MemoizedScheduleClient {
    async fn station_schedule(
        &self,
        station: &StationCode,
        date: &str,
        event: Event,
    ) -> Result<Option<Arc<ScheduleResponse>>, ScheduleError> {
        MemoizedScheduleClient::station_schedule(self, station, date, event).await
    }

    async fn thread_stops(
        &self,
        uid: &str,
        date: Option<&str>,
    ) -> Result<ThreadStopsResponse, ScheduleError> {
        self.inner.thread_stops(uid, date).await
    }

    async fn bulk_thread_stops(
        &self,
        queries: Vec<(String, Option<String>)>,
    ) -> Vec<Option<ThreadStopsResponse>> {
        self.inner.bulk_thread_stops(queries).await
    }
}
