//! Client for the schedule source's per-station and per-thread endpoints.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use tokio::sync::Semaphore;

use crate::domain::StationCode;

use super::error::ScheduleError;
use super::miss_cache::MissCache;
use super::source::ScheduleSource;
use super::types::{Event, ScheduleResponse, ThreadStopsResponse};

const DEFAULT_BASE_URL: &str = "https://api.rasp.yandex.net/v3.0";

#[derive(Debug, Clone)]
pub struct ScheduleClientConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout_secs: u64,
    pub max_concurrent: usize,
}

impl ScheduleClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            max_concurrent: 8,
        }
    }
}

/// Client for `/schedule` and `/thread`, with bounded request concurrency
/// and a persistent record of stations known to have no schedule data.
pub struct ScheduleClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    semaphore: Arc<Semaphore>,
    miss_cache: Arc<MissCache>,
}

impl ScheduleClient {
    pub fn new(config: ScheduleClientConfig, miss_cache: Arc<MissCache>) -> Result<Self, ScheduleError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
            miss_cache,
        })
    }

    /// Schedule for a station on a single calendar day. Short-circuits
    /// against the miss cache, and re-fetches with a larger `limit` if
    /// the first response's `pagination.total` exceeds its `limit`.
    #[tracing::instrument(skip(self), fields(station = %station))]
    pub async fn station_schedule(
        &self,
        station: &StationCode,
        date: &str,
        event: Event,
    ) -> Result<Option<ScheduleResponse>, ScheduleError> {
        if self.miss_cache.contains(station) {
            tracing::debug!("station is in miss cache, skipping fetch");
            return Ok(None);
        }

        let _permit = self.semaphore.acquire().await.expect("semaphore not closed");

        let first = match self.fetch_schedule(station, date, event, 0, 100).await {
            Ok(response) => response,
            Err(ScheduleError::Api { status, .. }) if status == 404 || status == 400 => {
                self.miss_cache.record(station.clone())?;
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        if first.schedule.is_empty() {
            return Ok(None);
        }

        if first.pagination.total > first.pagination.limit {
            let total = first.pagination.total;
            match self.fetch_schedule(station, date, event, 0, total).await {
                Ok(full) => Ok(Some(full)),
                Err(_) => Ok(Some(first)),
            }
        } else {
            Ok(Some(first))
        }
    }

    async fn fetch_schedule(
        &self,
        station: &StationCode,
        date: &str,
        event: Event,
        offset: u32,
        limit: u32,
    ) -> Result<ScheduleResponse, ScheduleError> {
        let url = format!(
            "{}/schedule/?apikey={}&format=json&lang=en_US&station={}&date={}&event={}&offset={}&limit={}",
            self.base_url,
            self.api_key,
            station.as_str(),
            date,
            event.as_str(),
            offset,
            limit
        );
        let response = self.http.get(&url).send().await?;
        self.parse_response(response).await
    }

    /// Schedule merged across a rolling window, so a thread departing just
    /// before midnight and arriving just after is still visible as one
    /// contiguous lookup starting at `from`.
    pub async fn station_schedule_window(
        &self,
        station: &StationCode,
        from: DateTime<Utc>,
        window_hours: i64,
        event: Event,
    ) -> Result<Vec<crate::schedule::types::ScheduleItem>, ScheduleError> {
        let end_date = (from + chrono::Duration::hours(window_hours)).date_naive();
        let mut items = Vec::new();
        let mut cursor = from.date_naive();
        loop {
            let date = cursor.format("%Y-%m-%d").to_string();
            if let Some(response) = self.station_schedule(station, &date, event).await? {
                items.extend(response.schedule);
            }
            if cursor >= end_date {
                break;
            }
            cursor = cursor.succ_opt().unwrap_or(end_date);
        }
        Ok(items)
    }

    #[tracing::instrument(skip(self))]
    pub async fn thread_stops(
        &self,
        uid: &str,
        date: Option<&str>,
    ) -> Result<ThreadStopsResponse, ScheduleError> {
        let _permit = self.semaphore.acquire().await.expect("semaphore not closed");
        let mut url = format!(
            "{}/thread/?apikey={}&format=json&lang=en_US&uid={}",
            self.base_url, self.api_key, uid
        );
        if let Some(date) = date {
            url.push_str(&format!("&date={date}"));
        }
        let response = self.http.get(&url).send().await?;
        self.parse_response(response).await
    }

    /// Fetch stops for many threads concurrently, bounded by this
    /// client's semaphore. Individual failures don't abort the batch;
    /// they surface as `None` in the returned, order-preserving vector.
    pub async fn bulk_thread_stops(
        &self,
        queries: Vec<(String, Option<String>)>,
    ) -> Vec<Option<ThreadStopsResponse>> {
        stream::iter(queries)
            .map(|(uid, date)| async move {
                self.thread_stops(&uid, date.as_deref()).await.ok()
            })
            .buffer_unordered(self.semaphore.available_permits().max(1))
            .collect()
            .await
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ScheduleError> {
        let status = response.status();
        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(ScheduleError::Unauthorized);
        }
        if status.as_u16() == 429 {
            return Err(ScheduleError::RateLimited);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ScheduleError::Api {
                status: status.as_u16(),
                message,
            });
        }
        response
            .json::<T>()
            .await
            .map_err(|e| ScheduleError::Json(e.to_string()))
    }
}

impl ScheduleSource for ScheduleClient {
    async fn station_schedule(
        &self,
        station: &StationCode,
        date: &str,
        event: Event,
    ) -> Result<Option<Arc<ScheduleResponse>>, ScheduleError> {
        Ok(ScheduleClient::station_schedule(self, station, date, event)
            .await?
            .map(Arc::new))
    }

    async fn thread_stops(
        &self,
        uid: &str,
        date: Option<&str>,
    ) -> Result<ThreadStopsResponse, ScheduleError> {
        ScheduleClient::thread_stops(self, uid, date).await
    }

    async fn bulk_thread_stops(
        &self,
        queries: Vec<(String, Option<String>)>,
    ) -> Vec<Option<ThreadStopsResponse>> {
        ScheduleClient::bulk_thread_stops(self, queries).await
    }
}
