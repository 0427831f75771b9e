//! Abstraction over "give me the schedule for this station", so the
//! materialiser can run against either the real HTTP client or a fixture.

use std::future::Future;
use std::sync::Arc;

use crate::domain::StationCode;

use super::error::ScheduleError;
use super::types::{Event, ScheduleResponse, ThreadStopsResponse};

pub trait ScheduleSource: Send + Sync {
    fn station_schedule(
        &self,
        station: &StationCode,
        date: &str,
        event: Event,
    ) -> impl Future<Output = Result<Option<Arc<ScheduleResponse>>, ScheduleError>> + Send;

    fn thread_stops(
        &self,
        uid: &str,
        date: Option<&str>,
    ) -> impl Future<Output = Result<ThreadStopsResponse, ScheduleError>> + Send;

    /// Fetch stops for many threads concurrently, bounded by whatever
    /// concurrency policy the implementation uses. Individual failures
    /// don't abort the batch; they surface as `None`, in the same order
    /// as `queries`.
    fn bulk_thread_stops(
        &self,
        queries: Vec<(String, Option<String>)>,
    ) -> impl Future<Output = Vec<Option<ThreadStopsResponse>>> + Send;
}
