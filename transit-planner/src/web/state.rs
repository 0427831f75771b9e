//! Application state for the web layer.

use std::sync::Arc;

use crate::graph::Neo4jGraphStore;
use crate::journey::JourneyService;
use crate::schedule::MemoizedScheduleClient;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub journeys: Arc<JourneyService<MemoizedScheduleClient, Neo4jGraphStore>>,
}

impl AppState {
    pub fn new(journeys: Arc<JourneyService<MemoizedScheduleClient, Neo4jGraphStore>>) -> Self {
        Self { journeys }
    }
}
