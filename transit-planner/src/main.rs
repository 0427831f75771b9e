use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use transit_planner::catalogue::{CatalogueCache, CatalogueCacheConfig, CatalogueClient, CatalogueClientConfig, StationCatalogue};
use transit_planner::graph::Neo4jGraphStore;
use transit_planner::journey::JourneyService;
use transit_planner::materialiser::Materialiser;
use transit_planner::schedule::{MemoConfig, MemoizedScheduleClient, MissCache, ScheduleClient, ScheduleClientConfig};
use transit_planner::search::{AStarSearch, LatLonCache, SearchConfig};
use transit_planner::web::{create_router, AppState};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let api_key = std::env::var("RASP_API_KEY").expect("RASP_API_KEY must be set");
    let neo4j_uri = std::env::var("NEO4J_URI").unwrap_or_else(|_| "bolt://localhost:7687".to_string());
    let neo4j_user = std::env::var("NEO4J_USER").unwrap_or_else(|_| "neo4j".to_string());
    let neo4j_password = std::env::var("NEO4J_PASSWORD").expect("NEO4J_PASSWORD must be set");

    let catalogue = load_catalogue(&api_key).await;
    let catalogue = Arc::new(catalogue);

    let graph = Neo4jGraphStore::connect(&neo4j_uri, &neo4j_user, &neo4j_password)
        .await
        .expect("failed to connect to the graph store");
    let graph = Arc::new(graph);

    let miss_cache = Arc::new(MissCache::load("station_schedule_misses.json"));
    let schedule_client = ScheduleClient::new(ScheduleClientConfig::new(api_key), miss_cache)
        .expect("failed to build schedule client");
    let schedule = Arc::new(MemoizedScheduleClient::new(Arc::new(schedule_client), MemoConfig::default()));

    let materialiser = Arc::new(Materialiser::new(schedule, graph, catalogue.clone()));

    let mut coords = HashMap::new();
    for station in catalogue.all_stations() {
        if let (Some(lat), Some(lon)) = (station.latitude, station.longitude) {
            coords.insert(station.code.clone(), (lat, lon));
        }
    }
    let latlon = LatLonCache::new(coords);

    let search = Arc::new(AStarSearch::new(materialiser, latlon, SearchConfig::default()));
    let journeys = Arc::new(JourneyService::new(catalogue, search));

    let state = AppState::new(journeys);
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], 3000));
    tracing::info!(%addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

/// Load the station catalogue from the on-disk cache, falling back to a
/// fresh fetch (which is then persisted) if the cache is missing or
/// expired.
async fn load_catalogue(api_key: &str) -> StationCatalogue {
    let cache = CatalogueCache::new(CatalogueCacheConfig::new("resp.json"));
    if let Some(cached) = cache.load() {
        return StationCatalogue::from_response(&cached);
    }

    let client = CatalogueClient::new(CatalogueClientConfig::new(api_key.to_string()))
        .expect("failed to build catalogue client");
    let response = client.fetch_all().await.expect("failed to fetch station catalogue");
    if let Err(e) = cache.save(&response) {
        tracing::warn!(error = %e, "failed to persist catalogue cache");
    }
    StationCatalogue::from_response(&response)
}
