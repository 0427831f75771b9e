//! Time-dependent bidirectional A* search over the lazily materialised
//! transit graph.

mod astar;
mod config;
mod error;
mod heuristic;

pub use astar::AStarSearch;
pub use config::SearchConfig;
pub use error::SearchError;
pub use heuristic::{haversine_km, LatLonCache};
