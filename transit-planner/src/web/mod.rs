//! Web layer for the journey planner.
//!
//! Provides a thin HTTP facade over the Journey Service: `POST
//! /journey/plan` and `GET /health`.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
