//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    extract::State,
};

use crate::domain::SettlementCode;
use crate::journey::JourneyError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/journey/plan", post(plan_journey))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

#[tracing::instrument(skip(state, body))]
async fn plan_journey(State(state): State<AppState>, body: Bytes) -> Result<Response, AppError> {
    // Parse JSON manually so we can log the body on failure.
    let req: PlanJourneyRequest = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(error = %e, body = %String::from_utf8_lossy(&body), "invalid journey plan request body");
        AppError::BadRequest {
            message: format!("invalid JSON: {e}"),
        }
    })?;

    let origin = SettlementCode::parse(&req.origin_settlement).map_err(|_| AppError::BadRequest {
        message: format!("invalid origin settlement code: {}", req.origin_settlement),
    })?;
    let destination =
        SettlementCode::parse(&req.destination_settlement).map_err(|_| AppError::BadRequest {
            message: format!("invalid destination settlement code: {}", req.destination_settlement),
        })?;

    let journey = state
        .journeys
        .plan(&origin, &destination, req.start_instant, req.mode)
        .await?;

    Ok(Json(JourneyResponse::from_journey(&journey)).into_response())
}

#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<JourneyError> for AppError {
    fn from(e: JourneyError) -> Self {
        match &e {
            JourneyError::UnknownSettlement(_) | JourneyError::EmptySettlement(_) => {
                AppError::NotFound { message: e.to_string() }
            }
            JourneyError::Search(search_err) => match search_err {
                crate::search::SearchError::NoRoute => AppError::NotFound { message: e.to_string() },
                crate::search::SearchError::InvalidRequest(_) => {
                    AppError::BadRequest { message: e.to_string() }
                }
                _ => AppError::Internal { message: e.to_string() },
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message.clone()),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message.clone()),
        };

        tracing::error!(%status, %message, "request failed");

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn journey_error_maps_to_expected_status() {
        let code = SettlementCode::parse("c1").unwrap();
        let err: AppError = JourneyError::UnknownSettlement(code).into();
        assert!(matches!(err, AppError::NotFound { .. }));

        let err: AppError = JourneyError::Search(crate::search::SearchError::NoRoute).into();
        assert!(matches!(err, AppError::NotFound { .. }));

        let err: AppError =
            JourneyError::Search(crate::search::SearchError::InvalidRequest("bad".into())).into();
        assert!(matches!(err, AppError::BadRequest { .. }));
    }
}
