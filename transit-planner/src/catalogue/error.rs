//! Errors for fetching and caching the station catalogue.

#[derive(Debug, thiserror::Error)]
pub enum CatalogueError {
    #[error("request to station catalogue source failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("station catalogue source returned unauthorized")]
    Unauthorized,

    #[error("station catalogue source returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("failed to parse station catalogue response: {0}")]
    Json(String),

    #[error("failed to read or write station catalogue cache: {0}")]
    Cache(String),
}
