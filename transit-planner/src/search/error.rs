//! Errors from the search core.

use crate::domain::StationCode;

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("invalid search request: {0}")]
    InvalidRequest(String),

    #[error("failed to fetch connections at {station}: {message}")]
    FetchError { station: StationCode, message: String },

    #[error("search exceeded its time budget")]
    Timeout,

    #[error("no route found between the given stations")]
    NoRoute,
}

impl From<crate::materialiser::MaterialiserError> for SearchError {
    fn from(err: crate::materialiser::MaterialiserError) -> Self {
        SearchError::InvalidRequest(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            SearchError::Timeout.to_string(),
            "search exceeded its time budget"
        );
        assert_eq!(
            SearchError::NoRoute.to_string(),
            "no route found between the given stations"
        );
        let err = SearchError::FetchError {
            station: StationCode::parse("s1").unwrap(),
            message: "boom".into(),
        };
        assert_eq!(err.to_string(), "failed to fetch connections at s1: boom");
    }
}
