//! Errors from the schedule source client.

#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("request to schedule source failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("schedule source returned unauthorized")]
    Unauthorized,

    #[error("schedule source rate limited this client")]
    RateLimited,

    #[error("schedule source returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("failed to parse schedule source response: {0}")]
    Json(String),

    #[error("failed to read or write the miss cache: {0}")]
    MissCache(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            ScheduleError::Unauthorized.to_string(),
            "schedule source returned unauthorized"
        );
        assert_eq!(
            ScheduleError::RateLimited.to_string(),
            "schedule source rate limited this client"
        );
        let err = ScheduleError::Api {
            status: 500,
            message: "boom".into(),
        };
        assert_eq!(err.to_string(), "schedule source returned status 500: boom");
    }
}
