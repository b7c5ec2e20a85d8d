//! Service error types.
//!
//! The analyzers themselves never fail; every degenerate input resolves to a
//! documented default. These errors come from the service around them:
//! request limits, lookups and configuration.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Errors raised by the service layer.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("batch has {count} texts, limit is {limit}")]
    BatchTooLarge { count: usize, limit: usize },

    #[error("request has {count} batches, limit is {limit}")]
    TooManyBatches { count: usize, limit: usize },

    #[error("text {index} is {size} bytes, limit is {limit}")]
    TextTooLarge {
        index: usize,
        size: usize,
        limit: usize,
    },

    #[error("unknown analyzer: {0}")]
    UnknownAnalyzer(String),

    #[error("history entry not found: {0}")]
    HistoryEntryNotFound(Uuid),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Result alias for service operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

impl AnalyticsError {
    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AnalyticsError::BatchTooLarge { .. }
            | AnalyticsError::TooManyBatches { .. }
            | AnalyticsError::TextTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AnalyticsError::UnknownAnalyzer(_) | AnalyticsError::HistoryEntryNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            AnalyticsError::InvalidConfig(_)
            | AnalyticsError::Config(_)
            | AnalyticsError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AnalyticsError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let err = AnalyticsError::BatchTooLarge {
            count: 10,
            limit: 5,
        };
        assert_eq!(err.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(err.to_string(), "batch has 10 texts, limit is 5");

        let err = AnalyticsError::UnknownAnalyzer("tone".to_string());
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

        let err = AnalyticsError::Internal("boom".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
