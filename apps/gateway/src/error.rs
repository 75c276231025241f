//! Error taxonomy and HTTP mapping.
//!
//! Client-facing messages are fixed strings. Upstream detail and
//! configuration state go to the logs, never into a response body,
//! and attacker-controlled content is never echoed.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use llm::ProviderError;
use serde_json::json;

/// A request-terminating failure.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing or unusable upstream credential.
    #[error("Service configuration error")]
    Config,
    /// Request body failed validation.
    #[error("{0}")]
    Validation(String),
    /// Malformed JSON syntax in the request body.
    #[error("Invalid JSON in request body")]
    BadJson,
    /// Client exceeded its token bucket. The message never reveals
    /// the remaining-token count.
    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,
    /// Upstream connection or timeout failure; retryable.
    #[error("Service temporarily unavailable. Please try again.")]
    UpstreamUnavailable,
    /// Upstream rejected the request (credentials or protocol).
    #[error("Service configuration error")]
    UpstreamRejected,
    /// Anything unclassified.
    #[error("An unexpected error occurred. Please try again.")]
    Internal,
}

impl ApiError {
    /// The HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Config | Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) | Self::BadJson => StatusCode::BAD_REQUEST,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::UpstreamUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::UpstreamRejected => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<ProviderError> for ApiError {
    fn from(e: ProviderError) -> Self {
        match e {
            ProviderError::Timeout | ProviderError::Connect(_) => Self::UpstreamUnavailable,
            ProviderError::Auth(_) | ProviderError::Api(_) => Self::UpstreamRejected,
            ProviderError::Http(_) | ProviderError::Header(_) => Self::Internal,
        }
    }
}

impl From<icore::ValidationError> for ApiError {
    fn from(e: icore::ValidationError) -> Self {
        Self::Validation(e.to_string())
    }
}
