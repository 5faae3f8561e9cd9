//! Relay error taxonomy and its HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("No URL provided")]
    MissingUrl,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to fetch image: {0}")]
    UpstreamStatus(u16),

    #[error("Upstream request timed out")]
    Timeout,

    #[error("Upstream body exceeds {0} bytes")]
    BodyTooLarge(u64),

    #[error("{0}")]
    Network(#[source] reqwest::Error),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::MissingUrl | RelayError::InvalidUrl(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Metric label for this failure.
    pub fn outcome(&self) -> &'static str {
        match self {
            RelayError::MissingUrl => "missing_url",
            RelayError::InvalidUrl(_) => "invalid_url",
            RelayError::UpstreamStatus(_) => "upstream_status",
            RelayError::Timeout => "timeout",
            RelayError::BodyTooLarge(_) => "too_large",
            RelayError::Network(_) => "network",
        }
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RelayError::Timeout
        } else {
            RelayError::Network(err)
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = if status.is_client_error() {
            self.to_string()
        } else {
            format!("Error fetching image: {}", self)
        };

        (status, body).into_response()
    }
}
