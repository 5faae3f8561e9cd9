//! Route handlers.

use std::time::Instant;

use axum::{
    extract::{RawQuery, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::http::request::{extract_target, request_id};
use crate::http::response::image_response;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::relay::{FetchedImage, RelayError};

/// `GET /proxy-image?url=<absolute url>`
pub async fn relay_image(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Response {
    let start = Instant::now();
    let request_id = request_id(&headers).to_owned();

    match relay(&state, query.as_deref(), &request_id).await {
        Ok(image) => {
            let bytes = image.bytes.len();
            metrics::record_request("success", 200, start);
            tracing::info!(request_id = %request_id, bytes, "Image relayed");
            image_response(image, state.content_type)
        }
        Err(err) => {
            let status = err.status();
            if status.is_client_error() {
                tracing::warn!(request_id = %request_id, error = %err, "Rejected relay request");
            } else {
                tracing::error!(
                    request_id = %request_id,
                    error = %err,
                    source = ?std::error::Error::source(&err),
                    "Proxy error"
                );
            }
            metrics::record_request(err.outcome(), status.as_u16(), start);
            err.into_response()
        }
    }
}

async fn relay(
    state: &AppState,
    query: Option<&str>,
    request_id: &str,
) -> Result<FetchedImage, RelayError> {
    let target = extract_target(query)?;
    let url = state.policy.check(&target)?;

    tracing::info!(
        request_id = %request_id,
        host = url.host_str().unwrap_or_default(),
        "Fetching image from upstream"
    );
    state.upstream.fetch(url).await
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
}

/// `GET /health`
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
