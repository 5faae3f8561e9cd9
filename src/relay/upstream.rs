//! Outbound image fetch.
//!
//! # Responsibilities
//! - Issue exactly one GET per relayed request (no retries)
//! - Enforce connect and total deadlines
//! - Reject non-2xx upstream statuses
//! - Buffer the body up to `max_body_bytes`, aborting past the cap

use std::time::Duration;

use reqwest::{header::CONTENT_TYPE, redirect};
use url::Url;

use crate::config::UpstreamConfig;
use crate::observability::metrics;
use crate::relay::{RelayError, UrlPolicy};

/// A fully buffered upstream image.
#[derive(Debug, Clone)]
pub struct FetchedImage {
    pub bytes: Vec<u8>,
    /// Content-Type the upstream declared, if any.
    pub content_type: Option<String>,
}

/// Shared outbound client. Cheap to clone; connections are pooled internally.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
    max_body_bytes: u64,
}

impl UpstreamClient {
    pub fn new(config: &UpstreamConfig, policy: UrlPolicy) -> Result<Self, reqwest::Error> {
        let max_redirects = config.max_redirects;
        let redirect_policy = redirect::Policy::custom(move |attempt| {
            if attempt.previous().len() > max_redirects {
                attempt.error("too many redirects")
            } else if let Err(e) = policy.permits(attempt.url()) {
                attempt.error(e.to_string())
            } else {
                attempt.follow()
            }
        });

        let mut builder = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .redirect(redirect_policy)
            .user_agent(config.user_agent.clone());
        if !config.use_env_proxy {
            builder = builder.no_proxy();
        }

        Ok(Self {
            client: builder.build()?,
            max_body_bytes: config.max_body_bytes,
        })
    }

    /// Fetch `url` and buffer the whole body.
    pub async fn fetch(&self, url: Url) -> Result<FetchedImage, RelayError> {
        let mut response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = %status, "Upstream returned non-success status");
            return Err(RelayError::UpstreamStatus(status.as_u16()));
        }

        if let Some(len) = response.content_length() {
            if len > self.max_body_bytes {
                tracing::warn!(content_length = len, limit = self.max_body_bytes, "Upstream body too large");
                return Err(RelayError::BodyTooLarge(self.max_body_bytes));
            }
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        let capacity = response.content_length().unwrap_or(0) as usize;
        let mut bytes = Vec::with_capacity(capacity);
        while let Some(chunk) = response.chunk().await? {
            if (bytes.len() + chunk.len()) as u64 > self.max_body_bytes {
                tracing::warn!(limit = self.max_body_bytes, "Upstream body exceeded limit while streaming");
                return Err(RelayError::BodyTooLarge(self.max_body_bytes));
            }
            bytes.extend_from_slice(&chunk);
        }

        metrics::record_upstream_bytes(bytes.len() as u64);
        tracing::debug!(bytes = bytes.len(), content_type = ?content_type, "Upstream fetch complete");

        Ok(FetchedImage { bytes, content_type })
    }
}
