//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay.
//! All types derive Serde traits for deserialization from config files.

use std::net::{AddrParseError, IpAddr, SocketAddr};

use serde::{Deserialize, Serialize};

/// Port used when neither the config file, `PORT`, nor `--port` set one.
pub const DEFAULT_PORT: u16 = 3001;

/// Root configuration for the image relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener and inbound request settings.
    pub server: ServerConfig,

    /// Outbound fetch settings.
    pub upstream: UpstreamConfig,

    /// How relayed responses are labelled.
    pub response: ResponseConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// IP address to bind (e.g., "0.0.0.0" or "::").
    pub host: String,

    /// TCP port to bind.
    pub port: u16,

    /// Upper bound on total handler time, in seconds.
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    /// Resolve host and port into a bindable socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        let ip: IpAddr = self.host.parse()?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            request_timeout_secs: 60,
        }
    }
}

/// Outbound (upstream) fetch configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Deadline for the whole upstream exchange, body included, in seconds.
    pub timeout_secs: u64,

    /// Deadline for establishing the upstream connection, in seconds.
    pub connect_timeout_secs: u64,

    /// Largest upstream body the relay will buffer.
    pub max_body_bytes: u64,

    /// Maximum number of redirects followed per fetch.
    pub max_redirects: usize,

    /// URL schemes the relay may fetch.
    pub allowed_schemes: Vec<String>,

    /// Host allow-list. Empty means any host.
    /// Entries are exact hostnames, `*.suffix` wildcards, or IPv6
    /// literals (`::1` or `[::1]`).
    pub allowed_hosts: Vec<String>,

    /// User-Agent sent upstream.
    pub user_agent: String,

    /// Honour HTTP_PROXY / HTTPS_PROXY from the environment.
    pub use_env_proxy: bool,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            connect_timeout_secs: 10,
            max_body_bytes: 20 * 1024 * 1024, // 20MB
            max_redirects: 10,
            allowed_schemes: vec!["http".to_string(), "https".to_string()],
            allowed_hosts: Vec::new(),
            user_agent: concat!("image-relay/", env!("CARGO_PKG_VERSION")).to_string(),
            use_env_proxy: true,
        }
    }
}

/// Response labelling configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ResponseConfig {
    pub content_type: ContentTypeMode,
}

/// Content-Type policy for relayed images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContentTypeMode {
    /// Always `image/png`, whatever the upstream declared.
    #[default]
    Fixed,
    /// Forward the upstream `image/*` type, falling back to `image/png`.
    Passthrough,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    pub log_level: String,

    /// Human-readable or JSON log lines.
    pub log_format: LogFormat,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
