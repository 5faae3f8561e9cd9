//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, body cap > 0)
//! - Check that addresses parse before anything binds
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RelayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::{IpAddr, Ipv6Addr, SocketAddr};

use crate::config::schema::RelayConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field, e.g. `upstream.timeout_secs`.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

const SUPPORTED_SCHEMES: [&str; 2] = ["http", "https"];

/// `::1` or `[::1]`.
fn is_ipv6_literal(host: &str) -> bool {
    let inner = host
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host);
    inner.parse::<Ipv6Addr>().is_ok()
}

/// Validate a fully merged configuration.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.host.parse::<IpAddr>().is_err() {
        errors.push(ValidationError::new(
            "server.host",
            format!("'{}' is not an IP address", config.server.host),
        ));
    }
    if config.server.request_timeout_secs == 0 {
        errors.push(ValidationError::new("server.request_timeout_secs", "must be greater than 0"));
    }

    let upstream = &config.upstream;
    if upstream.timeout_secs == 0 {
        errors.push(ValidationError::new("upstream.timeout_secs", "must be greater than 0"));
    }
    if upstream.connect_timeout_secs == 0 {
        errors.push(ValidationError::new("upstream.connect_timeout_secs", "must be greater than 0"));
    }
    if upstream.timeout_secs > 0
        && config.server.request_timeout_secs > 0
        && config.server.request_timeout_secs <= upstream.timeout_secs
    {
        errors.push(ValidationError::new(
            "server.request_timeout_secs",
            format!(
                "must be greater than upstream.timeout_secs ({})",
                upstream.timeout_secs
            ),
        ));
    }
    if upstream.max_body_bytes == 0 {
        errors.push(ValidationError::new("upstream.max_body_bytes", "must be greater than 0"));
    }

    if upstream.allowed_schemes.is_empty() {
        errors.push(ValidationError::new("upstream.allowed_schemes", "must not be empty"));
    }
    for scheme in &upstream.allowed_schemes {
        if !SUPPORTED_SCHEMES.iter().any(|s| s.eq_ignore_ascii_case(scheme)) {
            errors.push(ValidationError::new(
                "upstream.allowed_schemes",
                format!("unsupported scheme '{}'", scheme),
            ));
        }
    }

    for host in &upstream.allowed_hosts {
        if is_ipv6_literal(host) {
            continue;
        }
        let bare = host.strip_prefix("*.").unwrap_or(host);
        if bare.is_empty() || bare.contains(['/', ':', '*', '[', ']']) {
            errors.push(ValidationError::new(
                "upstream.allowed_hosts",
                format!("invalid host pattern '{}'", host),
            ));
        }
    }

    let observability = &config.observability;
    if observability.metrics_enabled && observability.metrics_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
