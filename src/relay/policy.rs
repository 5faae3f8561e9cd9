//! Target URL policy.
//!
//! # Responsibilities
//! - Parse the caller-supplied target as an absolute URL
//! - Enforce the scheme allow-list
//! - Enforce the host allow-list (exact or `*.suffix`)
//!
//! # Design Decisions
//! - Host matching is case-insensitive
//! - IPv6 literals match in either bare or bracketed form
//! - Empty host list = any host
//! - No regex; patterns are exact names or dotted suffixes

use std::net::Ipv6Addr;

use url::Url;

use crate::config::UpstreamConfig;
use crate::relay::RelayError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum HostPattern {
    Exact(String),
    /// Stored with its leading dot, e.g. ".example.com".
    Suffix(String),
}

impl HostPattern {
    fn parse(pattern: &str) -> Self {
        // Url renders IPv6 hosts bracketed and compressed, e.g. "[::1]".
        let inner = pattern
            .strip_prefix('[')
            .and_then(|p| p.strip_suffix(']'))
            .unwrap_or(pattern);
        if let Ok(addr) = inner.parse::<Ipv6Addr>() {
            return HostPattern::Exact(format!("[{}]", addr));
        }

        let pattern = pattern.to_ascii_lowercase();
        match pattern.strip_prefix('*') {
            Some(suffix) => HostPattern::Suffix(suffix.to_string()),
            None => HostPattern::Exact(pattern),
        }
    }

    fn matches(&self, host: &str) -> bool {
        match self {
            HostPattern::Exact(expected) => host == expected,
            HostPattern::Suffix(suffix) => host.len() > suffix.len() && host.ends_with(suffix.as_str()),
        }
    }
}

/// Decides which upstream URLs the relay may fetch.
#[derive(Debug, Clone)]
pub struct UrlPolicy {
    schemes: Vec<String>,
    hosts: Vec<HostPattern>,
}

impl UrlPolicy {
    pub fn from_config(config: &UpstreamConfig) -> Self {
        Self {
            schemes: config
                .allowed_schemes
                .iter()
                .map(|s| s.to_ascii_lowercase())
                .collect(),
            hosts: config.allowed_hosts.iter().map(|h| HostPattern::parse(h)).collect(),
        }
    }

    /// Parse `raw` and check it against the policy.
    pub fn check(&self, raw: &str) -> Result<Url, RelayError> {
        let url = Url::parse(raw.trim()).map_err(|e| RelayError::InvalidUrl(e.to_string()))?;
        self.permits(&url)?;
        Ok(url)
    }

    /// Check an already parsed URL. Also applied to every redirect hop.
    pub fn permits(&self, url: &Url) -> Result<(), RelayError> {
        if !self.schemes.iter().any(|s| s == url.scheme()) {
            return Err(RelayError::InvalidUrl(format!(
                "scheme '{}' is not allowed",
                url.scheme()
            )));
        }

        let host = url
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| RelayError::InvalidUrl("URL has no host".to_string()))?
            .to_ascii_lowercase();

        if self.hosts.is_empty() || self.hosts.iter().any(|p| p.matches(&host)) {
            Ok(())
        } else {
            Err(RelayError::InvalidUrl(format!("host '{}' is not allowed", host)))
        }
    }
}
