//! Image relay library.
//!
//! Fetches a caller-supplied image URL server-side and re-serves the bytes
//! with permissive cross-origin headers, so browser code can read pixels
//! from images hosted on origins that do not send CORS headers.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod relay;

pub use config::RelayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
