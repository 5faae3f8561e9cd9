//! Image relay core.
//!
//! # Data Flow
//! ```text
//! ?url=<target>
//!     → policy.rs (parse, scheme/host allow-list)
//!     → upstream.rs (single GET, deadline, size cap)
//!     → FetchedImage or RelayError
//!     → error.rs (RelayError → 400/500 plain text)
//! ```
//!
//! # Design Decisions
//! - Stateless: no cache, nothing shared but immutable config and the client pool
//! - One upstream attempt per request
//! - Validation failures never reach the network

pub mod error;
pub mod policy;
pub mod upstream;

pub use error::RelayError;
pub use policy::UrlPolicy;
pub use upstream::{FetchedImage, UpstreamClient};
