//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, span, ?url= extraction)
//!     → handlers.rs (relay_image → crate::relay, health)
//!     → response.rs (image bytes + Content-Type) or RelayError response
//!     → CORS + x-request-id headers added on the way out
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::{build_router, AppState, HttpServer};
