//! HTTP API layer for the lost & found service.
//!
//! - **Endpoints**: JSON and multipart endpoints under `/api`
//! - **Extractors**: Signed-in and registered caller extraction
//! - **Middleware**: Bearer token authentication
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::router;
pub use middleware::{AppState, auth_middleware};
