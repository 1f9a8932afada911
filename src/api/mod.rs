//! API module
//!
//! HTTP API endpoints and middleware.

pub mod middleware;
pub mod params;
pub mod routes;

pub use routes::{build_router, AppState, SERVICE_NAME};
