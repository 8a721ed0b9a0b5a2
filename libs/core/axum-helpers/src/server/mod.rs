//! Server infrastructure: serving with graceful shutdown, request tracing,
//! OpenAPI document and liveness endpoints.

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{create_app, openapi_router, with_http_tracing};
pub use health::{HealthResponse, health_router};
pub use shutdown::shutdown_signal;
