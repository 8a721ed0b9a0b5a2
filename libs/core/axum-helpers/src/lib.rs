//! # Axum Helpers
//!
//! Shared pieces for the inventory HTTP surface.
//!
//! - **[`envelope`]**: `{message, data, error}` response writer
//! - **[`extractors`]**: integer id path and JSON body extractors with envelope rejections
//! - **[`server`]**: serving with graceful shutdown, tracing layer, OpenAPI and health routes

pub mod envelope;
pub mod extractors;
pub mod server;

pub use envelope::{Envelope, JSON_CONTENT_TYPE};
pub use extractors::{BodyRejection, IdPath, IdRejection, JsonBody};
pub use server::{
    HealthResponse, create_app, health_router, openapi_router, shutdown_signal, with_http_tracing,
};
