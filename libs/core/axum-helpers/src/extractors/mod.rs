//! Custom extractors for Axum handlers.
//!
//! Rejections render through the response envelope, and convert into domain
//! errors when a handler takes `Result<Extractor, Rejection>`.

pub mod id_path;
pub mod json_body;

pub use id_path::{IdPath, IdRejection};
pub use json_body::{BodyRejection, JsonBody};
