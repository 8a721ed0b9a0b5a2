//! Integer id path parameter extractor.

use crate::envelope::{self, messages};
use axum::{
    extract::{FromRequestParts, Path},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Extractor for a non-negative integer id path parameter.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum::routing::get;
/// use axum_helpers::extractors::IdPath;
///
/// async fn get_product(IdPath(id): IdPath) -> String {
///     format!("Product ID: {}", id)
/// }
///
/// let app = Router::new().route("/products/{id}", get(get_product));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdPath(pub i32);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdRejection {
    #[error("missing path parameter: {0}")]
    Missing(String),

    #[error("'{0}' is not a non-negative integer")]
    NotAnInteger(String),
}

impl IdPath {
    pub fn parse(raw: &str) -> Result<Self, IdRejection> {
        match raw.parse::<i32>() {
            Ok(id) if id >= 0 => Ok(IdPath(id)),
            _ => Err(IdRejection::NotAnInteger(raw.to_string())),
        }
    }
}

impl IntoResponse for IdRejection {
    fn into_response(self) -> Response {
        tracing::info!(error = %self, "Rejected id path parameter");
        envelope::failure(StatusCode::BAD_REQUEST, messages::INVALID_PARAM)
    }
}

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = IdRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| IdRejection::Missing(e.body_text()))?;

        IdPath::parse(&raw)
    }
}
