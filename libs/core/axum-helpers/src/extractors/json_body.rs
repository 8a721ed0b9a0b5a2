//! JSON body extractor whose rejection uses the response envelope.

use crate::envelope::{self, messages};
use axum::{
    extract::{FromRequest, Json, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use thiserror::Error;

/// JSON body extractor.
///
/// Any failure to read or deserialize the body (wrong content type, syntax
/// error, missing or mistyped field) becomes a [`BodyRejection`].
pub struct JsonBody<T>(pub T);

#[derive(Debug, Error)]
#[error("{0}")]
pub struct BodyRejection(String);

impl IntoResponse for BodyRejection {
    fn into_response(self) -> Response {
        tracing::info!(error = %self, "Rejected request body");
        envelope::failure(StatusCode::BAD_REQUEST, messages::INVALID_JSON)
    }
}

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = BodyRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| BodyRejection(e.body_text()))?;

        Ok(JsonBody(data))
    }
}
