//! Uniform JSON response writer.
//!
//! Every body is `{"message": ..., "data": ... | null, "error": bool}` unless a
//! handler deliberately writes a bare value with [`json`].

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Messages shared by every resource
pub mod messages {
    pub const SUCCESS: &str = "success";
    pub const INVALID_PARAM: &str = "parameter must be int";
    pub const INVALID_JSON: &str = "invalid json";
    pub const INTERNAL_ERROR: &str = "internal error";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub message: String,
    pub data: Option<T>,
    pub error: bool,
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            message: messages::SUCCESS.to_string(),
            data: Some(data),
            error: false,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
            error: true,
        }
    }
}

/// Serialize `body` with the JSON content type.
///
/// A `204` status always yields an empty response. If serialization fails the
/// response degrades to a bare `500` with no body and no content type.
pub fn json<T: Serialize>(status: StatusCode, body: &T) -> Response {
    if status == StatusCode::NO_CONTENT {
        return no_content();
    }

    match serde_json::to_vec(body) {
        Ok(bytes) => (
            status,
            [(
                header::CONTENT_TYPE,
                HeaderValue::from_static(JSON_CONTENT_TYPE),
            )],
            bytes,
        )
            .into_response(),
        Err(err) => {
            tracing::error!(error = %err, "Failed to serialize response body");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// `{"message": "success", "data": data, "error": false}`
pub fn success<T: Serialize>(status: StatusCode, data: T) -> Response {
    json(status, &Envelope::success(data))
}

/// `{"message": message, "data": null, "error": true}`
pub fn failure(status: StatusCode, message: &str) -> Response {
    json(status, &Envelope::<()>::failure(message))
}

pub fn no_content() -> Response {
    StatusCode::NO_CONTENT.into_response()
}
