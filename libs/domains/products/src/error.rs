use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_helpers::envelope;
use axum_helpers::extractors::{BodyRejection, IdRejection};
use thiserror::Error;

/// Failure classes callers branch on.
///
/// Storage and controller code produce a [`ProductError`]; its [`kind`](ProductError::kind)
/// is the only thing that decides the HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    NotFound,
    NotUnique,
    Relation,
    Internal,
}

impl ErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::InvalidInput | ErrorKind::NotUnique => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            // dangling warehouse references stay in the server-error bucket
            ErrorKind::Relation | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Invalid product id: {0}")]
    InvalidId(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Invalid product data: {0}")]
    Validation(String),

    #[error("Product not found: {0}")]
    NotFound(String),

    #[error("Product not unique: {0}")]
    NotUnique(String),

    #[error("Product references a missing warehouse: {0}")]
    Relation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl ProductError {
    /// Build an error of the given kind carrying `cause` for diagnostics.
    ///
    /// `InvalidInput` maps to [`ProductError::Validation`]; the id and body
    /// variants are only created by the extractor conversions below.
    pub fn from_kind(kind: ErrorKind, cause: impl Into<String>) -> Self {
        let cause = cause.into();
        match kind {
            ErrorKind::InvalidInput => ProductError::Validation(cause),
            ErrorKind::NotFound => ProductError::NotFound(cause),
            ErrorKind::NotUnique => ProductError::NotUnique(cause),
            ErrorKind::Relation => ProductError::Relation(cause),
            ErrorKind::Internal => ProductError::Internal(cause),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ProductError::InvalidId(_)
            | ProductError::InvalidBody(_)
            | ProductError::Validation(_) => ErrorKind::InvalidInput,
            ProductError::NotFound(_) => ErrorKind::NotFound,
            ProductError::NotUnique(_) => ErrorKind::NotUnique,
            ProductError::Relation(_) => ErrorKind::Relation,
            ProductError::Internal(_) => ErrorKind::Internal,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.kind().status()
    }

    /// Fixed client-facing message. The cause text never leaves the process.
    pub fn public_message(&self) -> &'static str {
        match self {
            ProductError::InvalidId(_) => envelope::messages::INVALID_PARAM,
            ProductError::InvalidBody(_) => envelope::messages::INVALID_JSON,
            ProductError::Validation(_) => "invalid product data",
            ProductError::NotFound(_) => "product not found",
            ProductError::NotUnique(_) => "product not unique",
            ProductError::Relation(_) | ProductError::Internal(_) => {
                envelope::messages::INTERNAL_ERROR
            }
        }
    }
}

impl From<IdRejection> for ProductError {
    fn from(rejection: IdRejection) -> Self {
        ProductError::InvalidId(rejection.to_string())
    }
}

impl From<BodyRejection> for ProductError {
    fn from(rejection: BodyRejection) -> Self {
        ProductError::InvalidBody(rejection.to_string())
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(kind = ?self.kind(), error = %self, "Product request failed");
        } else {
            tracing::info!(kind = ?self.kind(), error = %self, "Product request rejected");
        }

        envelope::failure(status, self.public_message())
    }
}
