//! Translation of backend failures into [`ErrorKind`].
//!
//! The storage adapter never inspects driver errors itself; it hands every
//! [`DbErr`] to an [`ErrorClassifier`] and wraps the result in a
//! [`ProductError`] that still carries the backend's message.

use sea_orm::{DbErr, RuntimeErr, SqlErr};

use crate::error::{ErrorKind, ProductError};

/// Maps a backend error onto the product error taxonomy.
pub trait ErrorClassifier: Send + Sync {
    fn classify(&self, err: &DbErr) -> ErrorKind;

    /// Classify `err` and keep its text as the diagnostic cause.
    fn to_product_error(&self, err: DbErr) -> ProductError {
        let kind = self.classify(&err);
        ProductError::from_kind(kind, err.to_string())
    }
}

/// Backend-neutral classifier built on [`DbErr::sql_err`].
///
/// Covers PostgreSQL, MySQL (1062 / 1452) and SQLite constraint codes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlErrClassifier;

impl ErrorClassifier for SqlErrClassifier {
    fn classify(&self, err: &DbErr) -> ErrorKind {
        if let Some(kind) = not_found_kind(err) {
            return kind;
        }

        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => ErrorKind::NotUnique,
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => ErrorKind::Relation,
            _ => ErrorKind::Internal,
        }
    }
}

/// Classifier driven by explicit SQLSTATE tables.
#[derive(Debug, Clone)]
pub struct SqlStateClassifier {
    unique: Vec<String>,
    foreign_key: Vec<String>,
}

impl SqlStateClassifier {
    pub fn new<U, F>(unique: U, foreign_key: F) -> Self
    where
        U: IntoIterator,
        U::Item: Into<String>,
        F: IntoIterator,
        F::Item: Into<String>,
    {
        Self {
            unique: unique.into_iter().map(Into::into).collect(),
            foreign_key: foreign_key.into_iter().map(Into::into).collect(),
        }
    }

    /// `unique_violation` and `foreign_key_violation`
    pub fn postgres() -> Self {
        Self::new(["23505"], ["23503"])
    }

    fn kind_for_code(&self, code: &str) -> ErrorKind {
        if self.unique.iter().any(|c| c == code) {
            ErrorKind::NotUnique
        } else if self.foreign_key.iter().any(|c| c == code) {
            ErrorKind::Relation
        } else {
            ErrorKind::Internal
        }
    }
}

impl ErrorClassifier for SqlStateClassifier {
    fn classify(&self, err: &DbErr) -> ErrorKind {
        if let Some(kind) = not_found_kind(err) {
            return kind;
        }

        match sql_state(err) {
            Some(code) => self.kind_for_code(&code),
            None => ErrorKind::Internal,
        }
    }
}

fn not_found_kind(err: &DbErr) -> Option<ErrorKind> {
    match err {
        DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => Some(ErrorKind::NotFound),
        _ => None,
    }
}

/// SQLSTATE reported by the driver, if the error came from the database.
fn sql_state(err: &DbErr) -> Option<String> {
    match err {
        DbErr::Exec(RuntimeErr::SqlxError(e)) | DbErr::Query(RuntimeErr::SqlxError(e)) => e
            .as_database_error()
            .and_then(|db| db.code())
            .map(|code| code.into_owned()),
        _ => None,
    }
}
