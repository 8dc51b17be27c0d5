//! Error taxonomy for the campaign operations.
//!
//! Remote failures are deliberately coarse: callers learn that a lookup or a
//! write failed, never which driver error caused it. Validation and conflict
//! rejections carry the user-facing detail.

use serde::Serialize;

/// A single inline field rejection, reported back next to the form field.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Local field-level validation failed; nothing was sent to the store.
    #[error("validation failed")]
    Validation(Vec<FieldError>),

    /// The existence/conflict lookup failed, so the current state is unknown.
    #[error("existence check failed: {0}")]
    ExistenceCheck(#[source] sqlx::Error),

    /// An insert or update failed; no compensating rollback is attempted.
    #[error("write failed: {0}")]
    Write(#[source] sqlx::Error),

    /// The submission lost to an already-stored row (schedule overlap or a
    /// uniqueness constraint). State was not mutated by this call.
    #[error("{0}")]
    Conflict(String),
}

impl AppError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        AppError::Validation(vec![FieldError::new(field, message)])
    }

    /// Classifies a failed write: uniqueness violations become `Conflict`,
    /// everything else stays a generic `Write` failure.
    pub fn from_write(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict("A record for this key already exists.".to_string())
            }
            _ => AppError::Write(err),
        }
    }
}
