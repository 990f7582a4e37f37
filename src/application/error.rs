//! API error taxonomy
//!
//! Every controller operation resolves to one of these; the HTTP layer maps
//! each variant to a status code and JSON body. Nothing propagates past a
//! handler uncaught.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed, missing, or out-of-range field -> 400
    #[error("{0}")]
    Validation(String),

    /// Identifier does not resolve -> 404
    #[error("{0}")]
    NotFound(String),

    /// Uniqueness constraint violated -> 409
    #[error("{0}")]
    Conflict(String),

    /// Foreign key does not resolve -> 400
    #[error("{0}")]
    BadReference(String),

    /// Dependent rows block the delete -> 400, reporting the count
    #[error("{message}")]
    DeleteBlocked { message: String, characters_count: i64 },

    /// Anything else, including storage faults -> 500
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ApiError::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        ApiError::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        ApiError::Conflict(msg.into())
    }

    pub fn bad_reference(msg: impl Into<String>) -> Self {
        ApiError::BadReference(msg.into())
    }
}
