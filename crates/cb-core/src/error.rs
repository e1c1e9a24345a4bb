//! # AppError
//!
//! Centralized error handling for the Coinboard ecosystem.
//! Maps domain-specific failures to actionable error types.

use thiserror::Error;

/// The primary error type for all cb-core operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (e.g., Post, account)
    #[error("{0} not found with ID {1}")]
    NotFound(String, String),

    /// Validation failure (e.g., empty required field, non-positive amount)
    #[error("validation error: {0}")]
    ValidationError(String),

    /// Ownership/auth failure (e.g., editing another user's post)
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Remote collaborator failure (network error, non-2xx response)
    #[error("remote service error: {0}")]
    Remote(String),

    /// Infrastructure failure that is none of the above
    #[error("internal service error: {0}")]
    Internal(String),
}

/// A specialized Result type for Coinboard logic.
pub type Result<T> = std::result::Result<T, AppError>;
