//! Domain-specific error types and error handling.

use thiserror::Error;

/// OTP lifecycle errors surfaced to callers of the verification flow.
///
/// The display strings are the wire messages returned to the trusted relay,
/// so they are part of the external contract.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    #[error("Email is required")]
    MissingEmail,

    #[error("Invalid email format")]
    InvalidEmailFormat,

    #[error("Email and OTP are required")]
    MissingFields,

    #[error("No pending OTP found. Please request a new one.")]
    NotFound,

    #[error("OTP has expired. Please request a new one.")]
    Expired,

    #[error("Too many attempts. Please request a new OTP.")]
    TooManyAttempts,

    #[error("Invalid OTP code. {remaining} attempts remaining.")]
    InvalidCode { remaining: i32 },

    #[error("Password must be at least {min_length} characters")]
    WeakPassword { min_length: usize },

    #[error("No account found for this email")]
    UnknownUser,
}

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to the OTP lifecycle error taxonomy
    #[error(transparent)]
    Otp(#[from] OtpError),
}

pub type DomainResult<T> = Result<T, DomainError>;

/// Failure of the advisory cleanup pass that runs before a new OTP record
/// is created. Callers discard this: the collection may not exist yet on
/// first-ever use, and creation must still succeed. A dedicated type keeps
/// the swallowed case distinguishable in tests.
#[derive(Error, Debug)]
#[error("Cleanup failed: {message}")]
pub struct CleanupError {
    pub message: String,
}

impl From<DomainError> for CleanupError {
    fn from(err: DomainError) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}
