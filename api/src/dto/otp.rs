//! DTOs for the OTP request and verify endpoints.
//!
//! Missing JSON fields deserialize to empty strings rather than rejecting
//! the body outright, so the handlers can answer with the documented
//! field-presence messages instead of a serde error.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request body for `POST /api/v1/otp/request`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RequestOtpRequest {
    /// Email address to issue a code for
    #[serde(default)]
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
}

/// Request body for `POST /api/v1/otp/verify`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VerifyOtpRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Email and OTP are required"))]
    pub email: String,

    /// The plaintext code being checked
    #[serde(default)]
    #[validate(length(min = 1, message = "Email and OTP are required"))]
    pub otp: String,

    /// When present, a successful verification also resets the password
    pub new_password: Option<String>,
}

/// Success body for `POST /api/v1/otp/request`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestOtpResponse {
    pub success: bool,
    /// Plaintext code, returned to the caller responsible for delivery
    pub otp: String,
    pub message: String,
}

/// Success body for a verification without password reset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifiedResponse {
    pub success: bool,
    pub verified: bool,
    pub message: String,
}

/// Success body for a verification that also reset the password
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordResetResponse {
    pub success: bool,
    pub password_reset: bool,
    pub message: String,
}

/// Error body shared by all endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
