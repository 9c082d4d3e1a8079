//! Configuration for the OTP lifecycle service

use crate::domain::entities::otp_record::{
    DEFAULT_EXPIRATION_MINUTES, MAX_ATTEMPTS, MIN_PASSWORD_LENGTH,
};

/// Policy for the reset sub-path when no user document matches the email.
///
/// The original behavior reports success regardless, which avoids leaking
/// account existence but can silently drop a password change. Both readings
/// are defensible, so the choice is configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnknownUserPolicy {
    /// Report `PasswordReset` success and delete the OTP record even when
    /// no user matched. Does not reveal whether an account exists.
    Ignore,
    /// Fail the reset with a distinct error. The verified OTP record is
    /// preserved so the flow is not consumed by the failure.
    Reject,
}

/// Configuration for the OTP lifecycle service
#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// Minutes from creation until a code expires
    pub code_expiration_minutes: i64,
    /// Attempt budget per record; reaching it is terminal
    pub max_attempts: i32,
    /// Minimum accepted replacement password length
    pub min_password_length: usize,
    /// How the reset sub-path treats a missing user account
    pub unknown_user_policy: UnknownUserPolicy,
    /// Upper bound on candidate records scanned per email lookup
    pub lookup_limit: usize,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self {
            code_expiration_minutes: DEFAULT_EXPIRATION_MINUTES,
            max_attempts: MAX_ATTEMPTS,
            min_password_length: MIN_PASSWORD_LENGTH,
            unknown_user_policy: UnknownUserPolicy::Ignore,
            lookup_limit: 10,
        }
    }
}
