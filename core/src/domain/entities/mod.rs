//! Domain entities representing core business objects.

pub mod otp_record;
pub mod user;

// Re-export commonly used types
pub use otp_record::{
    NewOtpRecord, OtpRecord, CODE_LENGTH, DEFAULT_EXPIRATION_MINUTES, MAX_ATTEMPTS,
    MIN_PASSWORD_LENGTH,
};
pub use user::UserRecord;
