//! Business services containing domain logic and use cases.

pub mod otp;

// Re-export commonly used types
pub use otp::{
    generator, mask_email, IssuedOtp, OtpService, OtpServiceConfig, UnknownUserPolicy,
    VerifyOutcome,
};
