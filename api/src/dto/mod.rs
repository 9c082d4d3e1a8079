//! Request and response data transfer objects.

pub mod otp;

pub use otp::{
    ErrorResponse, PasswordResetResponse, RequestOtpRequest, RequestOtpResponse,
    VerifiedResponse, VerifyOtpRequest,
};
