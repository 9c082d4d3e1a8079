//! OTP endpoints: code issuance and verification.

pub mod request;
pub mod verify;

use std::sync::Arc;

use vm_core::repositories::{OtpRepository, UserRepository};
use vm_core::services::otp::OtpService;

pub use request::request_otp;
pub use verify::verify_otp;

/// Shared application state holding the OTP service.
pub struct AppState<O, U>
where
    O: OtpRepository,
    U: UserRepository,
{
    pub otp_service: Arc<OtpService<O, U>>,
}
