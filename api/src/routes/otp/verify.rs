use actix_web::{web, HttpResponse};
use validator::Validate;

use vm_core::repositories::{OtpRepository, UserRepository};
use vm_core::services::otp::{mask_email, VerifyOutcome};

use crate::dto::{ErrorResponse, PasswordResetResponse, VerifiedResponse, VerifyOtpRequest};
use crate::handlers::domain_error_response;
use crate::routes::otp::AppState;

/// Handler for POST /api/v1/otp/verify
///
/// Checks the submitted code against the pending record for the email.
/// When `new_password` is present the verification doubles as a password
/// reset and consumes the record.
///
/// # Responses
/// * 200 - `{ "success": true, "verified": true, "message": "..." }` or
///   `{ "success": true, "password_reset": true, "message": "..." }`
/// * 400 - missing fields, wrong code, expired or absent record
/// * 429 - attempt budget exhausted
/// * 500 - storage failure
pub async fn verify_otp<O, U>(
    state: web::Data<AppState<O, U>>,
    request: web::Json<VerifyOtpRequest>,
) -> HttpResponse
where
    O: OtpRepository + 'static,
    U: UserRepository + 'static,
{
    if request.validate().is_err() {
        return HttpResponse::BadRequest().json(ErrorResponse::new("Email and OTP are required"));
    }

    log::info!(
        "Processing OTP verification for email: {}",
        mask_email(&request.email)
    );

    let outcome = state
        .otp_service
        .verify_otp(
            &request.email,
            &request.otp,
            request.new_password.as_deref(),
        )
        .await;

    match outcome {
        Ok(VerifyOutcome::Verified) => HttpResponse::Ok().json(VerifiedResponse {
            success: true,
            verified: true,
            message: "OTP verified successfully".to_string(),
        }),
        Ok(VerifyOutcome::PasswordReset) => HttpResponse::Ok().json(PasswordResetResponse {
            success: true,
            password_reset: true,
            message: "Password has been reset successfully".to_string(),
        }),
        Err(error) => {
            log::warn!(
                "OTP verification failed for email {}: {}",
                mask_email(&request.email),
                error
            );
            domain_error_response(&error)
        }
    }
}
