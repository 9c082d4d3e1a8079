use actix_web::{web, HttpResponse};
use validator::Validate;

use vm_core::repositories::{OtpRepository, UserRepository};
use vm_core::services::otp::mask_email;

use crate::dto::{ErrorResponse, RequestOtpRequest, RequestOtpResponse};
use crate::handlers::domain_error_response;
use crate::routes::otp::AppState;

/// Handler for POST /api/v1/otp/request
///
/// Issues a fresh 6-digit code for the given email, replacing any code
/// previously issued to it. The plaintext code is returned in the body;
/// only its hash is stored.
///
/// # Responses
/// * 200 - `{ "success": true, "otp": "482913", "message": "OTP generated" }`
/// * 400 - missing or malformed email
/// * 500 - storage failure
pub async fn request_otp<O, U>(
    state: web::Data<AppState<O, U>>,
    request: web::Json<RequestOtpRequest>,
) -> HttpResponse
where
    O: OtpRepository + 'static,
    U: UserRepository + 'static,
{
    if request.validate().is_err() {
        return HttpResponse::BadRequest().json(ErrorResponse::new("Email is required"));
    }

    log::info!(
        "Processing OTP request for email: {}",
        mask_email(&request.email)
    );

    match state.otp_service.request_otp(&request.email).await {
        Ok(issued) => HttpResponse::Ok().json(RequestOtpResponse {
            success: true,
            otp: issued.code,
            message: "OTP generated".to_string(),
        }),
        Err(error) => {
            log::warn!(
                "OTP request failed for email {}: {}",
                mask_email(&request.email),
                error
            );
            domain_error_response(&error)
        }
    }
}
