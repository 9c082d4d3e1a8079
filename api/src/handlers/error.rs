//! Maps domain errors onto HTTP responses.
//!
//! Lifecycle errors carry caller-facing messages and map to 400, except
//! for the attempt-budget exhaustion which maps to 429. Storage and
//! internal failures are logged in full and surfaced with an opaque body.

use actix_web::HttpResponse;

use vm_core::errors::{DomainError, OtpError};

use crate::dto::ErrorResponse;

/// Convert a domain error into the HTTP response for it.
pub fn domain_error_response(error: &DomainError) -> HttpResponse {
    match error {
        DomainError::Otp(otp_error) => otp_error_response(otp_error),
        DomainError::Validation { message } => {
            HttpResponse::BadRequest().json(ErrorResponse::new(message.clone()))
        }
        DomainError::NotFound { resource } => {
            HttpResponse::NotFound().json(ErrorResponse::new(format!("{} not found", resource)))
        }
        DomainError::Storage { message } => {
            log::error!("Storage error: {}", message);
            HttpResponse::InternalServerError()
                .json(ErrorResponse::new("Failed to process request"))
        }
        DomainError::Internal { message } => {
            log::error!("Internal error: {}", message);
            HttpResponse::InternalServerError()
                .json(ErrorResponse::new("Failed to process request"))
        }
    }
}

fn otp_error_response(error: &OtpError) -> HttpResponse {
    match error {
        OtpError::TooManyAttempts => {
            HttpResponse::TooManyRequests().json(ErrorResponse::new(error.to_string()))
        }
        _ => HttpResponse::BadRequest().json(ErrorResponse::new(error.to_string())),
    }
}
