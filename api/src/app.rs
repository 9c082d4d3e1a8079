//! Application factory.
//!
//! Builds the actix-web application from shared state, generic over the
//! repository implementations so integration tests can run against mocks.

use actix_web::error::InternalError;
use actix_web::{middleware::Logger, web, App, HttpResponse};

use vm_core::repositories::{OtpRepository, UserRepository};

use crate::dto::ErrorResponse;
use crate::middleware::cors::create_cors;
use crate::routes::otp::{request_otp, verify_otp, AppState};

/// Malformed request bodies answer with the same `{ "error": ... }` shape
/// as the domain errors.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response =
            HttpResponse::BadRequest().json(ErrorResponse::new(format!("Invalid JSON: {}", err)));
        InternalError::from_response(err, response).into()
    })
}

/// Create and configure the application with all routes and middleware.
pub fn create_app<O, U>(
    app_state: web::Data<AppState<O, U>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    O: OtpRepository + 'static,
    U: UserRepository + 'static,
{
    App::new()
        .app_data(app_state)
        .app_data(json_config())
        .wrap(Logger::default())
        .wrap(create_cors())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1/otp")
                .route("/request", web::post().to(request_otp::<O, U>))
                .route("/verify", web::post().to(verify_otp::<O, U>)),
        )
}

/// Health check endpoint
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "verimail-api",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
