use std::sync::Arc;

use actix_web::{web, HttpServer};
use dotenvy::dotenv;
use log::info;

use vm_core::services::otp::{OtpService, OtpServiceConfig};
use vm_infra::store::{DocStoreClient, DocStoreOtpRepository, DocStoreUserRepository};

use vm_api::app::create_app;
use vm_api::config::ApiConfig;
use vm_api::routes::otp::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting VeriMail API server");

    let api_config = ApiConfig::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    let store_client = DocStoreClient::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;

    let otp_repository = Arc::new(DocStoreOtpRepository::new(store_client.clone()));
    let user_repository = Arc::new(DocStoreUserRepository::new(store_client));

    let otp_service = Arc::new(OtpService::new(
        otp_repository,
        user_repository,
        OtpServiceConfig::default(),
    ));

    let app_state = web::Data::new(AppState {
        otp_service,
    });

    let bind_address = api_config.bind_address();
    info!("Server will bind to: {}", bind_address);

    HttpServer::new(move || create_app(app_state.clone()))
        .bind(&bind_address)?
        .run()
        .await
}
