//! Application factory
//!
//! Builds the Actix-web application around an already constructed OTP
//! service, so the server binary and the integration tests share one wiring.

use actix_web::{body::MessageBody, error, middleware::Logger, web, App, HttpResponse};

use otp_core::repositories::SecretStore;
use otp_core::services::Notifier;
use otp_shared::errors::{error_codes, ErrorResponse};

use crate::middleware::IpAllowList;
use crate::routes::otp::{send, verify, AppState};

/// Create and configure the application with all dependencies
pub fn create_app<S, N>(
    app_state: web::Data<AppState<S, N>>,
    allow_list: IpAllowList,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    S: SecretStore + ?Sized + 'static,
    N: Notifier + ?Sized + 'static,
{
    App::new()
        // Add application state
        .app_data(app_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        // Logger is outermost so rejected requests are logged too
        .wrap(allow_list)
        .wrap(Logger::default())
        .route("/health", web::get().to(health_check))
        .route("/send", web::post().to(send::<S, N>))
        .route("/verify", web::post().to(verify::<S, N>))
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Malformed JSON bodies get the same error shape as failed validation
fn json_error_handler(err: error::JsonPayloadError, _req: &actix_web::HttpRequest) -> error::Error {
    tracing::warn!(error = %err, "Rejected malformed JSON body");
    let response = HttpResponse::BadRequest().json(ErrorResponse::new(
        error_codes::VALIDATION_ERROR,
        "Invalid request body",
    ));
    error::InternalError::from_response(err, response).into()
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "otp-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
