use actix_web::{web, HttpServer};
use anyhow::Context;
use dotenvy::dotenv;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use otp_api::app::create_app;
use otp_api::middleware::IpAllowList;
use otp_api::routes::AppState;
use otp_api::telemetry::init_tracing;
use otp_core::services::{OtpService, OtpServiceConfig};
use otp_infra::{create_notifier, InMemorySecretStore};
use otp_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let config = AppConfig::from_env();
    init_tracing(&config.logging);

    info!(environment = %config.environment, "Starting OTP API server");

    let service_config = OtpServiceConfig::from_settings(
        &config.otp,
        Duration::from_secs(config.notifier.timeout_secs),
    )
    .context("invalid TOTP settings")?;

    info!(
        period_secs = service_config.code.period_secs(),
        digits = service_config.code.digits().len(),
        algorithm = %service_config.code.algorithm(),
        skew = service_config.code.skew(),
        interval_secs = service_config.send_interval.as_secs(),
        send_policy = %service_config.send_policy,
        "OTP parameters loaded"
    );

    let store = Arc::new(InMemorySecretStore::new());
    let notifier = create_notifier(&config.notifier, config.environment)
        .context("failed to initialise notifier")?;
    let otp_service = Arc::new(OtpService::new(store, notifier, service_config));

    let app_state = web::Data::new(AppState::new(otp_service));
    let allow_list = IpAllowList::new(&config.server.whitelist);

    info!(bind = %config.server.bind_address, "Server will bind");

    HttpServer::new(move || create_app(app_state.clone(), allow_list.clone()))
        .bind(&config.server.bind_address)
        .with_context(|| format!("failed to bind {}", config.server.bind_address))?
        .run()
        .await?;

    Ok(())
}
