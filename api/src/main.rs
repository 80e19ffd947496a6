use actix_web::{App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

use hub_api::app::{app_data, routes};
use hub_api::bootstrap::{build_state, parse_env_flag};
use hub_api::middleware::{AccessLog, Recovery};
use hub_api::telemetry;
use hub_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let env_name = parse_env_flag(std::env::args().skip(1));

    let config = AppConfig::load(env_name.as_deref()).context("loading configuration")?;
    telemetry::init(&config).context("initialising tracing")?;

    tracing::info!(
        app = %config.app.name,
        environment = %config.app.env,
        "Starting Gohub API server"
    );

    let state = build_state(&config).await.context("wiring services")?;
    let bind_address = config.app.bind_address();
    tracing::info!(address = %bind_address, "Server will bind");

    HttpServer::new(move || {
        App::new()
            .configure(app_data(state.clone()))
            // Last wrap runs first: request span, then access log, then recovery
            .wrap(Recovery)
            .wrap(AccessLog)
            .wrap(TracingLogger::default())
            .configure(routes)
    })
    .bind(&bind_address)
    .with_context(|| format!("binding {}", bind_address))?
    .run()
    .await?;

    Ok(())
}
