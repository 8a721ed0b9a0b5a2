//! Inventory API - product and warehouse REST server

use axum_helpers::server::{create_app, health_router, openapi_router, with_http_tracing};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_products::{PgProductRepository, ProductService};
use migration::Migrator;
use tracing::info;

mod api;
mod config;
mod openapi;

use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let db = database::postgres::connect_from_config_with_retry(config.database.clone(), None)
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    database::postgres::run_migrations::<Migrator>(&db, config.app.name).await?;

    let repository = PgProductRepository::new(db.clone()).with_null_policy(config.products.null_policy);
    let service = ProductService::new(repository).with_storage_timeout(config.products.storage_timeout);

    let app = api::routes(service, config.products.handler_options())
        .merge(health_router(config.app))
        .merge(openapi_router::<openapi::ApiDoc>());

    info!(
        "Starting {} v{} on {}",
        config.app.name,
        config.app.version,
        config.server.address()
    );

    create_app(with_http_tracing(app), &config.server).await?;

    info!("Shutting down: closing database connection");
    if let Err(e) = db.close().await {
        tracing::error!("Error closing PostgreSQL: {}", e);
    }

    Ok(())
}
