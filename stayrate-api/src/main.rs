use std::net::SocketAddr;
use std::sync::Arc;

use stayrate_api::{app, AppState};
use stayrate_pricing::QuoteService;
use stayrate_store::{DbClient, PgCatalogRepository, PgInventoryLedger, PgReservationRepository};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "stayrate_api=debug,tower_http=debug,axum::rejection=trace".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = stayrate_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Stayrate API on port {}", config.server.port);

    let db = DbClient::new(&config.database.url, config.database.max_connections)
        .await
        .expect("Failed to connect to Postgres");
    db.migrate().await.expect("Failed to run migrations");

    let catalog = Arc::new(PgCatalogRepository::new(db.pool.clone()));
    let inventory = Arc::new(PgInventoryLedger::new(db.pool.clone()));
    let reservations = Arc::new(PgReservationRepository::new(db.pool.clone()));
    let quotes = Arc::new(QuoteService::new(
        catalog.clone(),
        config.pricing.currency.clone(),
    ));

    let app_state = AppState {
        catalog,
        inventory,
        reservations,
        quotes,
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
