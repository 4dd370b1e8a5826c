use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;

use wallet_backend::app;
use wallet_backend::config::AppConfig;
use wallet_backend::external::finance_api::FinanceApiClient;
use wallet_backend::logging::{self, LoggingConfig};
use wallet_backend::state::AppState;
use wallet_backend::store::PgLedgerStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging FIRST
    logging::init_logging(LoggingConfig::from_env())
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    let config = AppConfig::from_env().context("Invalid configuration")?;

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to the database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let market_data = FinanceApiClient::new(config.finance_api())
        .context("Failed to create finance API client")?;
    tracing::info!("📊 Using finance API at {}", config.finance_api_url);

    let state = AppState {
        store: Arc::new(PgLedgerStore::new(pool)),
        market_data: Arc::new(market_data),
    };
    let app = app::create_app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("🚀 Wallet backend running at http://{}/", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
