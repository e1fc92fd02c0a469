use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use invoicedeck::config::AppConfig;
use invoicedeck::store::pg::PgStore;
use invoicedeck::store::seed::SeedStore;
use invoicedeck::store::DataStore;
use invoicedeck::AppState;
use mimalloc::MiMalloc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "invoicedeck=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let config = AppConfig::from_env();

    // Store selection happens exactly once, here. Handlers receive the
    // chosen implementation and never branch on the environment again.
    let store: Arc<dyn DataStore> = match &config.database_url {
        Some(url) => {
            let pool = invoicedeck::db::create_pool(url, config.database_max_connections).await?;
            sqlx::migrate!("./migrations").run(&pool).await?;
            tracing::info!("Database configured; running in live mode");
            Arc::new(PgStore::new(
                pool,
                Duration::from_millis(config.revenue_fetch_delay_ms),
            ))
        }
        None => {
            tracing::warn!(
                "No POSTGRES_URL/DATABASE_URL set; serving seed data in fallback mode"
            );
            Arc::new(SeedStore::new())
        }
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(host = %addr, "Starting invoicedeck API server");

    let app = invoicedeck::routes::build_router(AppState::new(store, config));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
