use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::{
    config::{Config, StoreBackend},
    services::dates::DateService,
    store::{MemoryStore, OfferStore, PgStore},
};

pub async fn create_pool(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Run the schema migrations embedded from ./migrations/
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Open the configured store. For PostgreSQL the pool is returned as well so
/// the caller can close it on shutdown.
pub async fn open_store(config: &Config) -> anyhow::Result<(Arc<dyn OfferStore>, Option<PgPool>)> {
    match config.store_backend {
        StoreBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("Missing required env var: DATABASE_URL"))?;
            let pool = create_pool(url, config.database_max_connections).await?;
            run_migrations(&pool).await?;
            info!("Database connected and migrations applied");
            Ok((Arc::new(PgStore::new(pool.clone())), Some(pool)))
        }
        StoreBackend::Memory => {
            let store = MemoryStore::new();
            DateService::seed(&store, &config.seed_dates).await?;
            info!(
                "In-memory store ready with {} seeded date(s); data is lost on exit",
                config.seed_dates.len()
            );
            Ok((Arc::new(store), None))
        }
    }
}
