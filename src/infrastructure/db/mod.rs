use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::time::Duration;

use crate::infrastructure::config::Config;

pub type DbPool = Pool<Postgres>;

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(3);

fn pool_options(config: &Config) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
}

pub async fn create_pool(config: &Config) -> Result<DbPool, sqlx::Error> {
    pool_options(config).connect(&config.database_url).await
}

pub async fn check_connection(pool: &DbPool) -> Result<bool, sqlx::Error> {
    sqlx::query("SELECT 1").fetch_one(pool).await.map(|_| true)
}
