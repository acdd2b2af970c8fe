pub mod kpi;
pub mod missions;

use skyops_common::error::{SkyopsError, SkyopsResult};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Create a Postgres connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> SkyopsResult<PgPool> {
    tracing::info!("connecting to database");
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
        .map_err(|e| SkyopsError::Database(e.to_string()))
}
