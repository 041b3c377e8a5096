pub mod health_repository;
pub mod post_repository;
pub mod user_repository;

#[cfg(test)]
pub mod memory;

use deadpool_postgres::Pool;
use log::info;

use crate::errors::ApiError;

const INIT_SCHEMA: &str = include_str!("../../migrations/001_init.sql");

/// Creates the `users` / `posts` tables when they are missing.
pub async fn ensure_schema(pool: &Pool) -> Result<(), ApiError> {
    let client = pool.get().await?;
    client.batch_execute(INIT_SCHEMA).await?;
    info!("database schema ready");
    Ok(())
}
