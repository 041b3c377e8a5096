use async_trait::async_trait;
use chrono::{DateTime, Utc};
use deadpool_postgres::Pool;

use crate::errors::ApiError;

#[async_trait]
pub trait HealthRepository: Send + Sync {
    /// Current time as seen by the store; proves a round-trip works.
    async fn db_time(&self) -> Result<DateTime<Utc>, ApiError>;
}

#[derive(Clone)]
pub struct PgHealthRepository {
    pool: Pool,
}

impl PgHealthRepository {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HealthRepository for PgHealthRepository {
    async fn db_time(&self) -> Result<DateTime<Utc>, ApiError> {
        let client = self.pool.get().await?;
        let row = client.query_one("SELECT NOW() AS now", &[]).await?;
        Ok(row.get("now"))
    }
}
