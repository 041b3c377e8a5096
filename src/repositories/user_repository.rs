use async_trait::async_trait;
use deadpool_postgres::Pool;
use tokio_postgres::Row;

use crate::errors::ApiError;
use crate::models::user::User;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Exactly one user by email (case-insensitive), or `None`.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError>;
}

#[derive(Clone)]
pub struct PgUserRepository {
    pool: Pool,
}

impl PgUserRepository {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

fn user_from_row(row: &Row) -> User {
    User {
        id: row.get("id"),
        username: row.get("username"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        let client = self.pool.get().await?;
        let row = client
            .query_opt(
                "SELECT id, username, email, password_hash FROM users \
                 WHERE lower(email) = lower($1) LIMIT 1",
                &[&email],
            )
            .await?;
        Ok(row.as_ref().map(user_from_row))
    }
}
