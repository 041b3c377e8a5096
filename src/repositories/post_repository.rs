use async_trait::async_trait;
use deadpool_postgres::Pool;

use crate::errors::ApiError;
use crate::models::post::{NewPost, Post, PostWithAuthor};

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create_post(&self, post: NewPost) -> Result<Post, ApiError>;

    /// Every post with its author's username, newest first. No pagination.
    async fn list_posts_with_authors(&self) -> Result<Vec<PostWithAuthor>, ApiError>;
}

#[derive(Clone)]
pub struct PgPostRepository {
    pool: Pool,
}

impl PgPostRepository {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn create_post(&self, post: NewPost) -> Result<Post, ApiError> {
        let client = self.pool.get().await?;
        let row = client
            .query_one(
                "INSERT INTO posts (user_id, content, image_url) VALUES ($1, $2, $3) \
                 RETURNING id, user_id, content, image_url, created_at",
                &[&post.user_id, &post.content, &post.image_url],
            )
            .await?;

        Ok(Post {
            id: row.get("id"),
            user_id: row.get("user_id"),
            content: row.get("content"),
            image_url: row.get("image_url"),
            created_at: row.get("created_at"),
        })
    }

    async fn list_posts_with_authors(&self) -> Result<Vec<PostWithAuthor>, ApiError> {
        let client = self.pool.get().await?;
        let rows = client
            .query(
                "SELECT p.id, p.user_id, u.username, p.content, p.image_url, p.created_at \
                 FROM posts p JOIN users u ON u.id = p.user_id \
                 ORDER BY p.created_at DESC, p.id DESC",
                &[],
            )
            .await?;

        Ok(rows
            .iter()
            .map(|row| PostWithAuthor {
                id: row.get("id"),
                user_id: row.get("user_id"),
                username: row.get("username"),
                content: row.get("content"),
                image_url: row.get("image_url"),
                created_at: row.get("created_at"),
            })
            .collect())
    }
}
