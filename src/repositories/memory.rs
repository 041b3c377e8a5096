// In-memory store used by handler tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::errors::ApiError;
use crate::models::post::{NewPost, Post, PostWithAuthor};
use crate::models::user::User;
use crate::repositories::health_repository::HealthRepository;
use crate::repositories::post_repository::PostRepository;
use crate::repositories::user_repository::UserRepository;

#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<Vec<User>>,
    posts: Mutex<Vec<Post>>,
    pub offline: bool,
}

impl MemoryStore {
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users),
            ..Default::default()
        }
    }

    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Default::default()
        }
    }

    pub fn post_count(&self) -> usize {
        self.posts.lock().unwrap().len()
    }

    /// Inserts a post with an explicit timestamp, bypassing `create_post`.
    pub fn seed_post(&self, user_id: Uuid, content: &str, age_minutes: i64) {
        self.posts.lock().unwrap().push(Post {
            id: Uuid::new_v4(),
            user_id,
            content: content.to_string(),
            image_url: None,
            created_at: Utc::now() - Duration::minutes(age_minutes),
        });
    }

    fn check_online(&self) -> Result<(), ApiError> {
        if self.offline {
            return Err(ApiError::Store("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        self.check_online()?;
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }
}

#[async_trait]
impl PostRepository for MemoryStore {
    async fn create_post(&self, post: NewPost) -> Result<Post, ApiError> {
        self.check_online()?;
        if !self.users.lock().unwrap().iter().any(|u| u.id == post.user_id) {
            return Err(ApiError::Store(
                "insert or update on table \"posts\" violates foreign key constraint".to_string(),
            ));
        }

        let created = Post {
            id: Uuid::new_v4(),
            user_id: post.user_id,
            content: post.content,
            image_url: post.image_url,
            created_at: Utc::now(),
        };
        self.posts.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn list_posts_with_authors(&self) -> Result<Vec<PostWithAuthor>, ApiError> {
        self.check_online()?;
        let users = self.users.lock().unwrap();
        let posts = self.posts.lock().unwrap();

        // insertion index breaks ties between equal timestamps
        let mut rows: Vec<(usize, PostWithAuthor)> = posts
            .iter()
            .enumerate()
            .filter_map(|(seq, p)| {
                users.iter().find(|u| u.id == p.user_id).map(|u| {
                    (
                        seq,
                        PostWithAuthor {
                            id: p.id,
                            user_id: p.user_id,
                            username: u.username.clone(),
                            content: p.content.clone(),
                            image_url: p.image_url.clone(),
                            created_at: p.created_at,
                        },
                    )
                })
            })
            .collect();
        rows.sort_by(|(sa, a), (sb, b)| b.created_at.cmp(&a.created_at).then(sb.cmp(sa)));
        Ok(rows.into_iter().map(|(_, row)| row).collect())
    }
}

#[async_trait]
impl HealthRepository for MemoryStore {
    async fn db_time(&self) -> Result<DateTime<Utc>, ApiError> {
        self.check_online()?;
        Ok(Utc::now())
    }
}
