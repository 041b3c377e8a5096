// Shared fixtures for handler tests.

use std::path::PathBuf;
use std::sync::Arc;

use actix_web::web;
use uuid::Uuid;

use crate::models::user::User;
use crate::repositories::memory::MemoryStore;
use crate::services::auth_services::AuthService;
use crate::services::password::hash_password;
use crate::services::token_service::TokenService;
use crate::services::upload_service::UploadStore;
use crate::AppState;

pub const ALICE_PASSWORD: &str = "alice-password";
pub const BOB_PASSWORD: &str = "bob-password";

const BOUNDARY: &str = "----social-feed-test-boundary";

/// Builds the full route table over a `TestEnv`.
#[macro_export]
macro_rules! test_app {
    ($env:expr) => {{
        let dir = $env.upload_dir.clone();
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data($env.state.clone())
                .configure(|cfg| $crate::handlers::configure(cfg, &dir)),
        )
        .await
    }};
}

pub struct TestEnv {
    pub store: Arc<MemoryStore>,
    pub state: web::Data<AppState>,
    pub upload_dir: PathBuf,
    pub alice: User,
    pub bob: User,
    tokens: TokenService,
}

impl TestEnv {
    pub async fn new() -> Self {
        let alice = user("alice", ALICE_PASSWORD).await;
        let bob = user("bob", BOB_PASSWORD).await;
        let store = Arc::new(MemoryStore::with_users(vec![alice.clone(), bob.clone()]));
        Self::build(store, alice, bob)
    }

    pub async fn offline() -> Self {
        let alice = user("alice", ALICE_PASSWORD).await;
        let bob = user("bob", BOB_PASSWORD).await;
        Self::build(Arc::new(MemoryStore::offline()), alice, bob)
    }

    fn build(store: Arc<MemoryStore>, alice: User, bob: User) -> Self {
        let upload_dir =
            std::env::temp_dir().join(format!("social-feed-uploads-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&upload_dir).expect("create upload dir");

        let tokens = TokenService::new("handler-test-secret");
        let state = web::Data::new(AppState {
            auth: AuthService::new(store.clone(), tokens.clone()),
            posts: store.clone(),
            health: store.clone(),
            uploads: UploadStore::new(upload_dir.clone()),
        });

        Self {
            store,
            state,
            upload_dir,
            alice,
            bob,
            tokens,
        }
    }

    pub fn token_for(&self, user: &User) -> String {
        self.tokens.issue(user).expect("issue token")
    }
}

impl Drop for TestEnv {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.upload_dir);
    }
}

async fn user(name: &str, password: &str) -> User {
    User {
        id: Uuid::new_v4(),
        username: name.to_string(),
        email: format!("{}@example.com", name),
        password_hash: hash_password(password, Some(4)).await.expect("hash"),
    }
}

pub enum Part<'a> {
    Text {
        name: &'a str,
        value: &'a str,
    },
    File {
        name: &'a str,
        file_name: &'a str,
        content_type: &'a str,
        bytes: &'a [u8],
    },
}

impl<'a> Part<'a> {
    pub fn text(name: &'a str, value: &'a str) -> Self {
        Part::Text { name, value }
    }

    pub fn file(name: &'a str, file_name: &'a str, content_type: &'a str, bytes: &'a [u8]) -> Self {
        Part::File {
            name,
            file_name,
            content_type,
            bytes,
        }
    }
}

/// Encodes `parts` as `multipart/form-data`; returns (content-type header, body).
pub fn multipart_body(parts: &[Part<'_>]) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            Part::Text { name, value } => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File {
                name,
                file_name,
                content_type,
                bytes,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                         Content-Type: {}\r\n\r\n",
                        name, file_name, content_type
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    (format!("multipart/form-data; boundary={}", BOUNDARY), body)
}
