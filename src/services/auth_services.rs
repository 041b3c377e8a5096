use std::sync::Arc;

use log::{info, warn};

use crate::dtos::auth::{LoginIn, LoginOut};
use crate::errors::ApiError;
use crate::models::user::UserPublic;
use crate::repositories::user_repository::UserRepository;
use crate::services::password;
use crate::services::token_service::{Identity, TokenService};

/// Login and token verification over the credential store.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    tokens: TokenService,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, tokens: TokenService) -> Self {
        Self { users, tokens }
    }

    /// Email lookup, then password check, then token issue. Any non-blank
    /// email goes to the store as-is; an unknown email and a wrong password
    /// both end in `InvalidCredentials`.
    pub async fn login(&self, input: LoginIn) -> Result<LoginOut, ApiError> {
        let email = input.email.trim();

        if email.is_empty() || input.password.is_empty() {
            return Err(ApiError::Validation(
                "Email and password are required".to_string(),
            ));
        }
        let Some(user) = self.users.find_by_email(email).await? else {
            password::verify_against_dummy(&input.password).await?;
            warn!("login rejected: credentials did not match");
            return Err(ApiError::InvalidCredentials);
        };

        if !password::verify_password(&input.password, &user.password_hash).await? {
            warn!("login rejected: credentials did not match");
            return Err(ApiError::InvalidCredentials);
        }

        let token = self.tokens.issue(&user)?;
        info!("user {} logged in", user.id);

        Ok(LoginOut {
            user: UserPublic::from(&user),
            token,
        })
    }

    pub fn verify_token(&self, token: &str) -> Result<Identity, ApiError> {
        self.tokens.verify(token)
    }
}
