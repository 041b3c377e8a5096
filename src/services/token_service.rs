use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use log::debug;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ApiError;
use crate::models::user::User;

/// Lifetime of every issued token.
pub const TOKEN_TTL_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// subject / user id
    pub sub: String,
    pub id: Uuid,
    pub username: String,
    pub iat: usize,
    pub exp: usize,
}

/// Identity recovered from a verified token.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub user_id: Uuid,
    pub username: String,
}

/// Signs and verifies HS256 session tokens. Stateless: validity is signature + expiry.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn issue(&self, user: &User) -> Result<String, ApiError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.to_string(),
            id: user.id,
            username: user.username.clone(),
            iat: now.timestamp() as usize,
            exp: (now + Duration::days(TOKEN_TTL_DAYS)).timestamp() as usize,
        };
        self.sign(&claims)
    }

    pub fn sign(&self, claims: &Claims) -> Result<String, ApiError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| ApiError::Internal(format!("token encoding error: {}", e)))
    }

    /// Checks signature and expiry. Any failure is `InvalidToken`; a missing
    /// token never reaches this point.
    pub fn verify(&self, token: &str) -> Result<Identity, ApiError> {
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            debug!("token rejected: {}", e);
            ApiError::InvalidToken
        })?;

        Ok(Identity {
            user_id: data.claims.id,
            username: data.claims.username,
        })
    }
}
