// Password hashing and verification

use std::sync::OnceLock;

use bcrypt::{hash, verify, DEFAULT_COST};

use crate::errors::ApiError;

/// Digest compared against when the email is unknown, so both login failure
/// paths pay for one bcrypt verification.
static DUMMY_DIGEST: OnceLock<String> = OnceLock::new();

/// Hash a password with bcrypt on the blocking pool.
pub async fn hash_password(password: &str, cost: Option<u32>) -> Result<String, ApiError> {
    let password = password.to_string();
    let cost = cost.unwrap_or(DEFAULT_COST);

    tokio::task::spawn_blocking(move || {
        hash(password, cost).map_err(|e| ApiError::Internal(format!("hashing error: {}", e)))
    })
    .await
    .map_err(|e| ApiError::Internal(format!("task join error: {}", e)))?
}

/// One-way comparison of `password` against a stored bcrypt digest.
///
/// A malformed digest counts as a mismatch rather than an error so that a
/// broken row cannot be told apart from a wrong password.
pub async fn verify_password(password: &str, digest: &str) -> Result<bool, ApiError> {
    let password = password.to_string();
    let digest = digest.to_string();

    tokio::task::spawn_blocking(move || verify(password, &digest).unwrap_or(false))
        .await
        .map_err(|e| ApiError::Internal(format!("task join error: {}", e)))
}

/// Burns one verification against a throwaway digest.
pub async fn verify_against_dummy(password: &str) -> Result<(), ApiError> {
    let digest = match DUMMY_DIGEST.get() {
        Some(d) => d.clone(),
        None => {
            let d = hash_password("dummy-password-for-timing", None).await?;
            DUMMY_DIGEST.get_or_init(|| d).clone()
        }
    };
    verify_password(password, &digest).await?;
    Ok(())
}
